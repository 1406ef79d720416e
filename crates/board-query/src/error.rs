use thiserror::Error;

/// Errors from board parsing and outline assembly.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("s-expression parse error: {0}")]
    Syntax(#[from] crate::sexpr::SyntaxError),

    #[error("not a KiCad board file: root tag is `{found}`")]
    NotABoard { found: String },

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("board has no shapes on the Edge.Cuts layer")]
    EmptyOutline,

    #[error("board edge does not close: {open_chains} open chain(s) remain")]
    OpenOutline { open_chains: usize },

    #[error("board edge forms {count} closed loops, expected exactly 1")]
    MultipleOutlines { count: usize },

    #[error("degenerate edge arc through collinear points")]
    DegenerateArc,
}
