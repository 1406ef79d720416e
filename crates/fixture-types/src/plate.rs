use serde::{Deserialize, Serialize};

/// Identifier of one of the three stacked fixture plates.
///
/// Plate A is the topmost plate (facing the operator), C the bottom one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlateId {
    A,
    B,
    C,
}

impl PlateId {
    /// All plates in stacking order.
    pub const ALL: [PlateId; 3] = [PlateId::A, PlateId::B, PlateId::C];

    /// Index into per-plate tables (thickness list, hole triples).
    pub fn index(&self) -> usize {
        match self {
            PlateId::A => 0,
            PlateId::B => 1,
            PlateId::C => 2,
        }
    }

    /// Letter used in output file names.
    pub fn letter(&self) -> char {
        match self {
            PlateId::A => 'A',
            PlateId::B => 'B',
            PlateId::C => 'C',
        }
    }
}

impl std::fmt::Display for PlateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_stacking_order() {
        let indices: Vec<usize> = PlateId::ALL.iter().map(|p| p.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn letters_match_file_naming() {
        let letters: String = PlateId::ALL.iter().map(|p| p.letter()).collect();
        assert_eq!(letters, "ABC");
    }
}
