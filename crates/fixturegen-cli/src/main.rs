//! fixturegen: generate PCB test-fixture plates from a KiCad board.
//!
//! Reads a TOML config and a `.kicad_pcb` file, derives hole placements
//! from annotation footprints and unannotated pads, and writes STEP files
//! for the three fixture plates, two pressure pins, and the tester-board
//! mount pillar.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

use fixture_ops::PressurePinProfile;
use fixture_types::PlateId;

/// PCB test-fixture plate generator.
///
/// Derives hole placements from `TestFixture_*` annotation footprints and
/// unannotated test pads on a KiCad board, and writes manufacturable STEP
/// geometry for the fixture plates and pins.
#[derive(Parser, Debug)]
#[command(name = "fixturegen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: PathBuf,

    /// Path to the KiCad board file (.kicad_pcb)
    #[arg(value_name = "BOARD_FILE")]
    board: PathBuf,

    /// Output directory for the STEP files
    #[arg(value_name = "OUTPUT_DIR")]
    output: PathBuf,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only show errors
    #[arg(short, long)]
    quiet: bool,
}

fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(log_level(args.verbose, args.quiet));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("fixture generation failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = fixture_config::load(&args.config)?;

    let board_text = std::fs::read_to_string(&args.board)
        .with_context(|| format!("reading board file {}", args.board.display()))?;
    let board = board_query::parse_board(&board_text)?;

    if let Some(board_thickness) = board.thickness_mm {
        if (board_thickness - config.pcb.thickness_mm).abs() > 0.01 {
            warn!(
                board_thickness,
                config_thickness = config.pcb.thickness_mm,
                "board file and config disagree on PCB thickness"
            );
        }
    }

    let annotations = board_query::annotation_footprints(&board);
    let mut groups = board_query::annotation_positions(&annotations);
    let outline = board_query::board_outline(&board)?.simplified(0.01);

    let smd_pads = board_query::test_point_smd_pads(&board);
    let unannotated_smd = board_query::unannotated_pads(
        &smd_pads,
        &annotations,
        board_query::DEFAULT_ANNOTATION_RADIUS_MM,
    );
    let all_tht = board_query::tht_pads(&board);
    let unannotated_tht = board_query::unannotated_pads(
        &all_tht,
        &annotations,
        board_query::DEFAULT_ANNOTATION_RADIUS_MM,
    );

    if let Some(kind) = &config.project.test_point_auto_annotation_type {
        groups
            .entry(kind.clone())
            .or_default()
            .extend(unannotated_smd.iter().map(|pad| pad.position));
    }
    if let Some(kind) = &config.project.tht_pad_auto_annotation_type {
        groups
            .entry(kind.clone())
            .or_default()
            .extend(unannotated_tht.iter().map(|pad| pad.position));
    }

    info!(
        annotations = annotations.len(),
        auto_test_points = unannotated_smd.len(),
        auto_tht_pads = unannotated_tht.len(),
        outline_points = outline.len(),
        "board queried"
    );

    let plates = fixture_ops::render_plates(&config, &groups, &outline)?;

    let screw_diameter = config.plate_alignment_pins.pressure_pin_screw_hole_diameter_mm;
    let pin_profile = PressurePinProfile::default();
    let short_length = config.pcb.top_clearance_mm;
    let long_length =
        short_length + config.pcb.thickness_mm + config.pcb.bottom_clearance_mm;
    let short_pin = fixture_ops::pressure_pin(short_length, screw_diameter, &pin_profile)?;
    let long_pin = fixture_ops::pressure_pin(long_length, screw_diameter, &pin_profile)?;
    let pillar = fixture_ops::mount_pillar(&config.tester_board)?;

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating output directory {}", args.output.display()))?;

    let project = &config.project.name;
    for (plate_id, solid) in PlateId::ALL.iter().zip(plates.iter()) {
        write_part(&args.output, &format!("{project}_plate_{plate_id}.step"), solid)?;
    }
    write_part(
        &args.output,
        &format!("{project}_pressure_pin_{short_length}mm.step"),
        &short_pin,
    )?;
    write_part(
        &args.output,
        &format!("{project}_pressure_pin_{long_length}mm.step"),
        &long_pin,
    )?;
    write_part(
        &args.output,
        &format!(
            "{project}_tester_board_mount_{}mm.step",
            config.tester_board.offset_mm
        ),
        &pillar,
    )?;

    Ok(())
}

fn write_part(
    output: &std::path::Path,
    file_name: &str,
    solid: &kernel_bridge::Solid,
) -> anyhow::Result<()> {
    let path = output.join(file_name);
    kernel_bridge::step::write_step(solid, &path)?;
    info!(path = %path.display(), "wrote STEP file");
    Ok(())
}
