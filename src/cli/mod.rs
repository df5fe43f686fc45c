//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{command, Args, Parser, Subcommand};
use fac_frame::{CoordinateFrame, SecondAxis};
use indicatif::ProgressBar;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory for dated output files, defaults to the home directory
    #[arg(long, env = "FAC_OUTPUT_DIR", global = true)]
    pub output_dir: Option<PathBuf>,

    /// Log filter such as `info` or `fac_frame=debug`, overrides `RUST_LOG`
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build field-aligned rotation matrices from magnetic field samples
    Matrix(MatrixArgs),
    /// Build the matrices and rotate the field into the field-aligned frame
    Rotate(MatrixArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MatrixArgs {
    /// Magnetic field samples as `time,x,y,z` lines
    #[arg(long)]
    pub mag: PathBuf,

    /// Spacecraft position samples as `time,x,y,z` lines
    #[arg(long)]
    pub pos: Option<PathBuf>,

    /// Coordinate frame of the position samples, must be `gei` for mrgeo and rgeo
    #[arg(long)]
    pub pos_coords: Option<CoordinateFrame>,

    /// Second axis of the frame: xgse, mrgeo or rgeo
    #[arg(long, default_value = "xgse")]
    pub other_dim: SecondAxis,

    /// Output file, defaults to a dated file in the output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn should_have_valid_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn should_parse_matrix_defaults() {
        let cli = Cli::try_parse_from(["fac-frame", "matrix", "--mag", "b.csv"]).unwrap();

        let Commands::Matrix(args) = cli.command else {
            panic!("expected matrix command");
        };
        assert_eq!(args.other_dim, SecondAxis::FixedX);
        assert_eq!(args.pos_coords, None);
        assert!(args.pos.is_none());
    }

    #[test]
    fn should_parse_position_options() {
        let cli = Cli::try_parse_from([
            "fac-frame",
            "rotate",
            "--mag",
            "b.csv",
            "--pos",
            "r.csv",
            "--pos-coords",
            "GSE",
            "--other-dim",
            "rgeo",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let Commands::Rotate(args) = cli.command else {
            panic!("expected rotate command");
        };
        assert_eq!(args.other_dim, SecondAxis::ReferenceGeo);
        assert_eq!(args.pos_coords, Some(CoordinateFrame::Gse));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn should_leave_position_frame_undeclared() {
        let cli = Cli::try_parse_from([
            "fac-frame",
            "matrix",
            "--mag",
            "b.csv",
            "--pos",
            "r.csv",
            "--other-dim",
            "rgeo",
        ])
        .unwrap();

        let Commands::Matrix(args) = cli.command else {
            panic!("expected matrix command");
        };
        assert!(args.pos.is_some());
        assert_eq!(args.pos_coords, None);
    }

    #[test]
    fn should_reject_unknown_strategy() {
        let result =
            Cli::try_parse_from(["fac-frame", "matrix", "--mag", "b.csv", "--other-dim", "ygse"]);
        assert!(result.is_err());
    }
}
