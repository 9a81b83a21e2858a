//! Command line arguments using clap

use std::path::{Path, PathBuf};

use bmpforge_core::Transform;
use clap::{Parser, Subcommand};

/// bmpforge - BMP transform tool
///
/// Decodes a 24- or 32-bit BMP, applies one transform (or a JSON pipeline
/// of them) and writes the result as a 24-bit BMP.
#[derive(Parser, Debug)]
#[command(name = "bmpforge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Decode, transform and re-encode BMP images", long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Source BMP file
    pub input: PathBuf,

    /// Destination file; `.bmp` is appended if missing
    ///
    /// A bare name equal to a subcommand (`info`, `grayscale`, ...) is read
    /// as that subcommand; write it as `./info` instead.
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Darken toward the corners
    Vignette,

    /// Push bright pixels lighter and dark pixels darker
    Clarendon {
        /// Strength in [0, 1]
        factor: f64,
    },

    /// Average the three channels
    Grayscale,

    /// Rotate 90 degrees clockwise
    Rotate90,

    /// Rotate by quarter turns (negative = counter-clockwise)
    RotateQuarterTurns {
        #[arg(allow_negative_numbers = true)]
        turns: i32,
    },

    /// Enlarge each pixel into a block
    Enlarge {
        /// Horizontal factor
        x_scale: i32,
        /// Vertical factor
        y_scale: i32,
    },

    /// Threshold to black and white
    HighContrast,

    /// Move channels toward white
    Lighten {
        /// Factor in [0, 10]
        factor: f64,
    },

    /// Scale channels toward black
    Darken {
        /// Factor in [0, 10]
        factor: f64,
    },

    /// Reduce to black, white and the three primaries
    PrimaryColors,

    /// Rotate clockwise by 1-359 degrees
    RotateDegrees { degrees: i32 },

    /// Apply a JSON array of transforms in order
    Pipeline {
        /// Path to the pipeline file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the image dimensions without writing anything
    Info,
}

impl Command {
    /// The catalog entry for a single-transform command.
    pub fn to_transform(&self) -> Option<Transform> {
        let transform = match *self {
            Command::Vignette => Transform::Vignette,
            Command::Clarendon { factor } => Transform::Clarendon { factor },
            Command::Grayscale => Transform::Grayscale,
            Command::Rotate90 => Transform::Rotate90,
            Command::RotateQuarterTurns { turns } => Transform::RotateQuarterTurns { turns },
            Command::Enlarge { x_scale, y_scale } => Transform::Enlarge { x_scale, y_scale },
            Command::HighContrast => Transform::HighContrast,
            Command::Lighten { factor } => Transform::Lighten { factor },
            Command::Darken { factor } => Transform::Darken { factor },
            Command::PrimaryColors => Transform::PrimaryColors,
            Command::RotateDegrees { degrees } => Transform::RotateDegrees { degrees },
            Command::Pipeline { .. } | Command::Info => return None,
        };
        Some(transform)
    }
}

/// Append `.bmp` unless the path already ends with it, in any case.
pub fn with_bmp_extension(path: &Path) -> PathBuf {
    let has_ext = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bmp"));
    if has_ext {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".bmp");
    PathBuf::from(name)
}
