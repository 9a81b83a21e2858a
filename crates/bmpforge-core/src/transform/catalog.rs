//! The catalog of transforms as a single serializable type.
//!
//! [`Transform`] names every operation along with its parameters, so a
//! sequence of edits can be stored as JSON and replayed with
//! [`apply_pipeline`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{filters, rotation, scale};
use crate::raster::Raster;

/// Valid range for the Clarendon strength.
pub const CLARENDON_FACTOR_RANGE: (f64, f64) = (0.0, 1.0);

/// Valid range for lighten and darken factors.
pub const SCALING_FACTOR_RANGE: (f64, f64) = (0.0, 10.0);

/// Valid range for arbitrary-angle rotation, in degrees.
pub const ROTATION_DEGREES_RANGE: (i32, i32) = (1, 359);

/// Errors reported by [`Transform::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// A scaling factor lies outside its allowed range.
    #[error("{name} factor {value} is outside [{min}, {max}]")]
    FactorOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Enlargement factors must both be positive.
    #[error("Scale factors must be positive, got {x_scale}x{y_scale}")]
    InvalidScale { x_scale: i32, y_scale: i32 },

    /// Arbitrary rotation angle outside 1-359 degrees.
    #[error("Rotation angle must be between 1 and 359 degrees, got {0}")]
    AngleOutOfRange(i32),
}

/// One operation from the transform catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Transform {
    /// Darken toward the corners.
    Vignette,
    /// Push bright pixels lighter and dark pixels darker.
    Clarendon { factor: f64 },
    /// Average the three channels.
    Grayscale,
    /// One clockwise quarter turn.
    Rotate90,
    /// Clockwise quarter turns; negative counts turn counter-clockwise.
    RotateQuarterTurns { turns: i32 },
    /// Integer block enlargement.
    Enlarge { x_scale: i32, y_scale: i32 },
    /// Threshold to black and white.
    HighContrast,
    /// Move channels toward white.
    Lighten { factor: f64 },
    /// Scale channels toward black.
    Darken { factor: f64 },
    /// Reduce to black, white, red, green or blue.
    PrimaryColors,
    /// Clockwise rotation by whole degrees with bilinear resampling.
    RotateDegrees { degrees: i32 },
}

impl Transform {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Vignette => "vignette",
            Transform::Clarendon { .. } => "clarendon",
            Transform::Grayscale => "grayscale",
            Transform::Rotate90 => "rotate90",
            Transform::RotateQuarterTurns { .. } => "rotate_quarter_turns",
            Transform::Enlarge { .. } => "enlarge",
            Transform::HighContrast => "high_contrast",
            Transform::Lighten { .. } => "lighten",
            Transform::Darken { .. } => "darken",
            Transform::PrimaryColors => "primary_colors",
            Transform::RotateDegrees { .. } => "rotate_degrees",
        }
    }

    /// Check parameters against the ranges an interactive caller accepts.
    ///
    /// [`Transform::apply`] does not call this: every transform is total
    /// and clamps its output, so out-of-range values are a caller policy.
    pub fn validate(&self) -> Result<(), TransformError> {
        match *self {
            Transform::Clarendon { factor } => {
                check_factor("Clarendon", factor, CLARENDON_FACTOR_RANGE)
            }
            Transform::Lighten { factor } => check_factor("Lighten", factor, SCALING_FACTOR_RANGE),
            Transform::Darken { factor } => check_factor("Darken", factor, SCALING_FACTOR_RANGE),
            Transform::Enlarge { x_scale, y_scale } if x_scale <= 0 || y_scale <= 0 => {
                Err(TransformError::InvalidScale { x_scale, y_scale })
            }
            Transform::RotateDegrees { degrees } => {
                let (min, max) = ROTATION_DEGREES_RANGE;
                if (min..=max).contains(&degrees) {
                    Ok(())
                } else {
                    Err(TransformError::AngleOutOfRange(degrees))
                }
            }
            _ => Ok(()),
        }
    }

    /// Apply this transform, returning a new raster.
    pub fn apply(&self, image: &Raster) -> Raster {
        debug!(
            transform = self.name(),
            width = image.width(),
            height = image.height(),
            "Applying transform"
        );
        match *self {
            Transform::Vignette => filters::vignette(image),
            Transform::Clarendon { factor } => filters::clarendon(image, factor),
            Transform::Grayscale => filters::grayscale(image),
            Transform::Rotate90 => rotation::rotate_90(image),
            Transform::RotateQuarterTurns { turns } => {
                rotation::rotate_quarter_turns(image, turns)
            }
            Transform::Enlarge { x_scale, y_scale } => scale::enlarge(image, x_scale, y_scale),
            Transform::HighContrast => filters::high_contrast(image),
            Transform::Lighten { factor } => filters::lighten(image, factor),
            Transform::Darken { factor } => filters::darken(image, factor),
            Transform::PrimaryColors => filters::primary_colors(image),
            Transform::RotateDegrees { degrees } => rotation::rotate_degrees(image, degrees),
        }
    }
}

/// Apply `steps` in order.
///
/// Returns a clone of the input when `steps` is empty.
pub fn apply_pipeline(image: &Raster, steps: &[Transform]) -> Raster {
    steps
        .iter()
        .fold(image.clone(), |current, step| step.apply(&current))
}

fn check_factor(
    name: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), TransformError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(TransformError::FactorOutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rgb;

    fn test_image() -> Raster {
        Raster::from_fn(6, 4, |row, col| Rgb::new(row as u8 * 60, col as u8 * 40, 90))
    }

    #[test]
    fn test_apply_dispatches() {
        let img = test_image();
        assert_eq!(
            Transform::Grayscale.apply(&img),
            filters::grayscale(&img)
        );
        assert_eq!(
            Transform::RotateQuarterTurns { turns: -1 }.apply(&img),
            rotation::rotate_quarter_turns(&img, 3)
        );
        assert_eq!(
            Transform::Enlarge {
                x_scale: 2,
                y_scale: 3
            }
            .apply(&img)
            .dimensions(),
            (12, 12)
        );
        assert_eq!(
            Transform::RotateDegrees { degrees: 45 }.apply(&img),
            rotation::rotate_degrees(&img, 45)
        );
    }

    #[test]
    fn test_every_transform_keeps_empty_empty() {
        let all = [
            Transform::Vignette,
            Transform::Clarendon { factor: 0.5 },
            Transform::Grayscale,
            Transform::Rotate90,
            Transform::RotateQuarterTurns { turns: 2 },
            Transform::Enlarge {
                x_scale: 2,
                y_scale: 2,
            },
            Transform::HighContrast,
            Transform::Lighten { factor: 0.5 },
            Transform::Darken { factor: 0.5 },
            Transform::PrimaryColors,
            Transform::RotateDegrees { degrees: 10 },
        ];
        for t in all {
            assert!(t.apply(&Raster::empty()).is_empty(), "{}", t.name());
        }
    }

    #[test]
    fn test_validate_ranges() {
        assert!(Transform::Clarendon { factor: 0.7 }.validate().is_ok());
        assert!(Transform::Clarendon { factor: 1.5 }.validate().is_err());
        assert!(Transform::Lighten { factor: 10.0 }.validate().is_ok());
        assert!(Transform::Darken { factor: -0.1 }.validate().is_err());
        assert!(Transform::Darken { factor: f64::NAN }.validate().is_err());
        assert!(Transform::RotateDegrees { degrees: 1 }.validate().is_ok());
        assert!(Transform::RotateDegrees { degrees: 359 }.validate().is_ok());
        assert_eq!(
            Transform::RotateDegrees { degrees: 360 }.validate(),
            Err(TransformError::AngleOutOfRange(360))
        );
        assert_eq!(
            Transform::Enlarge {
                x_scale: 0,
                y_scale: 1
            }
            .validate(),
            Err(TransformError::InvalidScale {
                x_scale: 0,
                y_scale: 1
            })
        );
        assert!(Transform::RotateQuarterTurns { turns: -7 }.validate().is_ok());
    }

    #[test]
    fn test_transform_error_display() {
        let err = Transform::Clarendon { factor: 2.0 }.validate().unwrap_err();
        assert_eq!(err.to_string(), "Clarendon factor 2 is outside [0, 1]");
    }

    #[test]
    fn test_pipeline_applies_in_order() {
        let img = test_image();
        let steps = [Transform::Rotate90, Transform::Grayscale];
        let expected = filters::grayscale(&rotation::rotate_90(&img));
        assert_eq!(apply_pipeline(&img, &steps), expected);
        assert_eq!(apply_pipeline(&img, &[]), img);
    }

    #[test]
    fn test_serde_json_shape() {
        let json = r#"[
            {"op": "rotate_degrees", "degrees": 30},
            {"op": "clarendon", "factor": 0.5},
            {"op": "rotate90"},
            {"op": "enlarge", "x_scale": 2, "y_scale": 1}
        ]"#;
        let steps: Vec<Transform> = serde_json::from_str(json).unwrap();
        assert_eq!(
            steps,
            vec![
                Transform::RotateDegrees { degrees: 30 },
                Transform::Clarendon { factor: 0.5 },
                Transform::Rotate90,
                Transform::Enlarge {
                    x_scale: 2,
                    y_scale: 1
                },
            ]
        );

        let out = serde_json::to_string(&Transform::HighContrast).unwrap();
        assert_eq!(out, r#"{"op":"high_contrast"}"#);
    }
}
