//! Generation-time configuration. A plain struct rather than a builder,
//! since every field has a sane platform-independent default and callers
//! typically override at most one or two.

use crate::error::{GenError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationConfig {
    /// Number of flattening steps per quadratic/cubic edge fed to the
    /// boolean backend.
    pub curve_tessellation_steps: usize,
    /// Minimum turn angle, in radians, treated as a sharp corner by
    /// `Shape::color_edges`. ~3.0 rad (~172°) matches msdfgen's default.
    pub corner_angle_threshold_rad: f64,
    /// Decimal digits of precision retained when snapping boolean output
    /// back to floating point.
    pub precision_digits: u32,
    /// Distance, in shape units, mapped to the full [0, 1] output range.
    pub range: f64,
    /// Shape-to-pixel scale applied before generation.
    pub scale: f64,
    /// Shape-space translation applied before generation.
    pub translate: (f64, f64),
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            curve_tessellation_steps: 16,
            corner_angle_threshold_rad: 3.0,
            precision_digits: 6,
            range: 4.0,
            scale: 1.0,
            translate: (0.0, 0.0),
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.curve_tessellation_steps == 0 {
            return Err(GenError::InvalidShape(
                "curve_tessellation_steps must be greater than zero".into(),
            ));
        }
        if self.precision_digits > 12 {
            return Err(GenError::InvalidShape(
                "precision_digits must be at most 12".into(),
            ));
        }
        if self.range <= 0.0 {
            return Err(GenError::InvalidShape("range must be positive".into()));
        }
        if self.scale <= 0.0 {
            return Err(GenError::InvalidShape("scale must be positive".into()));
        }
        Ok(())
    }
}
