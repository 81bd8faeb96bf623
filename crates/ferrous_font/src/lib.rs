//! Offline multi-channel signed distance field generator for sprite
//! paths and font glyph outlines.
//!
//! Pipeline: an import adapter (`import::sprite` or `import::font`)
//! builds a fully prepared [`Shape`] (boolean resolved, normalized,
//! edge-coloured); [`generator::generate`] rasterizes it into an
//! [`MsdfBitmap`]; [`sign_correction::correct_signs`] and
//! [`error_correction::correct_errors`] repair the result in place. The
//! two public entry points below run the whole pipeline in one call.

pub mod boolean;
pub mod color;
pub mod config;
pub mod contour;
pub mod equation_solver;
pub mod error;
pub mod error_correction;
pub mod generator;
pub mod import;
mod parallel;
pub mod segment;
pub mod shape;
pub mod sign_correction;
pub mod signed_distance;
pub mod vector;

pub use color::EdgeColor;
pub use config::GenerationConfig;
pub use contour::Contour;
pub use error::{GenError, Result};
pub use generator::{MsdfBitmap, MultiDistance};
pub use segment::EdgeSegment;
pub use shape::Shape;
pub use signed_distance::SignedDistance;
pub use vector::Vec2;

/// Runs the full pipeline for a sprite path: import, boolean resolution,
/// normalize, colour, generate, sign-correct, error-correct.
pub fn generate_msdf_for_sprite(
    paths: &[import::sprite::PathOp],
    config: &GenerationConfig,
    width: usize,
    height: usize,
) -> Result<MsdfBitmap> {
    config.validate()?;
    let shape = import::sprite::build_shape(
        paths,
        config.curve_tessellation_steps,
        config.corner_angle_threshold_rad,
        config.precision_digits,
        0,
    )?;
    Ok(run_pipeline(&shape, config, width, height))
}

/// Runs the full pipeline for one glyph's TTF contour data.
pub fn generate_msdf_for_glyph(
    contours: &[Vec<import::font::RawPoint>],
    config: &GenerationConfig,
    width: usize,
    height: usize,
) -> Result<MsdfBitmap> {
    config.validate()?;
    let mut shape = import::font::build_shape(contours)?;
    let resolved = boolean::resolve_self_overlaps(
        &shape.contours,
        config.curve_tessellation_steps,
        config.precision_digits,
    );
    shape.contours = resolved;
    shape.normalize();
    shape.color_edges(config.corner_angle_threshold_rad, 0);
    Ok(run_pipeline(&shape, config, width, height))
}

fn run_pipeline(shape: &Shape, config: &GenerationConfig, width: usize, height: usize) -> MsdfBitmap {
    let mut bitmap = generator::generate(shape, config, width, height);
    sign_correction::correct_signs(&mut bitmap, shape, config.scale, config.translate);
    error_correction::correct_errors(
        &mut bitmap,
        shape,
        config.scale,
        config.translate,
        config.corner_angle_threshold_rad,
    );
    bitmap
}
