//! Error type for the generator's public API. Closed set: every
//! fallible operation either succeeds or returns `InvalidShape`. Internal
//! degenerate-geometry cases (zero-length edges, empty contours) are
//! repaired in place rather than surfaced, per the degenerate-edge
//! convention documented in `vector`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    /// The only variant ever returned as `Err` from the public API: the
    /// input shape cannot be turned into a distance field at all (e.g. a
    /// composite glyph, or an outline with self-contradictory winding).
    #[error("shape is not usable for distance field generation: {0}")]
    InvalidShape(String),

    /// A shape or contour had no edges. Handled internally by returning
    /// an all-background bitmap; never escapes as `Err`.
    #[error("shape has no contours")]
    EmptyShape,

    /// An edge collapsed to a single point. Handled internally via the
    /// `Vec2` fallback conventions in `vector`; never escapes as `Err`.
    #[error("edge segment is degenerate")]
    DegenerateEdge,
}

pub type Result<T> = std::result::Result<T, GenError>;
