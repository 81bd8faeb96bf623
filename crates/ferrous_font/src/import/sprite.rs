//! Builds a `Shape` from a sprite path's ordered add/subtract anchor
//! rings. Draw order matters: a subtract carves only what has been added
//! so far, which is why it runs as an immediate difference rather than
//! being batched with the adds.

use crate::boolean;
use crate::color::EdgeColor;
use crate::contour::Contour;
use crate::error::{GenError, Result};
use crate::segment::EdgeSegment;
use crate::shape::Shape;
use crate::vector::{ortho_normal, Vec2};

#[derive(Clone, Copy, Debug)]
pub struct Anchor {
    pub pos: Vec2,
    /// Signed perpendicular offset of the control point from the edge
    /// midpoint. Zero means a straight (Linear) segment to the next anchor.
    pub curvature: f64,
}

impl Anchor {
    pub fn new(pos: Vec2, curvature: f64) -> Self {
        Anchor { pos, curvature }
    }
}

#[derive(Clone, Debug)]
pub enum PathOp {
    Add(Vec<Anchor>),
    Subtract(Vec<Anchor>),
}

fn contour_from_anchors(anchors: &[Anchor]) -> Contour {
    let mut contour = Contour::new();
    let n = anchors.len();
    for i in 0..n {
        let a = anchors[i];
        let b = anchors[(i + 1) % n];
        if a.curvature.abs() < 1e-9 {
            contour.edges.push(EdgeSegment::Linear {
                p0: a.pos,
                p1: b.pos,
                color: EdgeColor::WHITE,
            });
        } else {
            let mid = (a.pos + b.pos) * 0.5;
            let perp = ortho_normal(b.pos - a.pos, false);
            let control = mid + perp * a.curvature;
            contour.edges.push(EdgeSegment::Quadratic {
                p0: a.pos,
                control,
                p1: b.pos,
                color: EdgeColor::WHITE,
            });
        }
    }
    contour
}

/// Builds the prepared (normalized, coloured) shape for a sprite path.
/// Every ring, add or subtract, must carry at least 3 anchors — fewer
/// cannot close into a polygon at all, so this is rejected as
/// `InvalidShape` rather than silently dropped or accepted degenerate.
pub fn build_shape(
    paths: &[PathOp],
    tessellation_steps: usize,
    corner_angle_threshold_rad: f64,
    precision_digits: u32,
    seed: u64,
) -> Result<Shape> {
    let mut accumulated: Vec<Contour> = Vec::new();
    for path in paths {
        match path {
            PathOp::Add(anchors) => {
                if anchors.len() < 3 {
                    return Err(GenError::InvalidShape(format!(
                        "add path has {} anchor(s); a sprite path needs at least 3",
                        anchors.len()
                    )));
                }
                accumulated.push(contour_from_anchors(anchors));
            }
            PathOp::Subtract(anchors) => {
                if anchors.len() < 3 {
                    return Err(GenError::InvalidShape(format!(
                        "subtract path has {} anchor(s); a sprite path needs at least 3",
                        anchors.len()
                    )));
                }
                let hole = contour_from_anchors(anchors);
                accumulated = boolean::difference(&accumulated, &hole, tessellation_steps, precision_digits);
            }
        }
    }

    let resolved = boolean::resolve_self_overlaps(&accumulated, tessellation_steps, precision_digits);
    let mut shape = Shape {
        contours: resolved,
        inverse_y_axis: false,
    };
    shape.normalize();
    shape.color_edges(corner_angle_threshold_rad, seed);
    Ok(shape)
}
