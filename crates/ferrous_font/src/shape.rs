//! `Shape`: the collection of contours a sprite path or glyph outline
//! resolves to, plus the normalization and edge-colouring passes that
//! run before MSDF generation.

use crate::color::{init_color, switch_color, switch_color_constrained, EdgeColor};
use crate::contour::Contour;
use crate::segment::Bounds;
use crate::vector::safe_normalize;

#[derive(Clone, Debug, Default)]
pub struct Shape {
    pub contours: Vec<Contour>,
    /// True when increasing y in shape space should map to decreasing
    /// pixel rows (the TTF `glyf` convention); false for sprite imports,
    /// which already use a y-down coordinate frame matching the bitmap.
    pub inverse_y_axis: bool,
}

impl Shape {
    pub fn new() -> Self {
        Shape {
            contours: Vec::new(),
            inverse_y_axis: false,
        }
    }

    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::empty();
        for c in &self.contours {
            b.extend(c.bounds());
        }
        b
    }

    /// Splits any contour with fewer than 3 edges into thirds so the
    /// edge-colouring pass below always has enough edges to distribute
    /// three colours across. Mirrors msdfgen's `Shape::normalize`.
    pub fn normalize(&mut self) {
        for contour in &mut self.contours {
            if contour.edges.len() == 1 {
                let parts = contour.edges[0].split_in_thirds();
                contour.edges = parts.to_vec();
            }
        }
    }

    /// Assigns each edge one of the three two-channel colours (cyan,
    /// magenta, yellow) so that sharp corners are reconstructible from the
    /// per-channel median after generation. `corner_angle_threshold` is the
    /// minimum turn angle (radians) treated as a corner; `seed` makes the
    /// colour assignment deterministic and reproducible across runs.
    pub fn color_edges(&mut self, corner_angle_threshold: f64, mut seed: u64) {
        let cross_threshold = corner_angle_threshold.sin();
        let mut color = init_color(&mut seed);
        let mut corners = Vec::new();

        for contour in &mut self.contours {
            if contour.edges.is_empty() {
                continue;
            }
            corners.clear();

            let mut prev_dir = safe_normalize(contour.edges.last().unwrap().direction(1.0));
            for (i, edge) in contour.edges.iter().enumerate() {
                let dir = safe_normalize(edge.direction(0.0));
                if is_corner(prev_dir, dir, cross_threshold) {
                    corners.push(i);
                }
                prev_dir = safe_normalize(edge.direction(1.0));
            }

            if corners.is_empty() {
                switch_color(&mut color, &mut seed);
                for edge in &mut contour.edges {
                    edge.set_color(color);
                }
            } else if corners.len() == 1 {
                let mut colors = [EdgeColor::BLACK; 3];
                switch_color(&mut color, &mut seed);
                colors[0] = color;
                colors[1] = EdgeColor::WHITE;
                switch_color(&mut color, &mut seed);
                colors[2] = color;

                let corner = corners[0];
                let m = contour.edges.len();
                if m >= 3 {
                    for i in 0..m {
                        let idx = (corner + i) % m;
                        let slot = (1 + symmetrical_trichotomy(i as i32, m as i32)) as usize;
                        contour.edges[idx].set_color(colors[slot]);
                    }
                } else if m == 2 {
                    // Two edges, one corner: split both into thirds and
                    // hand out two of each colour so every sixth carries
                    // one of the teardrop's three colours.
                    let triple_colors = [colors[0], colors[0], colors[1], colors[1], colors[2], colors[2]];
                    let mut out = Vec::with_capacity(6);
                    for (mut e, c) in a_and_b(contour, corner).into_iter().zip(triple_colors) {
                        e.set_color(c);
                        out.push(e);
                    }
                    contour.edges = out;
                } else {
                    let mut out = contour.edges[0].split_in_thirds();
                    for (e, c) in out.iter_mut().zip(colors) {
                        e.set_color(c);
                    }
                    contour.edges = out.to_vec();
                }
            } else {
                switch_color(&mut color, &mut seed);
                let initial_color = color;
                let mut spline = 0usize;
                let m = contour.edges.len();
                let corners_len = corners.len();
                let start = corners[0];
                for i in 0..m {
                    let idx = (start + i) % m;
                    if spline + 1 < corners_len && corners[spline + 1] == idx {
                        spline += 1;
                        let banned = if spline == corners_len - 1 {
                            initial_color
                        } else {
                            EdgeColor::BLACK
                        };
                        switch_color_constrained(&mut color, &mut seed, banned);
                    }
                    contour.edges[idx].set_color(color);
                }
            }
        }
    }
}

/// Re-splits the two edges at `corner` and its neighbour into three parts
/// each, in edge order starting at `corner`, for the teardrop-with-two-edges
/// case. Kept as a free function since it needs both edges before either
/// is overwritten.
fn a_and_b(contour: &Contour, corner: usize) -> Vec<crate::segment::EdgeSegment> {
    let a = contour.edges[corner].split_in_thirds();
    let b = contour.edges[1 - corner].split_in_thirds();
    a.into_iter().chain(b).collect()
}

fn is_corner(a_dir: crate::vector::Vec2, b_dir: crate::vector::Vec2, threshold: f64) -> bool {
    a_dir.dot(b_dir) <= 0.0 || crate::vector::cross(a_dir, b_dir).abs() > threshold
}

/// For position `< n`, returns -1, 0, or 1 depending on whether it is
/// closer to the start, middle, or end of the range; balanced so the sum
/// across `0..n` is zero. Lifted verbatim from msdfgen's teardrop-shape
/// colour split.
fn symmetrical_trichotomy(position: i32, n: i32) -> i32 {
    (3.0 + 2.875 * position as f32 / (n as f32 - 1.0) - 1.4375 + 0.5) as i32 - 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::EdgeColor;
    use crate::segment::EdgeSegment;
    use crate::vector::Vec2;

    fn square_shape() -> Shape {
        let p = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let mut c = Contour::new();
        for i in 0..4 {
            c.edges.push(EdgeSegment::Linear {
                p0: p[i],
                p1: p[(i + 1) % 4],
                color: EdgeColor::WHITE,
            });
        }
        Shape {
            contours: vec![c],
            inverse_y_axis: false,
        }
    }

    #[test]
    fn square_corners_get_colored() {
        let mut shape = square_shape();
        shape.color_edges(3.0, 0);
        for edge in &shape.contours[0].edges {
            assert_ne!(edge.color(), EdgeColor::BLACK);
        }
    }

    #[test]
    fn symmetrical_trichotomy_is_balanced() {
        let n = 7;
        let sum: i32 = (0..n).map(|i| symmetrical_trichotomy(i, n)).sum();
        assert_eq!(sum, 0);
    }

    #[test]
    fn normalize_splits_single_edge_contour() {
        let mut c = Contour::new();
        c.edges.push(EdgeSegment::Linear {
            p0: Vec2::new(0.0, 0.0),
            p1: Vec2::new(1.0, 0.0),
            color: EdgeColor::WHITE,
        });
        let mut shape = Shape {
            contours: vec![c],
            inverse_y_axis: false,
        };
        shape.normalize();
        assert_eq!(shape.contours[0].edges.len(), 3);
    }
}
