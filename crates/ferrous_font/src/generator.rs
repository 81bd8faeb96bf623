//! The distance field generator: per-pixel, per-contour distance
//! selection, winding-aware combination across contours, and output
//! packing. The largest and most performance-sensitive module in the
//! crate — tens of millions of edge evaluations for a small glyph.

use crate::color::EdgeColor;
use crate::config::GenerationConfig;
use crate::contour::Contour;
use crate::parallel::for_each_chunk_mut;
use crate::segment::EdgeSegment;
use crate::shape::Shape;
use crate::signed_distance::SignedDistance;
use crate::vector::{cross, non_zero_sign, ortho_normal, safe_normalize, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MultiDistance {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl MultiDistance {
    pub fn median(&self) -> f64 {
        median3(self.r, self.g, self.b)
    }
}

fn median3(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).max(a.max(b).min(c))
}

#[derive(Debug)]
pub struct MsdfBitmap {
    pub width: usize,
    pub height: usize,
    /// Row-major, 3 floats (R, G, B) per pixel, each in [0, 1].
    pub data: Vec<f32>,
}

impl MsdfBitmap {
    fn filled(width: usize, height: usize, rgb: [f32; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        MsdfBitmap { width, height, data }
    }

    pub fn pixel(&self, x: usize, y: usize) -> [f32; 3] {
        let idx = (y * self.width + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    pub(crate) fn set_pixel(&mut self, x: usize, y: usize, rgb: [f32; 3]) {
        let idx = (y * self.width + x) * 3;
        self.data[idx..idx + 3].copy_from_slice(&rgb);
    }

    /// Flat RGBA8 buffer, A = 255 constant, matching the runtime format
    /// expected by `ferrous_assets`'s atlas packer.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width * self.height * 4);
        for chunk in self.data.chunks_exact(3) {
            out.push((chunk[0].clamp(0.0, 1.0) * 255.0).round() as u8);
            out.push((chunk[1].clamp(0.0, 1.0) * 255.0).round() as u8);
            out.push((chunk[2].clamp(0.0, 1.0) * 255.0).round() as u8);
            out.push(255);
        }
        out
    }
}

/// A `Linear` edge's endpoints, vector, and derived quantities computed
/// once before the pixel loop, so the inner loop never recomputes them or
/// dispatches through anything but a plain field read. Non-linear edges
/// (only reachable if a caller generates before running the boolean
/// stage) fall back to the generic `EdgeSegment` path.
struct PreparedEdge {
    segment: EdgeSegment,
    color: EdgeColor,
    p0: Vec2,
    ab: Vec2,
    inv_len_sq: f64,
    dir: Vec2,
    ortho: Vec2,
}

impl PreparedEdge {
    fn new(segment: EdgeSegment) -> Self {
        let color = segment.color();
        if let EdgeSegment::Linear { p0, p1, .. } = segment {
            let ab = p1 - p0;
            let len_sq = ab.dot(ab);
            PreparedEdge {
                segment,
                color,
                p0,
                ab,
                inv_len_sq: if len_sq > 0.0 { 1.0 / len_sq } else { 0.0 },
                dir: safe_normalize(ab),
                ortho: ortho_normal(ab, false),
            }
        } else {
            PreparedEdge {
                segment,
                color,
                p0: segment.start_point(),
                ab: Vec2::ZERO,
                inv_len_sq: 0.0,
                dir: Vec2::ZERO,
                ortho: Vec2::ZERO,
            }
        }
    }

    fn signed_distance(&self, p: Vec2) -> (SignedDistance, f64) {
        match self.segment {
            EdgeSegment::Linear { p1, .. } => {
                let aq = p - self.p0;
                let param = aq.dot(self.ab) * self.inv_len_sq;
                let eq = (if param > 0.5 { p1 } else { self.p0 }) - p;
                let endpoint_distance = eq.length();
                if param > 0.0 && param < 1.0 {
                    let ortho_distance = self.ortho.dot(aq);
                    if ortho_distance.abs() < endpoint_distance {
                        return (SignedDistance::new(ortho_distance, 0.0), param);
                    }
                }
                let orthogonality = self.dir.dot(safe_normalize(eq)).abs();
                (
                    SignedDistance::new(non_zero_sign(cross(aq, self.ab)) * endpoint_distance, orthogonality),
                    param,
                )
            }
            _ => self.segment.signed_distance(p),
        }
    }

    fn distance_to_perpendicular(&self, sd: SignedDistance, p: Vec2, t: f64) -> SignedDistance {
        self.segment.distance_to_perpendicular(sd, p, t)
    }
}

struct PreparedContour {
    edges: Vec<PreparedEdge>,
    winding: i32,
}

fn prepare(shape: &Shape) -> Vec<PreparedContour> {
    shape
        .contours
        .iter()
        .map(|c: &Contour| PreparedContour {
            winding: c.winding(),
            edges: c.edges.iter().map(|e| PreparedEdge::new(*e)).collect(),
        })
        .collect()
}

/// Evaluates every edge of one contour against `p`, keeping the closest
/// candidate per channel (applying the near-edge perpendicular
/// substitution per edge before comparing).
fn contour_multi_distance(contour: &PreparedContour, p: Vec2) -> MultiDistance {
    let mut r = SignedDistance::INFINITE;
    let mut g = SignedDistance::INFINITE;
    let mut b = SignedDistance::INFINITE;
    for edge in &contour.edges {
        let (sd, t) = edge.signed_distance(p);
        let adjusted = edge.distance_to_perpendicular(sd, p, t);
        if edge.color.has_red() && adjusted.is_closer_than(&r) {
            r = adjusted;
        }
        if edge.color.has_green() && adjusted.is_closer_than(&g) {
            g = adjusted;
        }
        if edge.color.has_blue() && adjusted.is_closer_than(&b) {
            b = adjusted;
        }
    }
    MultiDistance {
        r: r.distance,
        g: g.distance,
        b: b.distance,
    }
}

fn combine_contours(contours: &[PreparedContour], p: Vec2) -> MultiDistance {
    let mut found_inner = false;
    let mut max_inner = MultiDistance::default();
    let mut found_outer = false;
    let mut min_outer = MultiDistance::default();
    let mut fallback = MultiDistance::default();
    let mut fallback_abs_median = -1.0f64;

    for contour in contours {
        let md = contour_multi_distance(contour, p);
        let median = md.median();

        if median.abs() > fallback_abs_median {
            fallback_abs_median = median.abs();
            fallback = md;
        }

        let is_inner = (median >= 0.0 && contour.winding > 0) || (median < 0.0 && contour.winding < 0);
        if is_inner {
            if !found_inner || median > max_inner.median() {
                max_inner = md;
                found_inner = true;
            }
        } else if !found_outer || median < min_outer.median() {
            min_outer = md;
            found_outer = true;
        }
    }

    if found_inner {
        max_inner
    } else if found_outer {
        min_outer
    } else {
        fallback
    }
}

fn pack(value: f64, range: f64) -> f32 {
    ((value / range + 0.5).clamp(0.0, 1.0)) as f32
}

/// Generates an MSDF bitmap for a fully prepared shape (post boolean,
/// normalize, and colour passes). `width`/`height` are the output bitmap
/// dimensions in pixels.
pub fn generate(shape: &Shape, config: &GenerationConfig, width: usize, height: usize) -> MsdfBitmap {
    if shape.contours.is_empty() {
        log::warn!("generating an MSDF for an empty shape; returning a background bitmap");
        return MsdfBitmap::filled(width, height, [pack(-config.range, config.range); 3]);
    }

    log::debug!(
        "generating {}x{} MSDF over {} contours",
        width,
        height,
        shape.contours.len()
    );

    let prepared = prepare(shape);
    let mut bitmap = MsdfBitmap::filled(width, height, [0.0; 3]);
    let inverse_y_axis = shape.inverse_y_axis;
    let scale = config.scale;
    let (tx, ty) = config.translate;
    let range = config.range;

    for_each_chunk_mut(&mut bitmap.data, width * 3, |row_out, row_data| {
        let y_pixel = if inverse_y_axis { height - 1 - row_out } else { row_out };
        for col in 0..width {
            let p = Vec2::new(
                (col as f64 + 0.5) / scale - tx,
                (y_pixel as f64 + 0.5) / scale - ty,
            );
            let md = combine_contours(&prepared, p);
            row_data[col * 3] = pack(md.r, range);
            row_data[col * 3 + 1] = pack(md.g, range);
            row_data[col * 3 + 2] = pack(md.b, range);
        }
    });

    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::EdgeColor;
    use crate::contour::Contour;

    fn unit_square_shape() -> Shape {
        let p = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        let mut c = Contour::new();
        for i in 0..4 {
            c.edges.push(EdgeSegment::Linear {
                p0: p[i],
                p1: p[(i + 1) % 4],
                color: EdgeColor::WHITE,
            });
        }
        // Traversed in this order the contour is CCW, i.e. winding -1 in
        // this generator's CW-positive convention. Reverse so the square
        // is an "inner" (winding > 0) region as generation expects.
        c.reverse();
        Shape {
            contours: vec![c],
            inverse_y_axis: false,
        }
    }

    #[test]
    fn center_of_square_is_inside() {
        let shape = unit_square_shape();
        let cfg = GenerationConfig {
            scale: 1.0,
            translate: (0.0, 0.0),
            range: 2.0,
            ..Default::default()
        };
        let bitmap = generate(&shape, &cfg, 4, 4);
        let [r, g, b] = bitmap.pixel(2, 2);
        assert!(r > 0.5 || g > 0.5 || b > 0.5, "expected inside pixel to read >0.5 on some channel, got {r} {g} {b}");
    }

    #[test]
    fn far_outside_is_background() {
        let shape = unit_square_shape();
        let cfg = GenerationConfig {
            scale: 0.1,
            translate: (-50.0, -50.0),
            range: 2.0,
            ..Default::default()
        };
        let bitmap = generate(&shape, &cfg, 2, 2);
        let [r, g, b] = bitmap.pixel(0, 0);
        assert!(r < 0.5 && g < 0.5 && b < 0.5);
    }

    #[test]
    fn empty_shape_yields_background_bitmap() {
        let shape = Shape {
            contours: vec![],
            inverse_y_axis: false,
        };
        let cfg = GenerationConfig::default();
        let bitmap = generate(&shape, &cfg, 2, 2);
        let [r, g, b] = bitmap.pixel(0, 0);
        assert!(r < 0.5 && g < 0.5 && b < 0.5);
    }

    #[test]
    fn median3_matches_sorted_middle() {
        assert_eq!(median3(1.0, 2.0, 3.0), 2.0);
        assert_eq!(median3(3.0, 1.0, 2.0), 2.0);
        assert_eq!(median3(-1.0, -5.0, 0.0), -1.0);
    }
}
