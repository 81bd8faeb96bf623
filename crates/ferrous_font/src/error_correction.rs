//! Repairs texels whose per-channel median would interpolate onto the
//! wrong side of 0.5 at render time. Runs after sign correction, directly
//! on the packed bitmap.

use crate::generator::MsdfBitmap;
use crate::parallel::for_each_mut;
use crate::shape::Shape;
use crate::vector::{cross, safe_normalize, Vec2};

const PROTECTED: u8 = 1 << 0;
const ERROR: u8 = 1 << 1;

fn median3(a: f32, b: f32, c: f32) -> f32 {
    a.min(b).max(a.max(b).min(c))
}

fn crosses(a: f32, b: f32) -> bool {
    (a - 0.5) * (b - 0.5) < 0.0
}

/// Shape-space corner points: wherever two consecutive edges in a contour
/// turn sharply enough to count as a corner under the same test
/// `Shape::color_edges` uses.
fn corner_points(shape: &Shape, threshold_rad: f64) -> Vec<Vec2> {
    let cross_threshold = threshold_rad.sin();
    let mut corners = Vec::new();
    for contour in &shape.contours {
        if contour.edges.is_empty() {
            continue;
        }
        let mut prev_dir = safe_normalize(contour.edges.last().unwrap().direction(1.0));
        for edge in &contour.edges {
            let dir = safe_normalize(edge.direction(0.0));
            if prev_dir.dot(dir) <= 0.0 || cross(prev_dir, dir).abs() > cross_threshold {
                corners.push(edge.start_point());
            }
            prev_dir = safe_normalize(edge.direction(1.0));
        }
    }
    corners
}

fn shape_to_pixel(p: Vec2, scale: f64, translate: (f64, f64), height: usize, inverse_y_axis: bool) -> Option<(usize, usize)> {
    let x = (p.x + translate.0) * scale - 0.5;
    let y_pixel_unflipped = (p.y + translate.1) * scale - 0.5;
    let y = if inverse_y_axis {
        height as f64 - 1.0 - y_pixel_unflipped
    } else {
        y_pixel_unflipped
    };
    if x < 0.0 || y < 0.0 {
        return None;
    }
    Some((x.round() as usize, y.round() as usize))
}

/// Marks every pixel within one texel of a sharp corner as protected, so
/// `find_errors` never "corrects" a genuine sharp feature into a blur.
fn protect_corners(bitmap: &MsdfBitmap, shape: &Shape, scale: f64, translate: (f64, f64), corner_angle_threshold_rad: f64, stencil: &mut [u8]) {
    for p in corner_points(shape, corner_angle_threshold_rad) {
        if let Some((cx, cy)) = shape_to_pixel(p, scale, translate, bitmap.height, shape.inverse_y_axis) {
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    let x = cx as i64 + dx;
                    let y = cy as i64 + dy;
                    if x >= 0 && y >= 0 && (x as usize) < bitmap.width && (y as usize) < bitmap.height {
                        stencil[y as usize * bitmap.width + x as usize] |= PROTECTED;
                    }
                }
            }
        }
    }
}

/// Marks pixels that sit on a natural inside/outside boundary: the
/// combined median crosses 0.5 between this pixel and a neighbour exactly
/// when the individual channels agree that it should.
fn protect_edges(bitmap: &MsdfBitmap, stencil: &mut [u8]) {
    let width = bitmap.width;
    let height = bitmap.height;
    for_each_mut(stencil, |idx, bit| {
        let x = idx % width;
        let y = idx / width;
        let [r0, g0, b0] = bitmap.pixel(x, y);
        let m0 = median3(r0, g0, b0);
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
                continue;
            }
            let [r1, g1, b1] = bitmap.pixel(nx as usize, ny as usize);
            let m1 = median3(r1, g1, b1);
            let median_crosses = crosses(m0, m1);
            let channel_crosses = crosses(r0, r1) || crosses(g0, g1) || crosses(b0, b1);
            if median_crosses == channel_crosses {
                *bit |= PROTECTED;
                break;
            }
        }
    });
}

const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

/// Flags non-protected pixels whose median crossing with a neighbour
/// disagrees with what the individual channels predict.
fn find_errors(bitmap: &MsdfBitmap, stencil: &mut [u8]) {
    let width = bitmap.width;
    let height = bitmap.height;
    for_each_mut(stencil, |idx, bit| {
        if *bit & PROTECTED != 0 {
            return;
        }
        let x = idx % width;
        let y = idx / width;
        let [r0, g0, b0] = bitmap.pixel(x, y);
        let m0 = median3(r0, g0, b0);
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
                continue;
            }
            let [r1, g1, b1] = bitmap.pixel(nx as usize, ny as usize);
            let m1 = median3(r1, g1, b1);
            let median_crosses = crosses(m0, m1);
            let channel_crosses = crosses(r0, r1) || crosses(g0, g1) || crosses(b0, b1);
            if median_crosses != channel_crosses {
                *bit |= ERROR;
                break;
            }
        }
    });
}

fn apply_correction(bitmap: &mut MsdfBitmap, stencil: &[u8]) {
    let width = bitmap.width;
    for (idx, bit) in stencil.iter().enumerate() {
        if bit & ERROR != 0 {
            let x = idx % width;
            let y = idx / width;
            let [r, g, b] = bitmap.pixel(x, y);
            let m = median3(r, g, b);
            bitmap.set_pixel(x, y, [m, m, m]);
        }
    }
}

/// Runs the full ProtectCorners -> ProtectEdges -> FindErrors ->
/// ApplyCorrection pipeline in place.
pub fn correct_errors(bitmap: &mut MsdfBitmap, shape: &Shape, scale: f64, translate: (f64, f64), corner_angle_threshold_rad: f64) {
    let mut stencil = vec![0u8; bitmap.width * bitmap.height];
    protect_corners(bitmap, shape, scale, translate, corner_angle_threshold_rad, &mut stencil);
    protect_edges(bitmap, &mut stencil);
    find_errors(bitmap, &mut stencil);
    let flagged = stencil.iter().filter(|b| *b & ERROR != 0).count();
    if flagged > 0 {
        log::debug!("error correction flagged {flagged} pixels");
    }
    apply_correction(bitmap, &stencil);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::EdgeColor;
    use crate::config::GenerationConfig;
    use crate::contour::Contour;
    use crate::generator::generate;
    use crate::segment::EdgeSegment;

    fn square_shape() -> Shape {
        let p = [
            Vec2::new(0.0, 0.0),
            Vec2::new(8.0, 0.0),
            Vec2::new(8.0, 8.0),
            Vec2::new(0.0, 8.0),
        ];
        let mut c = Contour::new();
        for i in 0..4 {
            c.edges.push(EdgeSegment::Linear {
                p0: p[i],
                p1: p[(i + 1) % 4],
                color: EdgeColor::WHITE,
            });
        }
        c.reverse();
        Shape {
            contours: vec![c],
            inverse_y_axis: false,
        }
    }

    #[test]
    fn correction_is_idempotent() {
        let shape = square_shape();
        let cfg = GenerationConfig {
            scale: 1.0,
            translate: (0.0, 0.0),
            range: 2.0,
            ..Default::default()
        };
        let mut bitmap = generate(&shape, &cfg, 8, 8);
        correct_errors(&mut bitmap, &shape, cfg.scale, cfg.translate, cfg.corner_angle_threshold_rad);
        let once = bitmap.data.clone();
        correct_errors(&mut bitmap, &shape, cfg.scale, cfg.translate, cfg.corner_angle_threshold_rad);
        assert_eq!(bitmap.data, once);
    }
}
