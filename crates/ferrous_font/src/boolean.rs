//! Flattens `Shape` contours to polylines and runs polygon union/difference
//! over them. Sprite import builds up a shape ring by ring, accumulating
//! unions and subtracting holes immediately as they're drawn (spec.md
//! §4.7): `union` widens the accumulated shape, `difference` cuts into it,
//! and the two are never batched — later rings see the effect of earlier
//! ones. Tessellation depth for curved edges comes straight from the
//! teacher's `QuadTo` flattening loop in `font/msdf_gen.rs`, generalised to
//! cubic edges and pushed into `GenerationConfig`.

mod backend;

use crate::color::EdgeColor;
use crate::contour::Contour;
use crate::segment::EdgeSegment;
use crate::vector::Vec2;
use backend::Ring;

fn flatten_edge(edge: &EdgeSegment, steps: usize, out: &mut Vec<Vec2>) {
    match edge {
        EdgeSegment::Linear { p1, .. } => out.push(*p1),
        _ => {
            for i in 1..=steps {
                let t = i as f64 / steps as f64;
                out.push(edge.point(t));
            }
        }
    }
}

/// Rounds to `digits` decimal places. The boolean backend works in plain
/// `f64` with no notion of tolerance, so this is where spec.md §4.2's
/// "6 decimal digits of fixed precision" is actually enforced: coordinates
/// are snapped going in (so near-coincident vertices from independently
/// authored paths merge cleanly) and snapped again coming out (since the
/// backend may introduce new intersection vertices at full float precision).
fn quantize(v: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (v * scale).round() / scale
}

fn contour_to_ring(contour: &Contour, steps: usize, precision_digits: u32) -> Ring {
    let mut points = Vec::with_capacity(contour.edges.len() * steps);
    if let Some(first) = contour.edges.first() {
        points.push(first.start_point());
    }
    for edge in &contour.edges {
        flatten_edge(edge, steps, &mut points);
    }
    points
        .into_iter()
        .map(|p| [quantize(p.x, precision_digits), quantize(p.y, precision_digits)])
        .collect()
}

fn ring_to_contour(ring: &[[f64; 2]], color: EdgeColor, precision_digits: u32) -> Contour {
    let mut contour = Contour::new();
    let n = ring.len();
    if n < 2 {
        return contour;
    }
    let quantized: Vec<[f64; 2]> = ring
        .iter()
        .map(|p| [quantize(p[0], precision_digits), quantize(p[1], precision_digits)])
        .collect();
    for i in 0..n {
        let a = quantized[i];
        let b = quantized[(i + 1) % n];
        contour.edges.push(EdgeSegment::Linear {
            p0: Vec2::new(a[0], a[1]),
            p1: Vec2::new(b[0], b[1]),
            color,
        });
    }
    contour
}

/// One ring-accumulation step: either widens `accumulated` with `ring`
/// (add) or cuts `ring` out of it (subtract).
pub fn union(accumulated: &[Contour], addition: &Contour, steps: usize, precision_digits: u32) -> Vec<Contour> {
    let subject: Vec<Ring> = accumulated.iter().map(|c| contour_to_ring(c, steps, precision_digits)).collect();
    let clip = vec![contour_to_ring(addition, steps, precision_digits)];
    let mut result: Vec<Contour> = backend::union(&subject, &clip)
        .iter()
        .map(|r| ring_to_contour(r, EdgeColor::WHITE, precision_digits))
        .collect();
    normalize_winding(&mut result, true);
    result
}

pub fn difference(accumulated: &[Contour], hole: &Contour, steps: usize, precision_digits: u32) -> Vec<Contour> {
    let subject: Vec<Ring> = accumulated.iter().map(|c| contour_to_ring(c, steps, precision_digits)).collect();
    let clip = vec![contour_to_ring(hole, steps, precision_digits)];
    let mut result: Vec<Contour> = backend::difference(&subject, &clip)
        .iter()
        .map(|r| ring_to_contour(r, EdgeColor::WHITE, precision_digits))
        .collect();
    normalize_winding(&mut result, true);
    result
}

/// The final "union + normalize + colour" pass sprite import applies once
/// after all add/subtract paths have been accumulated (spec.md §4.2):
/// resolves overlaps among the raw, independently-drawn add contours with
/// no second operand.
pub fn resolve_self_overlaps(contours: &[Contour], steps: usize, precision_digits: u32) -> Vec<Contour> {
    if contours.is_empty() {
        return Vec::new();
    }
    let subject: Vec<Ring> = contours.iter().map(|c| contour_to_ring(c, steps, precision_digits)).collect();
    let mut result: Vec<Contour> = backend::union(&subject, &[])
        .iter()
        .map(|r| ring_to_contour(r, EdgeColor::WHITE, precision_digits))
        .collect();
    normalize_winding(&mut result, true);
    result
}

/// Ensures every contour's signed area matches `positive` (true = CW,
/// the generator's convention), reversing edge order where it doesn't.
/// The boolean backend's output winding isn't guaranteed to match, so
/// every boolean op normalises its own result before returning it.
pub fn normalize_winding(contours: &mut [Contour], positive: bool) {
    for contour in contours {
        let winding = contour.winding();
        if (winding > 0) != positive && winding != 0 {
            contour.reverse();
        }
    }
}
