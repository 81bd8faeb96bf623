//! Post-generation scan-line pass: verifies the inside/outside sign of
//! every texel against a winding count derived independently from the
//! shape's edges, flipping any texel that disagrees. Sequential per row
//! because the winding counter accumulates left to right; rows are
//! otherwise independent and may run in parallel.

use crate::generator::MsdfBitmap;
use crate::parallel::for_each_chunk_mut;
use crate::shape::Shape;

/// Runs the sign-correction pass in place. `scale`/`translate`/`range`
/// must match the `GenerationConfig` used to produce `bitmap`.
pub fn correct_signs(bitmap: &mut MsdfBitmap, shape: &Shape, scale: f64, translate: (f64, f64)) {
    let width = bitmap.width;
    let height = bitmap.height;
    let inverse_y_axis = shape.inverse_y_axis;

    for_each_chunk_mut(&mut bitmap.data, width * 3, |row_out, row_data| {
        let y_pixel = if inverse_y_axis { height - 1 - row_out } else { row_out };
        let y_shape = (y_pixel as f64 + 0.5) / scale - translate.1;

        let mut intersections: Vec<(f64, i32)> = shape
            .contours
            .iter()
            .flat_map(|c| c.edges.iter())
            .flat_map(|e| e.scan_line_intersections(y_shape))
            .collect();
        intersections.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        let mut winding = 0i32;
        let mut cursor = 0usize;
        for col in 0..width {
            let x_shape = (col as f64 + 0.5) / scale - translate.0;
            while cursor < intersections.len() && intersections[cursor].0 < x_shape {
                winding += intersections[cursor].1;
                cursor += 1;
            }
            let expected_inside = winding != 0;

            let idx = col * 3;
            let median = median3(row_data[idx], row_data[idx + 1], row_data[idx + 2]);
            let actual_inside = median >= 0.5;

            if actual_inside != expected_inside {
                row_data[idx] = 1.0 - row_data[idx];
                row_data[idx + 1] = 1.0 - row_data[idx + 1];
                row_data[idx + 2] = 1.0 - row_data[idx + 2];
            }
        }
    });
}

fn median3(a: f32, b: f32, c: f32) -> f32 {
    a.min(b).max(a.max(b).min(c))
}
