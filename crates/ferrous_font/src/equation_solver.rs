//! Closed-form root finders for the quadratic and cubic signed-distance
//! formulas used by `segment`. These are the standard textbook solutions
//! (quadratic formula, Cardano's trigonometric method for three real
//! roots) — nothing project-specific lives here.

const PI: f64 = std::f64::consts::PI;

#[inline]
pub fn fabs(v: f64) -> f64 {
    v.abs()
}

/// Solves `a*t^2 + b*t + c = 0`. Returns the number of real roots (0, 1,
/// or 2) and fills the leading entries of the output array.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> (usize, [f64; 2]) {
    let mut out = [0.0; 2];
    if fabs(a) < 1e-14 {
        if fabs(b) < 1e-14 {
            return (0, out);
        }
        out[0] = -c / b;
        return (1, out);
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant > 0.0 {
        let sqrt_d = discriminant.sqrt();
        out[0] = (-b + sqrt_d) / (2.0 * a);
        out[1] = (-b - sqrt_d) / (2.0 * a);
        (2, out)
    } else if discriminant == 0.0 {
        out[0] = -b / (2.0 * a);
        (1, out)
    } else {
        (0, out)
    }
}

/// Solves the depressed-normalised cubic `t^3 + a*t^2 + b*t + c = 0`.
fn solve_cubic_normed(a: f64, b: f64, c: f64) -> (usize, [f64; 3]) {
    let mut out = [0.0; 3];
    let a2 = a * a;
    let q = (a2 - 3.0 * b) / 9.0;
    let r = (a * (2.0 * a2 - 9.0 * b) + 27.0 * c) / 54.0;
    let r2 = r * r;
    let q3 = q * q * q;
    let a_third = a / 3.0;

    if r2 < q3 {
        let mut t = r / q3.sqrt();
        t = t.clamp(-1.0, 1.0);
        t = t.acos();
        let scale = -2.0 * q.sqrt();
        out[0] = scale * (t / 3.0).cos() - a_third;
        out[1] = scale * ((t + 2.0 * PI) / 3.0).cos() - a_third;
        out[2] = scale * ((t - 2.0 * PI) / 3.0).cos() - a_third;
        (3, out)
    } else {
        let sign = if r < 0.0 { 1.0 } else { -1.0 };
        let u = sign * (fabs(r) + (r2 - q3).sqrt()).powf(1.0 / 3.0);
        let v = if u == 0.0 { 0.0 } else { q / u };
        out[0] = (u + v) - a_third;
        if u == v || fabs(u - v) < 1e-12 * fabs(u + v) {
            out[1] = -0.5 * (u + v) - a_third;
            (2, out)
        } else {
            (1, out)
        }
    }
}

/// Solves `a*t^3 + b*t^2 + c*t + d = 0`, falling back to the quadratic
/// solver when `a` is (numerically) zero.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> (usize, [f64; 3]) {
    if fabs(a) < 1e-14 {
        let (n, roots) = solve_quadratic(b, c, d);
        return (n, [roots[0], roots[1], 0.0]);
    }
    solve_cubic_normed(b / a, c / a, d / a)
}
