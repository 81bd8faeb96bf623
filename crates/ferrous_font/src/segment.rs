//! Edge segments: the three shapes a contour edge can take, and the
//! closed-form operations spec.md §4.1 requires of each. Variants are a
//! closed set (linear/quadratic/cubic) so dispatch is a plain `match`,
//! never a vtable — this matters because the hot loop in `generator`
//! evaluates every edge of every contour at every pixel.

use crate::color::EdgeColor;
use crate::equation_solver::solve_cubic;
use crate::signed_distance::SignedDistance;
use crate::vector::{cross, mix, non_zero_sign, ortho_normal, safe_normalize, Vec2};

/// Axis-aligned bounding box, accumulated with `extend`.
#[derive(Clone, Copy, Debug)]
pub struct Bounds {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Bounds {
    pub fn empty() -> Self {
        Bounds {
            left: f64::INFINITY,
            bottom: f64::INFINITY,
            right: f64::NEG_INFINITY,
            top: f64::NEG_INFINITY,
        }
    }

    pub fn extend_point(&mut self, p: Vec2) {
        self.left = self.left.min(p.x);
        self.right = self.right.max(p.x);
        self.bottom = self.bottom.min(p.y);
        self.top = self.top.max(p.y);
    }

    pub fn extend(&mut self, other: Bounds) {
        self.left = self.left.min(other.left);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.min(other.bottom);
        self.top = self.top.max(other.top);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeSegment {
    Linear {
        p0: Vec2,
        p1: Vec2,
        color: EdgeColor,
    },
    Quadratic {
        p0: Vec2,
        control: Vec2,
        p1: Vec2,
        color: EdgeColor,
    },
    Cubic {
        p0: Vec2,
        control0: Vec2,
        control1: Vec2,
        p1: Vec2,
        color: EdgeColor,
    },
}

impl EdgeSegment {
    pub fn color(&self) -> EdgeColor {
        match *self {
            EdgeSegment::Linear { color, .. } => color,
            EdgeSegment::Quadratic { color, .. } => color,
            EdgeSegment::Cubic { color, .. } => color,
        }
    }

    pub fn set_color(&mut self, c: EdgeColor) {
        match self {
            EdgeSegment::Linear { color, .. } => *color = c,
            EdgeSegment::Quadratic { color, .. } => *color = c,
            EdgeSegment::Cubic { color, .. } => *color = c,
        }
    }

    pub fn start_point(&self) -> Vec2 {
        match *self {
            EdgeSegment::Linear { p0, .. } => p0,
            EdgeSegment::Quadratic { p0, .. } => p0,
            EdgeSegment::Cubic { p0, .. } => p0,
        }
    }

    pub fn end_point(&self) -> Vec2 {
        match *self {
            EdgeSegment::Linear { p1, .. } => p1,
            EdgeSegment::Quadratic { p1, .. } => p1,
            EdgeSegment::Cubic { p1, .. } => p1,
        }
    }

    pub fn point(&self, t: f64) -> Vec2 {
        match *self {
            EdgeSegment::Linear { p0, p1, .. } => mix(p0, p1, t),
            EdgeSegment::Quadratic { p0, control, p1, .. } => {
                let a = mix(p0, control, t);
                let b = mix(control, p1, t);
                mix(a, b, t)
            }
            EdgeSegment::Cubic {
                p0,
                control0,
                control1,
                p1,
                ..
            } => {
                let p01 = mix(p0, control0, t);
                let p12 = mix(control0, control1, t);
                let p23 = mix(control1, p1, t);
                let a = mix(p01, p12, t);
                let b = mix(p12, p23, t);
                mix(a, b, t)
            }
        }
    }

    /// Non-normalised tangent at `t`.
    pub fn direction(&self, t: f64) -> Vec2 {
        match *self {
            EdgeSegment::Linear { p0, p1, .. } => p1 - p0,
            EdgeSegment::Quadratic { p0, control, p1, .. } => mix(control - p0, p1 - control, t),
            EdgeSegment::Cubic {
                p0,
                control0,
                control1,
                p1,
                ..
            } => {
                let tangent = mix(
                    mix(control0 - p0, control1 - control0, t),
                    mix(control1 - control0, p1 - control1, t),
                    t,
                );
                if tangent == Vec2::ZERO {
                    if t == 0.0 {
                        return control1 - p0;
                    }
                    if t == 1.0 {
                        return p1 - control0;
                    }
                }
                tangent
            }
        }
    }

    /// Closest signed distance from `origin`, and the parameter at which
    /// it is attained (may lie outside `[0, 1]`).
    pub fn signed_distance(&self, origin: Vec2) -> (SignedDistance, f64) {
        match *self {
            EdgeSegment::Linear { p0, p1, .. } => linear_signed_distance(p0, p1, origin),
            EdgeSegment::Quadratic { p0, control, p1, .. } => {
                quadratic_signed_distance(p0, control, p1, origin)
            }
            EdgeSegment::Cubic {
                p0,
                control0,
                control1,
                p1,
                ..
            } => cubic_signed_distance(p0, control0, control1, p1, origin),
        }
    }

    /// Replaces `distance` with the perpendicular distance to the tangent
    /// line at the nearer endpoint when `param` falls outside `[0, 1]`
    /// and `origin` lies in that tangent's forward half-plane. This is
    /// what keeps the field continuous across shared endpoints (spec §4.1,
    /// §4.4 "near edge" substitution).
    pub fn distance_to_perpendicular(
        &self,
        mut distance: SignedDistance,
        origin: Vec2,
        param: f64,
    ) -> SignedDistance {
        if param < 0.0 {
            let dir = safe_normalize(self.direction(0.0));
            let aq = origin - self.point(0.0);
            if dir.dot(aq) < 0.0 {
                let pseudo = cross(aq, dir);
                if pseudo.abs() <= distance.distance.abs() {
                    distance.distance = pseudo;
                    distance.orthogonality = 0.0;
                }
            }
        } else if param > 1.0 {
            let dir = safe_normalize(self.direction(1.0));
            let aq = origin - self.point(1.0);
            if dir.dot(aq) > 0.0 {
                let pseudo = cross(aq, dir);
                if pseudo.abs() <= distance.distance.abs() {
                    distance.distance = pseudo;
                    distance.orthogonality = 0.0;
                }
            }
        }
        distance
    }

    pub fn split_in_thirds(&self) -> [EdgeSegment; 3] {
        match *self {
            EdgeSegment::Linear { p0, p1, color } => [
                EdgeSegment::Linear {
                    p0,
                    p1: mix(p0, p1, 1.0 / 3.0),
                    color,
                },
                EdgeSegment::Linear {
                    p0: mix(p0, p1, 1.0 / 3.0),
                    p1: mix(p0, p1, 2.0 / 3.0),
                    color,
                },
                EdgeSegment::Linear {
                    p0: mix(p0, p1, 2.0 / 3.0),
                    p1,
                    color,
                },
            ],
            EdgeSegment::Quadratic { p0, control, p1, color } => [
                EdgeSegment::Quadratic {
                    p0,
                    control: mix(p0, control, 1.0 / 3.0),
                    p1: self.point(1.0 / 3.0),
                    color,
                },
                EdgeSegment::Quadratic {
                    p0: self.point(1.0 / 3.0),
                    control: mix(
                        mix(p0, control, 5.0 / 9.0),
                        mix(control, p1, 4.0 / 9.0),
                        0.5,
                    ),
                    p1: self.point(2.0 / 3.0),
                    color,
                },
                EdgeSegment::Quadratic {
                    p0: self.point(2.0 / 3.0),
                    control: mix(control, p1, 2.0 / 3.0),
                    p1,
                    color,
                },
            ],
            EdgeSegment::Cubic {
                p0,
                control0,
                control1,
                p1,
                color,
            } => {
                let p0_c0_third = if p0 == control0 {
                    p0
                } else {
                    mix(p0, control0, 1.0 / 3.0)
                };
                let c1_p1_two_third = if control1 == p1 {
                    p1
                } else {
                    mix(control1, p1, 2.0 / 3.0)
                };
                [
                    EdgeSegment::Cubic {
                        p0,
                        control0: p0_c0_third,
                        control1: mix(mix(p0, control0, 1.0 / 3.0), mix(control0, control1, 1.0 / 3.0), 1.0 / 3.0),
                        p1: self.point(1.0 / 3.0),
                        color,
                    },
                    EdgeSegment::Cubic {
                        p0: self.point(1.0 / 3.0),
                        control0: mix(
                            mix(mix(p0, control0, 1.0 / 3.0), mix(control0, control1, 1.0 / 3.0), 1.0 / 3.0),
                            mix(mix(control0, control1, 1.0 / 3.0), mix(control1, p1, 1.0 / 3.0), 1.0 / 3.0),
                            2.0 / 3.0,
                        ),
                        control1: mix(
                            mix(mix(p0, control0, 2.0 / 3.0), mix(control0, control1, 2.0 / 3.0), 2.0 / 3.0),
                            mix(mix(control0, control1, 2.0 / 3.0), mix(control1, p1, 2.0 / 3.0), 2.0 / 3.0),
                            1.0 / 3.0,
                        ),
                        p1: self.point(2.0 / 3.0),
                        color,
                    },
                    EdgeSegment::Cubic {
                        p0: self.point(2.0 / 3.0),
                        control0: mix(mix(control0, control1, 2.0 / 3.0), mix(control1, p1, 2.0 / 3.0), 2.0 / 3.0),
                        control1: c1_p1_two_third,
                        p1,
                        color,
                    },
                ]
            }
        }
    }

    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::empty();
        match *self {
            EdgeSegment::Linear { p0, p1, .. } => {
                b.extend_point(p0);
                b.extend_point(p1);
            }
            EdgeSegment::Quadratic { p0, control, p1, .. } => {
                b.extend_point(p0);
                b.extend_point(p1);
                // Extremum of the quadratic per axis: derivative zero at
                // t = (p0 - control) / (p0 - 2*control + p1).
                let denom = p0 - 2.0 * control + p1;
                for axis in [0usize, 1usize] {
                    let denom_c = if axis == 0 { denom.x } else { denom.y };
                    if denom_c.abs() > 1e-14 {
                        let num = if axis == 0 {
                            p0.x - control.x
                        } else {
                            p0.y - control.y
                        };
                        let t = num / denom_c;
                        if t > 0.0 && t < 1.0 {
                            b.extend_point(self.point(t));
                        }
                    }
                }
            }
            EdgeSegment::Cubic {
                p0,
                control0,
                control1,
                p1,
                ..
            } => {
                b.extend_point(p0);
                b.extend_point(p1);
                let a0 = control0 - p0;
                let a1 = 2.0 * (control1 - control0 - a0);
                let a2 = p1 - 3.0 * control1 + 3.0 * control0 - p0;
                for axis in [0usize, 1usize] {
                    let (aa, bb, cc) = if axis == 0 {
                        (a2.x, a1.x, a0.x)
                    } else {
                        (a2.y, a1.y, a0.y)
                    };
                    let (n, roots) = crate::equation_solver::solve_quadratic(aa, bb, cc);
                    for &t in &roots[..n] {
                        if t > 0.0 && t < 1.0 {
                            b.extend_point(self.point(t));
                        }
                    }
                }
            }
        }
        b
    }

    pub fn reverse(&self) -> EdgeSegment {
        match *self {
            EdgeSegment::Linear { p0, p1, color } => EdgeSegment::Linear { p0: p1, p1: p0, color },
            EdgeSegment::Quadratic { p0, control, p1, color } => EdgeSegment::Quadratic {
                p0: p1,
                control,
                p1: p0,
                color,
            },
            EdgeSegment::Cubic {
                p0,
                control0,
                control1,
                p1,
                color,
            } => EdgeSegment::Cubic {
                p0: p1,
                control0: control1,
                control1: control0,
                p1: p0,
                color,
            },
        }
    }

    /// Intersections of the infinite horizontal line `y` with this edge,
    /// as `(x, direction)` pairs where `direction` is +1 if the edge
    /// crosses upward through `y` and -1 downward. Used by sign
    /// correction's scan-line winding pass.
    pub fn scan_line_intersections(&self, y: f64) -> Vec<(f64, i32)> {
        match *self {
            EdgeSegment::Linear { p0, p1, .. } => {
                linear_scan_intersections(p0, p1, y)
            }
            EdgeSegment::Quadratic { p0, control, p1, .. } => {
                let a = p0.y - 2.0 * control.y + p1.y;
                let b = 2.0 * (control.y - p0.y);
                let c = p0.y - y;
                let (n, roots) = crate::equation_solver::solve_quadratic(a, b, c);
                let mut out = Vec::new();
                for &t in &roots[..n] {
                    if (0.0..=1.0).contains(&t) {
                        let x = self.point(t).x;
                        let dir = non_zero_sign(self.direction(t).y) as i32;
                        out.push((x, dir));
                    }
                }
                out
            }
            EdgeSegment::Cubic { .. } => {
                // After boolean every edge is linear; cubic scan-line
                // intersection is only needed pre-boolean, where sign
                // correction never runs. Solve via the cubic in y.
                if let EdgeSegment::Cubic {
                    p0,
                    control0,
                    control1,
                    p1,
                    ..
                } = *self
                {
                    let a0 = control0.y - p0.y;
                    let a1 = control1.y - control0.y - a0;
                    let a2 = (p1.y - control1.y) - (control1.y - control0.y) - a1;
                    let (n, roots) = solve_cubic(a2, 3.0 * a1, 3.0 * a0, p0.y - y);
                    let mut out = Vec::new();
                    for &t in &roots[..n] {
                        if (0.0..=1.0).contains(&t) {
                            let x = self.point(t).x;
                            let dir = non_zero_sign(self.direction(t).y) as i32;
                            out.push((x, dir));
                        }
                    }
                    out
                } else {
                    unreachable!()
                }
            }
        }
    }
}

fn linear_scan_intersections(p0: Vec2, p1: Vec2, y: f64) -> Vec<(f64, i32)> {
    if (p0.y <= y && p1.y > y) || (p1.y <= y && p0.y > y) {
        let t = (y - p0.y) / (p1.y - p0.y);
        let x = p0.x + t * (p1.x - p0.x);
        let dir = if p1.y > p0.y { 1 } else { -1 };
        vec![(x, dir)]
    } else {
        Vec::new()
    }
}

fn linear_signed_distance(p0: Vec2, p1: Vec2, origin: Vec2) -> (SignedDistance, f64) {
    let aq = origin - p0;
    let ab = p1 - p0;
    let param = aq.dot(ab) / ab.dot(ab);
    let eq = (if param > 0.5 { p1 } else { p0 }) - origin;
    let endpoint_distance = eq.length();
    if param > 0.0 && param < 1.0 {
        let ortho_distance = ortho_normal(ab, false).dot(aq);
        if ortho_distance.abs() < endpoint_distance {
            return (SignedDistance::new(ortho_distance, 0.0), param);
        }
    }
    let orthogonality = safe_normalize(ab).dot(safe_normalize(eq)).abs();
    (
        SignedDistance::new(non_zero_sign(cross(aq, ab)) * endpoint_distance, orthogonality),
        param,
    )
}

fn quadratic_signed_distance(p0: Vec2, control: Vec2, p1: Vec2, origin: Vec2) -> (SignedDistance, f64) {
    let qa = p0 - origin;
    let ab = control - p0;
    let br = p0 + p1 - control - control;
    let a = br.dot(br);
    let b = 3.0 * ab.dot(br);
    let c = 2.0 * ab.dot(ab) + qa.dot(br);
    let d = qa.dot(ab);
    let (solutions, roots) = solve_cubic(a, b, c, d);

    let mut min_distance = non_zero_sign(cross(ab, qa)) * qa.length();
    let mut param = -qa.dot(ab) / ab.dot(ab);
    {
        let diff = p1 - control;
        let to_end = p1 - origin;
        let distance = non_zero_sign(cross(diff, to_end)) * to_end.length();
        if distance.abs() < min_distance.abs() {
            min_distance = distance;
            param = (origin - control).dot(diff) / diff.dot(diff);
        }
    }
    for &t in &roots[..solutions] {
        if t > 0.0 && t < 1.0 {
            let qe = qa + 2.0 * t * ab + t * t * br;
            let distance = non_zero_sign(cross(ab + t * br, qe)) * qe.length();
            if distance.abs() <= min_distance.abs() {
                min_distance = distance;
                param = t;
            }
        }
    }

    if (0.0..=1.0).contains(&param) {
        (SignedDistance::new(min_distance, 0.0), param)
    } else if param < 0.5 {
        (
            SignedDistance::new(min_distance, safe_normalize(ab).dot(safe_normalize(qa)).abs()),
            param,
        )
    } else {
        let diff = p1 - control;
        let to_end = p1 - origin;
        (
            SignedDistance::new(min_distance, safe_normalize(diff).dot(safe_normalize(to_end)).abs()),
            param,
        )
    }
}

const CUBIC_SEARCH_STARTS: usize = 4;
const CUBIC_SEARCH_STEPS: usize = 4;

fn cubic_signed_distance(p0: Vec2, control0: Vec2, control1: Vec2, p1: Vec2, origin: Vec2) -> (SignedDistance, f64) {
    let qa = p0 - origin;
    let ab = control0 - p0;
    let br = control1 - control0 - ab;
    let as_ = (p1 - control1) - (control1 - control0) - br;

    let seg = EdgeSegment::Cubic {
        p0,
        control0,
        control1,
        p1,
        color: EdgeColor::WHITE,
    };

    let mut ep_dir = seg.direction(0.0);
    let mut min_distance = non_zero_sign(cross(ep_dir, qa)) * qa.length();
    let mut param = -qa.dot(ep_dir) / ep_dir.dot(ep_dir);
    {
        ep_dir = seg.direction(1.0);
        let to_end = p1 - origin;
        let distance = to_end.length();
        if distance < min_distance.abs() {
            min_distance = non_zero_sign(cross(ep_dir, to_end)) * distance;
            param = (ep_dir - to_end).dot(ep_dir) / ep_dir.dot(ep_dir);
        }
    }

    for i in 0..CUBIC_SEARCH_STARTS {
        let mut t = i as f64 / CUBIC_SEARCH_STARTS as f64;
        let mut qe = qa + 3.0 * t * ab + 3.0 * t * t * br + t * t * t * as_;
        for _ in 0..=CUBIC_SEARCH_STEPS {
            let d1 = 3.0 * ab + 6.0 * t * br + 3.0 * t * t * as_;
            let d2 = 6.0 * br + 6.0 * t * as_;
            t -= qe.dot(d1) / (d1.dot(d1) + qe.dot(d2));
            if !(0.0..=1.0).contains(&t) {
                break;
            }
            qe = qa + 3.0 * t * ab + 3.0 * t * t * br + t * t * t * as_;
            let distance = qe.length();
            if distance < min_distance.abs() {
                min_distance = non_zero_sign(cross(d1, qe)) * distance;
                param = t;
            }
        }
    }

    if (0.0..=1.0).contains(&param) {
        (SignedDistance::new(min_distance, 0.0), param)
    } else if param < 0.5 {
        (
            SignedDistance::new(min_distance, safe_normalize(seg.direction(0.0)).dot(safe_normalize(qa)).abs()),
            param,
        )
    } else {
        let to_end = p1 - origin;
        (
            SignedDistance::new(
                min_distance,
                safe_normalize(seg.direction(1.0)).dot(safe_normalize(to_end)).abs(),
            ),
            param,
        )
    }
}
