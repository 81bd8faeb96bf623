//! The only place `i_overlay` types are named. Everything above this
//! module speaks plain `Vec<Vec<[f64; 2]>>` polygon rings; if a future
//! `i_overlay` release changes its builder surface, only this file
//! should need to change.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay::ShapeType;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::overlay::FloatOverlay;

pub type Ring = Vec<[f64; 2]>;

fn run(subject: &[Ring], clip: &[Ring], rule: OverlayRule) -> Vec<Ring> {
    let mut overlay = FloatOverlay::new();
    for ring in subject {
        overlay.add_path(ring.clone(), ShapeType::Subject);
    }
    for ring in clip {
        overlay.add_path(ring.clone(), ShapeType::Clip);
    }
    overlay
        .overlay(rule, FillRule::NonZero)
        .into_iter()
        .flatten()
        .collect()
}

pub fn union(subject: &[Ring], clip: &[Ring]) -> Vec<Ring> {
    run(subject, clip, OverlayRule::Union)
}

pub fn difference(subject: &[Ring], clip: &[Ring]) -> Vec<Ring> {
    run(subject, clip, OverlayRule::Difference)
}
