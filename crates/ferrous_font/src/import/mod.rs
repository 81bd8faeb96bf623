//! Shape import adapters: the two ways a `Shape` enters the pipeline.

pub mod font;
pub mod sprite;
