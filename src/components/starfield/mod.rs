//! Decorative night sky drawn behind every page.

mod component;
mod render;
mod state;

pub use component::StarfieldCanvas;
