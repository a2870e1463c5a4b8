//! A message drawn as a constellation: one star per sentence, joined in
//! reading order.

mod component;
mod layout;
mod render;
pub mod rng;
pub mod scale;
mod state;
mod types;

pub use component::{ConstellationCanvas, RevealPolicy};
pub use layout::generate_constellation;
pub use state::InteractionMode;
