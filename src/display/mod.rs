mod render;
mod state;

pub use render::{RenderedEntry, Renderer};
pub use state::DisplayState;
