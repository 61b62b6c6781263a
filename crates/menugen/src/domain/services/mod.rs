mod actions;
mod generator;
mod layout;
mod renderer;

pub use actions::*;
pub use generator::*;
pub use layout::*;
pub use renderer::*;
