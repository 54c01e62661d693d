// Console surface: prompts, report rendering and the row viewer
// Author: Gabriel Demetrios Lafis

mod prompt;
mod render;
mod session;
mod viewer;

pub use prompt::*;
pub use render::*;
pub use session::*;
pub use viewer::*;

/// Separator printed between report sections
pub const SEPARATOR: &str = "----------------------------------------";
