//! Viewer UI panels and drawing.

pub mod canvas;
pub mod colors;
pub mod side_panel;
pub mod top_bar;

pub use canvas::render_canvas;
pub use side_panel::render_side_panel;
pub use top_bar::render_top_bar;
