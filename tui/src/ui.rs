mod layout;
mod widgets;

pub use layout::render;
pub use widgets::{render_favorites, render_form, render_header, render_status_bar};
