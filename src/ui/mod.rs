pub mod cards;
pub mod format;

pub use cards::{render_dashboard, render_detail};
