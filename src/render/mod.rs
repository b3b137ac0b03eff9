pub mod markup;
pub mod ui;
pub mod views;

pub use markup::{roadmap_content, roadmap_markup};
pub use ui::{html_escape, Element, Node};
