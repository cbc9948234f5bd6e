//! Presentation layer
//!
//! View model, panel layout and tiny-skia rendering of the form page.

pub mod blob;
pub mod layout;
pub mod renderer;
pub mod text;
pub mod view;

pub use blob::{BlobStyle, render_blob};
pub use renderer::{PanelRenderer, RendererError};
pub use view::FormView;
