//! UI layer for desktop GUI: app shell, map panel, and widgets.

pub mod app;
pub mod map;
pub mod widgets;

pub use app::{DesktopGuiApp, APP_TITLE};
