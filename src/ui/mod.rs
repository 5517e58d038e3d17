pub mod components;
pub mod screens;
pub mod styles;
pub mod terminal;

pub use screens::{DashboardScreen, ScreenAction};
pub use terminal::DashboardTerminal;
