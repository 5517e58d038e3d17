pub mod dashboard;

pub use dashboard::{DashboardScreen, ScreenAction};
