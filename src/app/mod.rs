pub mod bootstrap;
pub mod controller;
pub mod dashboard;
pub mod report;
pub mod runtime;
pub mod state;

pub use controller::AppController;
pub use dashboard::{Completion, Dashboard, DashboardView, FetchCommand, Phase};
pub use runtime::FetchRuntime;
pub use state::{Generation, RequestSlot, RequestState};
