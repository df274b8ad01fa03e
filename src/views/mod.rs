pub mod checking;
pub mod dashboard;
pub mod shared;

pub use checking::render_checking;
pub use dashboard::{render_dashboard, DashboardContext};
