pub mod session_guard;
pub mod role;
pub mod shell_viewmodel;

pub use session_guard::{GuardPhase, GuardSettings, ProtectedView, SessionGuard};
pub use role::{current_profile, get_role_flag};
pub use shell_viewmodel::{DashboardState, ShellRender, ShellViewModel};
