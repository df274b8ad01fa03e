pub mod user;
pub mod section;

pub use user::UserProfile;
pub use section::DashboardSection;
