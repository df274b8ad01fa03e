pub mod header;
pub mod sidebar;

pub use header::render_header;
pub use sidebar::render_sidebar;
