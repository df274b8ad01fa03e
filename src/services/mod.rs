pub mod session_store;
pub mod browser_store;
#[cfg(test)]
pub mod memory_store;
pub mod navigator;
pub mod auth_service;

pub use session_store::{SessionError, SessionStore, SessionWriter, StorageChange, Subscription};
pub use browser_store::BrowserSessionStore;
pub use navigator::{BrowserNavigator, Navigator};
pub use auth_service::*;
