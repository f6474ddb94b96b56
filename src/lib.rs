pub mod commitment;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod odds;
pub mod snapshot;
pub mod state;
