//! CLI commands for scoresplit

pub mod allocate;
pub mod config;
pub mod dispatch;
pub mod export;
pub mod preview;
