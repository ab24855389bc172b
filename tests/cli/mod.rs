pub mod config;
pub mod export;
pub mod logging;
pub mod preview;
pub mod support;
