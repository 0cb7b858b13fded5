//! Command handlers, one module per top-level subcommand.

pub mod config_cmd;
pub mod device;
pub mod group;
pub mod tuning;
