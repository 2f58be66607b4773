//! One module per subcommand.

pub mod check;
pub mod cities;
pub mod config;
pub mod list;
pub mod show;
pub mod stats;
pub mod update;
