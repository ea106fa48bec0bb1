//! One module per subcommand.

pub mod dashboard;
pub mod monitor;
pub mod status;
pub mod watch;
