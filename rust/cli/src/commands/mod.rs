//! Command handlers, one module per subcommand.
//!
//! Each handler takes its parsed arguments plus the output streams
//! (`&mut dyn Write`) and returns `Result<(), CliError>`; [`crate::run`]
//! turns the error into a message and an exit code.

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use sim::{handle_sim_command, SimArgs};
