mod cli;
mod command;

pub use cli::*;
pub use command::*;
