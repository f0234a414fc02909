mod command_builder;
mod process_launcher;

pub use command_builder::{CommandBuilder, DEFAULT_RELAY_PROGRAM};
pub use process_launcher::{ChildRelay, ProcessLauncher};
