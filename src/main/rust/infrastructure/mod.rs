pub mod metrics;
pub mod network;
pub mod process;
