//! CLI library components for LitNet.

pub mod filter_args;
pub mod logging;
