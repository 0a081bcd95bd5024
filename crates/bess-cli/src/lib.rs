//! Command-line surface for the battery arbitrage toolkit.

pub mod cli;
pub mod commands;
pub mod prices;
