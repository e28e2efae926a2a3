//! Subcommand argument definitions and handlers.

pub mod derive;
pub mod vesting;
pub mod wallet;
