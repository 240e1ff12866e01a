//! CLI subcommands.

pub mod compose;
pub mod inspect;
pub mod run;
