//! Campus paths CLI library.
//!
//! Rendering helpers shared by the `campuspaths-cli` subcommands. Kept in a
//! library target so the formatting can be unit tested without spawning the
//! binary.

pub mod output;
