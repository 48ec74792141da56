// Handlers for each CLI subcommand. main.rs parses arguments and dispatches
// here; the handlers own data loading and rendering.

pub mod buildings;
pub mod route;
pub mod script;
