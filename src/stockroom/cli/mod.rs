//! # CLI Behavior
//!
//! This is **one possible UI client** for stockroom, not the application
//! itself. It is the only place that knows about terminal I/O, prompts, exit
//! codes and output formatting.
//!
//! ## Session Model
//!
//! Every invocation is a short session: load the data file, run one command,
//! and save again if the command changed the catalog (`add`, `update`,
//! `delete`, `sort`, `clear`). Running `stockroom` with no arguments lists
//! the catalog.
//!
//! ## Where the Data Lives
//!
//! The data file is chosen in this order: `--data`, `STOCKROOM_DATA`, the
//! `data-file` config key, then `inventory_data/inventory.json`. Config is
//! read from `./.stockroom/config.json` when that directory exists, otherwise
//! from the per-user config directory.
//!
//! ## Prompts
//!
//! Adding a name that already exists asks whether to merge quantities unless
//! `--merge`/`--no-merge` or the `merge` config key decides. `delete` and
//! `clear` ask for confirmation unless `--yes` is given. A declined prompt is
//! not an error.
//!
//! ## Module Structure
//!
//! - `commands`: Context wiring and per-command handlers
//! - `print`: Tables and colored messages
//! - `setup`: Argument parsing via clap

mod commands;
mod print;
pub mod setup;

pub use commands::run;
