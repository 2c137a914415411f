//! CLI command handlers.

mod author;
mod categories;
mod download_by_id;
mod interactive;
mod search;

pub(crate) use author::run_author_command;
pub(crate) use categories::run_categories_command;
pub(crate) use download_by_id::run_download_by_id_command;
pub(crate) use interactive::run_interactive_command;
pub(crate) use search::run_search_command;
