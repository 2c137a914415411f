//! Application runtime composition modules.

pub(crate) mod command_dispatcher;
pub(crate) mod config_manager;
pub(crate) mod context;
pub(crate) mod download_orchestrator;
pub(crate) mod exit_handler;
pub(crate) mod progress_manager;
pub(crate) mod prompt;
pub(crate) mod terminal;
#[cfg(test)]
pub(crate) mod test_support;
