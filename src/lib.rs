// Crate root library declaration and module exports.
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod model;
pub mod render;
pub mod store;

#[cfg(feature = "tui")]
pub mod tui;
