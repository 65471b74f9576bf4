//! Server core (C7): OSC transport, command dispatch, config loading, the
//! tick driver, and graceful shutdown (spec.md §4.7, §6).

pub mod commands;
pub mod config;
pub mod error;
pub mod server;
pub mod state;
pub mod transport;

pub use config::HibikidoConfig;
pub use error::ServerError;
pub use state::ServerState;
