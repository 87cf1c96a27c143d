//! HTTP gateway for the Burrow URL shortener.
//!
//! Exposes the create and resolve flows of [`burrow_shortener`] over axum,
//! together with the configuration and tracing setup of the `gateway` binary.

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use cli::Cli;
pub use error::{AppError, StatusPolicy};
pub use state::AppState;
