//! HTTP API module for the salary engine.
//!
//! This module exposes department calculation runs and stored result rows
//! over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
