//! kennel-axum: Axum adapter for Kennel.
//!
//! Builds Axum routers from Kennel services and apps, maps service errors
//! to HTTP responses, and wraps everything in the shared HTTP layers.

pub mod app;
pub mod middlewares;
pub mod params;
pub mod rest;
pub mod state;
mod error;
pub use error::{KennelAxumError, FALLBACK_BODY};
pub use state::KennelAxumState;

pub use app::{axum, AxumApp};
