//! kennel-core: framework-agnostic core for Kennel services.

pub mod app;
pub mod config;
pub mod errors;
pub mod registry;
pub mod service;

pub use app::KennelApp;
pub use config::{KennelConfig, KennelConfigSnapshot};
pub use errors::{ErrorKind, KennelError};
pub use registry::KennelServiceRegistry;
pub use service::{KennelService, ServiceCapabilities, ServiceMethodKind};
