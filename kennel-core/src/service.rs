use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::errors::KennelError;

/// Standard service methods.
///
/// `Patch` is a partial update; there is no full-replace method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceMethodKind {
    Find,
    Get,
    Create,
    Patch,
    Remove,
}

impl ServiceMethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMethodKind::Find => "find",
            ServiceMethodKind::Get => "get",
            ServiceMethodKind::Create => "create",
            ServiceMethodKind::Patch => "patch",
            ServiceMethodKind::Remove => "remove",
        }
    }
}

/// Capabilities describe which methods a service exposes to the outside
/// world. Transports (like kennel-axum) mount only the allowed routes.
#[derive(Debug, Clone)]
pub struct ServiceCapabilities {
    pub allowed_methods: Vec<ServiceMethodKind>,
}

impl ServiceCapabilities {
    /// find, get, create, patch, remove
    pub fn standard_crud() -> Self {
        use ServiceMethodKind::*;
        Self {
            allowed_methods: vec![Find, Get, Create, Patch, Remove],
        }
    }

    pub fn from_methods(methods: Vec<ServiceMethodKind>) -> Self {
        Self {
            allowed_methods: methods,
        }
    }

    pub fn allows(&self, method: ServiceMethodKind) -> bool {
        self.allowed_methods.contains(&method)
    }
}

fn not_implemented(method: ServiceMethodKind) -> anyhow::Error {
    KennelError::not_implemented(format!("Method not implemented: {}", method.as_str())).into_anyhow()
}

/// Core Kennel service trait.
///
/// - `find`   → list many
/// - `get`    → fetch one by id (`None` when absent)
/// - `create` → create one from a raw field mapping
/// - `patch`  → partially update one from a raw field mapping
/// - `remove` → delete one by id, returning its prior state (`None` when absent)
///
/// Write methods receive the untyped request body; the service owns turning
/// it into a typed record. Ids arrive as raw path segments for the same
/// reason. Every method defaults to a 501 error so a service only overrides
/// what it supports.
///
/// `check_id` runs before the transport reads a request body, so a bad id is
/// reported ahead of a bad body.
#[async_trait]
pub trait KennelService<R, P = ()>: Send + Sync
where
    R: Send + 'static,
    P: Send + 'static,
{
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::standard_crud()
    }

    fn check_id(&self, _id: &str) -> Result<()> {
        Ok(())
    }

    async fn find(&self, _params: P) -> Result<Vec<R>> {
        Err(not_implemented(ServiceMethodKind::Find))
    }

    async fn get(&self, _id: &str, _params: P) -> Result<Option<R>> {
        Err(not_implemented(ServiceMethodKind::Get))
    }

    async fn create(&self, _data: Value, _params: P) -> Result<R> {
        Err(not_implemented(ServiceMethodKind::Create))
    }

    async fn patch(&self, _id: &str, _data: Value, _params: P) -> Result<R> {
        Err(not_implemented(ServiceMethodKind::Patch))
    }

    async fn remove(&self, _id: &str, _params: P) -> Result<Option<R>> {
        Err(not_implemented(ServiceMethodKind::Remove))
    }
}
