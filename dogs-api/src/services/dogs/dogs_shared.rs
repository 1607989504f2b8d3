use kennel_core::{ServiceCapabilities, ServiceMethodKind};

pub const VALIDATION_FAILED: &str = "Dog validation failed";
pub const NOT_FOUND: &str = "Dog not found";

pub const FIND_FAILED: &str = "Failed to retrieve dogs";
pub const GET_FAILED: &str = "Failed to retrieve dog";
pub const CREATE_FAILED: &str = "Failed to create dog";
pub const UPDATE_FAILED: &str = "Failed to update dog";
pub const DELETE_FAILED: &str = "Failed to delete dog";

pub fn crud_capabilities() -> ServiceCapabilities {
    ServiceCapabilities::from_methods(vec![
        ServiceMethodKind::Create,
        ServiceMethodKind::Find,
        ServiceMethodKind::Get,
        ServiceMethodKind::Patch,
        ServiceMethodKind::Remove,
    ])
}
