use anyhow::Result;
use kennel_core::KennelApp;

use crate::services::dogs::Dog;
use crate::services::DogsParams;

/// The application container with settings loaded from the environment.
pub fn dogs_app() -> Result<KennelApp<Dog, DogsParams>> {
    let app: KennelApp<Dog, DogsParams> = KennelApp::new();
    crate::config::config(&app)?;
    Ok(app)
}
