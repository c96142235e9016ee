use std::sync::Arc;

use crate::{auth::IdentityProvider, model::ModelManager};

#[derive(Debug, Clone)]
pub struct AppState {
    mm: ModelManager,
    identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(mm: ModelManager, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { mm, identity }
    }

    pub fn pool(&self) -> &ModelManager {
        &self.mm
    }

    /// Login provider used by the OAuth routes.
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }
}
