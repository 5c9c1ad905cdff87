use async_trait::async_trait;
use hwcsign_core::{Context, ProvideCredential, Result};

use crate::credential::Credential;

/// StaticCredentialProvider returns an already resolved credential bundle.
///
/// Useful when credentials come from somewhere this crate knows nothing
/// about, or in tests.
#[derive(Debug)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a provider around a fixed bundle.
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        self.credential.validate()?;

        if !self.credential.has_required_attributes() {
            return Ok(None);
        }

        Ok(Some(self.credential.clone()))
    }
}
