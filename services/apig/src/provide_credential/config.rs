use std::sync::Arc;

use async_trait::async_trait;
use hwcsign_core::{Context, ProvideCredential, Result};

use crate::config::Config;
use crate::credential::Credential;

/// ConfigCredentialProvider assembles a credential bundle from [`Config`],
/// falling back to environment variables for unset fields.
///
/// The assembled bundle is validated before it is handed out: a fully empty
/// bundle yields `Ok(None)` (auth not configured), an incomplete one is a
/// configuration error.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new loader via config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        // Load config from environment
        let config = self.config.as_ref().clone().from_env(ctx);

        let mut cred = Credential {
            access_key_id: config.access_key_id.unwrap_or_default(),
            secret_access_key: config.secret_access_key.unwrap_or_default(),
            project_id: config.project_id.unwrap_or_default(),
            security_token: None,
        };
        if let Some(token) = config.security_token {
            cred = cred.with_security_token(token);
        }

        cred.validate()?;

        if !cred.has_required_attributes() {
            return Ok(None);
        }

        Ok(Some(cred))
    }
}
