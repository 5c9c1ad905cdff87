use async_trait::async_trait;
use hwcsign_core::{Context, ProvideCredential, Result};

use crate::{constants::*, Credential};

/// EnvCredentialProvider loads Huawei Cloud credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `HUAWEI_CLOUD_ACCESS_KEY_ID`: The Huawei Cloud access key ID
/// - `HUAWEI_CLOUD_SECRET_ACCESS_KEY`: The Huawei Cloud secret access key
/// - `HUAWEI_CLOUD_PROJECT_ID`: The project the requests are issued against
/// - `HUAWEI_CLOUD_SECURITY_TOKEN`: The Huawei Cloud security token (optional)
///
/// Setting only part of the required trio is reported as a configuration
/// error rather than silently ignored.
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let mut cred = Credential {
            access_key_id: envs.get(HUAWEI_CLOUD_ACCESS_KEY_ID).cloned().unwrap_or_default(),
            secret_access_key: envs
                .get(HUAWEI_CLOUD_SECRET_ACCESS_KEY)
                .cloned()
                .unwrap_or_default(),
            project_id: envs.get(HUAWEI_CLOUD_PROJECT_ID).cloned().unwrap_or_default(),
            security_token: None,
        };
        if let Some(token) = envs.get(HUAWEI_CLOUD_SECURITY_TOKEN) {
            cred = cred.with_security_token(token);
        }

        cred.validate()?;

        if !cred.has_required_attributes() {
            return Ok(None);
        }

        Ok(Some(cred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwcsign_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    fn ctx_with(envs: HashMap<String, String>) -> Context {
        Context::new().with_env(StaticEnv { envs })
    }

    #[tokio::test]
    async fn test_env_credential_provider() {
        let ctx = ctx_with(HashMap::from([
            (
                HUAWEI_CLOUD_ACCESS_KEY_ID.to_string(),
                "test_access_key".to_string(),
            ),
            (
                HUAWEI_CLOUD_SECRET_ACCESS_KEY.to_string(),
                "test_secret_key".to_string(),
            ),
            (
                HUAWEI_CLOUD_PROJECT_ID.to_string(),
                "test_project".to_string(),
            ),
        ]));

        let provider = EnvCredentialProvider::new();
        let cred = provider
            .provide_credential(&ctx)
            .await
            .expect("load must succeed")
            .expect("credential must exist");
        assert_eq!(cred.access_key_id, "test_access_key");
        assert_eq!(cred.secret_access_key, "test_secret_key");
        assert_eq!(cred.project_id, "test_project");
        assert!(cred.security_token.is_none());
    }

    #[tokio::test]
    async fn test_env_credential_provider_with_security_token() {
        let ctx = ctx_with(HashMap::from([
            (
                HUAWEI_CLOUD_ACCESS_KEY_ID.to_string(),
                "test_access_key".to_string(),
            ),
            (
                HUAWEI_CLOUD_SECRET_ACCESS_KEY.to_string(),
                "test_secret_key".to_string(),
            ),
            (
                HUAWEI_CLOUD_PROJECT_ID.to_string(),
                "test_project".to_string(),
            ),
            (
                HUAWEI_CLOUD_SECURITY_TOKEN.to_string(),
                "test_security_token".to_string(),
            ),
        ]));

        let provider = EnvCredentialProvider::new();
        let cred = provider
            .provide_credential(&ctx)
            .await
            .expect("load must succeed")
            .expect("credential must exist");
        assert_eq!(cred.security_token, Some("test_security_token".to_string()));
    }

    #[tokio::test]
    async fn test_env_credential_provider_missing_credentials() {
        let ctx = ctx_with(HashMap::new());

        let provider = EnvCredentialProvider::new();
        let cred = provider
            .provide_credential(&ctx)
            .await
            .expect("load must succeed");
        assert!(cred.is_none());
    }

    #[tokio::test]
    async fn test_env_credential_provider_partial_credentials() {
        // Only access key ID set: a configuration mistake, not a silent skip.
        let ctx = ctx_with(HashMap::from([(
            HUAWEI_CLOUD_ACCESS_KEY_ID.to_string(),
            "test_access_key".to_string(),
        )]));

        let provider = EnvCredentialProvider::new();
        let err = provider.provide_credential(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
