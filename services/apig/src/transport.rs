use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::HeaderValue;
use hwcsign_core::hash::hex_sha256;
use hwcsign_core::{Error, HttpSend, Result, SignRequest};
use log::debug;

use crate::constants::*;
use crate::Credential;
use crate::RequestSigner;

/// AuthTransport is the transport stage that authenticates outbound
/// requests.
///
/// Per request it injects the identity headers, hashes the payload, invokes
/// the signer and only then forwards to the wrapped stage. Any failure
/// returns before forwarding: a request is never sent unsigned. Retry policy
/// belongs to the caller; signing is deterministic and either succeeds or
/// fails on missing configuration.
#[derive(Debug)]
pub struct AuthTransport {
    credential: Credential,
    signer: RequestSigner,
    next: Arc<dyn HttpSend>,
}

impl AuthTransport {
    /// Wind an auth stage around `next`.
    ///
    /// When the credential bundle does not carry the required trio, `next`
    /// is returned unchanged. This is deliberate policy, not a fallback
    /// error: an explicitly empty bundle means auth is disabled, silently.
    /// Partial bundles are rejected earlier by [`Credential::validate`].
    pub fn wrap(
        credential: Credential,
        signer: RequestSigner,
        next: Arc<dyn HttpSend>,
    ) -> Arc<dyn HttpSend> {
        if !credential.has_required_attributes() {
            debug!("huawei cloud auth not configured, transport chain left untouched");
            return next;
        }

        debug!("installing huawei cloud auth stage");
        Arc::new(Self {
            credential,
            signer,
            next,
        })
    }

    fn decorate_headers(&self, parts: &mut http::request::Parts) -> Result<()> {
        if self.credential.project_id.is_empty() {
            return Err(Error::credential_invalid("missing project id"));
        }
        parts.headers.insert(
            X_PROJECT_ID,
            HeaderValue::from_str(&self.credential.project_id)?,
        );

        if let Some(token) = &self.credential.security_token {
            if !token.is_empty() {
                let mut value = HeaderValue::from_str(token)?;
                value.set_sensitive(true);
                parts.headers.insert(X_SECURITY_TOKEN, value);
            }
        }

        Ok(())
    }
}

#[async_trait]
impl HttpSend for AuthTransport {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (mut parts, body) = req.into_parts();

        // Identity headers are added before signing so they participate in
        // the canonicalized signature.
        self.decorate_headers(&mut parts)?;

        if self.credential.access_key_id.is_empty() || self.credential.secret_access_key.is_empty()
        {
            return Err(Error::credential_invalid("missing access/secret key"));
        }

        parts.headers.insert(
            X_SDK_CONTENT_SHA_256,
            HeaderValue::from_str(&hex_sha256(&body))?,
        );

        self.signer.sign_request(&mut parts, &self.credential).await?;

        self.next
            .http_send(http::Request::from_parts(parts, body))
            .await
    }
}
