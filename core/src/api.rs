use crate::{Context, Result};
use std::fmt::Debug;

/// SigningCredential is the trait implemented by credential bundles.
pub trait SigningCredential: Clone + Debug + Send + Sync + 'static {
    /// Check if the credential is usable for signing.
    fn is_valid(&self) -> bool;
}

/// ProvideCredential is the trait used to load credentials from the
/// environment or configuration.
///
/// Providers return `Ok(None)` when their source holds no credentials at
/// all; this is not an error, callers simply move on or run without auth.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + 'static {
    /// Credential returned by this provider.
    type Credential: SigningCredential;

    /// Load credential from the given context.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// SignRequest is the trait implemented by service signers.
///
/// A signer mutates the request parts in place: it derives the canonical
/// representation, computes the signature and attaches the resulting
/// authorization header. Signing is pure computation; it performs no I/O.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Credential used by this signer.
    type Credential: SigningCredential;

    /// Sign the request with the given credential.
    async fn sign_request(
        &self,
        req: &mut http::request::Parts,
        credential: &Self::Credential,
    ) -> Result<()>;
}
