//! Example of composing the logging, auth and base transport stages.

use std::sync::Arc;

use bytes::Bytes;
use hwcsign_apig::{AuthTransport, Config, ConfigCredentialProvider, RequestSigner};
use hwcsign_core::{Context, HttpSend, LoggingHttpSend, OsEnv, ProvideCredential, Result};
use hwcsign_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Resolve the credential bundle from explicit config plus environment.
    let ctx = Context::new().with_env(OsEnv);
    let provider = ConfigCredentialProvider::new(Arc::new(Config::new()));

    let base: Arc<dyn HttpSend> = Arc::new(ReqwestHttpSend::default());
    let chain = match provider.provide_credential(&ctx).await? {
        Some(credential) => AuthTransport::wrap(
            credential,
            RequestSigner::new("apig", "cn-north-4"),
            base,
        ),
        None => {
            println!("no credentials configured, requests go out unsigned");
            base
        }
    };

    // The logging stage sits outside the auth stage, so it observes the
    // already-signed request.
    let chain = LoggingHttpSend::new(chain);

    let req = http::Request::builder()
        .method("GET")
        .uri("https://iam.cn-north-4.myhuaweicloud.com/v3/projects")
        .body(Bytes::new())
        .map_err(|e| hwcsign_core::Error::request_invalid(e.to_string()))?;

    let resp = chain.http_send(req).await?;
    println!("status: {}", resp.status());

    Ok(())
}
