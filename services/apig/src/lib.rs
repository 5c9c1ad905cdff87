//! Signer and auth transport for Huawei Cloud API Gateway requests.

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::{
    ConfigCredentialProvider, EnvCredentialProvider, StaticCredentialProvider,
};

mod sign_request;
pub use sign_request::RequestSigner;

mod transport;
pub use transport::AuthTransport;

mod constants;
