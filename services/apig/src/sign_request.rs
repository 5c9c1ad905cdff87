use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use http::request::Parts;
use http::{header, HeaderValue};
use hwcsign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use hwcsign_core::time::{format_date, format_iso8601, now, DateTime};
use hwcsign_core::{Error, Result, SignRequest, SigningRequest};
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use std::fmt::Write;

/// RequestSigner that computes SDK-HMAC-SHA256 signatures for Huawei Cloud
/// API Gateway requests.
///
/// The signing key is never the raw secret: it is derived through a chained
/// HMAC starting from the secret, through date, region and service terms,
/// ending in a request-scoped key. The timestamp is taken exactly once per
/// request and shared between the `X-Sdk-Date` header and the string to
/// sign.
#[derive(Debug)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub(crate) fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(&self, req: &mut Parts, credential: &Self::Credential) -> Result<()> {
        let now = self.time.unwrap_or_else(now);
        let mut signed_req = SigningRequest::build(req)?;

        // canonicalize context
        canonicalize_header(&mut signed_req, credential, now)?;
        canonicalize_query(&mut signed_req);

        // build canonical request and string to sign.
        let creq = canonical_request_string(&signed_req)?;
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20220313/<region>/<service>/sdk_request"
        let scope = format!(
            "{}/{}/{}/sdk_request",
            format_date(now),
            self.region,
            self.service
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // SDK-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/sdk_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{SDK_HMAC_SHA256}")?;
            writeln!(f, "{}", format_iso8601(now))?;
            writeln!(f, "{}", &scope)?;
            write!(f, "{}", &encoded_req)?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &credential.secret_access_key,
            now,
            &self.region,
            &self.service,
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{SDK_HMAC_SHA256} Credential={}/{}, SignedHeaders={}, Signature={}",
            credential.access_key_id,
            scope,
            signed_header_names(&signed_req).join(";"),
            signature
        ))?;
        authorization.set_sensitive(true);

        signed_req
            .headers
            .insert(header::AUTHORIZATION, authorization);

        // Apply to the request.
        signed_req.apply(req)
    }
}

/// The names from the fixed signed-header set that the request carries,
/// already sorted since [`SIGNED_HEADERS`] is.
fn signed_header_names(ctx: &SigningRequest) -> Vec<&'static str> {
    SIGNED_HEADERS
        .iter()
        .copied()
        .filter(|name| ctx.headers.contains_key(*name))
        .collect()
}

fn canonical_request_string(ctx: &SigningRequest) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", ctx.method)?;
    // Insert encoded path. Escapes that do not decode to valid UTF-8 cannot
    // be re-encoded faithfully, so the request is rejected instead of signed
    // with a path the server will never match.
    let path = percent_decode_str(&ctx.path).decode_utf8().map_err(|e| {
        Error::request_invalid("request path is not valid percent-encoded utf-8").with_source(e)
    })?;
    writeln!(f, "{}", utf8_percent_encode(&path, &URI_ENCODE_SET))?;
    // Insert query
    writeln!(
        f,
        "{}",
        ctx.query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    )?;
    // Insert signed headers
    let signed_headers = signed_header_names(ctx);
    for name in signed_headers.iter() {
        writeln!(f, "{}:{}", name, ctx.headers[*name].to_str()?)?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;

    // The payload hash is never skipped; an absent header means the body is
    // empty and hashes to the digest of the empty string.
    let payload_hash = ctx.header_get_or_default(&header::HeaderName::from_static(
        X_SDK_CONTENT_SHA_256,
    ))?;
    if payload_hash.is_empty() {
        write!(f, "{}", hex_sha256(b""))?;
    } else {
        write!(f, "{payload_hash}")?;
    }

    Ok(f)
}

fn canonicalize_header(
    ctx: &mut SigningRequest,
    credential: &Credential,
    now: DateTime,
) -> Result<()> {
    for (_, value) in ctx.headers.iter_mut() {
        SigningRequest::header_value_normalize(value)
    }

    // Insert HOST header if not present.
    if ctx.headers.get(header::HOST).is_none() {
        ctx.headers
            .insert(header::HOST, HeaderValue::from_str(ctx.authority.as_str())?);
    }

    // The date header always mirrors the signing timestamp; a stale value
    // left by the caller would fail verification server side.
    ctx.headers
        .insert(X_SDK_DATE, HeaderValue::try_from(format_iso8601(now))?);

    // Insert the payload hash header if not present. Requests signed without
    // the transport decorator carry an empty body.
    if ctx.headers.get(X_SDK_CONTENT_SHA_256).is_none() {
        ctx.headers.insert(
            X_SDK_CONTENT_SHA_256,
            HeaderValue::from_str(&hex_sha256(b""))?,
        );
    }

    if let Some(token) = &credential.security_token {
        if !token.is_empty() && ctx.headers.get(X_SECURITY_TOKEN).is_none() {
            let mut value = HeaderValue::from_str(token)?;
            // Set token value sensitive to avoid leaking.
            value.set_sensitive(true);

            ctx.headers.insert(X_SECURITY_TOKEN, value);
        }
    }

    Ok(())
}

fn canonicalize_query(ctx: &mut SigningRequest) {
    if ctx.query.is_empty() {
        return;
    }

    // Sort by param name, then by value for repeated names.
    ctx.query.sort();

    ctx.query = ctx
        .query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect();
}

fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("SDK{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "sdk_request".as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn test_time() -> DateTime {
        Utc.with_ymd_and_hms(2022, 3, 13, 7, 20, 4).unwrap()
    }

    fn test_credential() -> Credential {
        Credential::new("AK1", "SK1", "P1")
    }

    fn signer() -> RequestSigner {
        RequestSigner::new("apig", "cn-north-4").with_time(test_time())
    }

    fn parts_for(uri: &str) -> Parts {
        http::Request::builder()
            .method("GET")
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    async fn authorization_for(mut parts: Parts) -> String {
        signer()
            .sign_request(&mut parts, &test_credential())
            .await
            .expect("sign must succeed");
        parts.headers[header::AUTHORIZATION]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_signature_is_deterministic() {
        let _ = env_logger::builder().is_test(true).try_init();

        let first = authorization_for(parts_for("https://service.example.com/v1/resource")).await;
        let second = authorization_for(parts_for("https://service.example.com/v1/resource")).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_signature_header_format() {
        let authorization =
            authorization_for(parts_for("https://service.example.com/v1/resource")).await;

        assert!(
            authorization.starts_with("SDK-HMAC-SHA256 Credential=AK1/20220313/cn-north-4/apig/sdk_request, "),
            "unexpected authorization: {authorization}"
        );
        assert!(authorization
            .contains("SignedHeaders=host;x-sdk-content-sha256;x-sdk-date, Signature="));
    }

    #[tokio::test]
    async fn test_query_order_does_not_matter() {
        let a = authorization_for(parts_for("https://service.example.com/v1/resource?b=2&a=1")).await;
        let b = authorization_for(parts_for("https://service.example.com/v1/resource?a=1&b=2")).await;

        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_header_order_does_not_matter() {
        let mut first = parts_for("https://service.example.com/v1/resource");
        first
            .headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        first
            .headers
            .insert(X_PROJECT_ID, HeaderValue::from_static("P1"));

        let mut second = parts_for("https://service.example.com/v1/resource");
        second
            .headers
            .insert(X_PROJECT_ID, HeaderValue::from_static("P1"));
        second
            .headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        assert_eq!(
            authorization_for(first).await,
            authorization_for(second).await
        );
    }

    #[tokio::test]
    async fn test_headers_outside_fixed_set_are_ignored() {
        let plain = authorization_for(parts_for("https://service.example.com/v1/resource")).await;

        let mut noisy = parts_for("https://service.example.com/v1/resource");
        noisy
            .headers
            .insert("x-custom-header", HeaderValue::from_static("noise"));
        let noisy = authorization_for(noisy).await;

        assert_eq!(plain, noisy);
    }

    #[tokio::test]
    async fn test_payload_hash_changes_signature() {
        let empty = authorization_for(parts_for("https://service.example.com/v1/resource")).await;

        let mut with_body = parts_for("https://service.example.com/v1/resource");
        with_body.headers.insert(
            X_SDK_CONTENT_SHA_256,
            HeaderValue::from_str(&hex_sha256(b"{}")).unwrap(),
        );
        let with_body = authorization_for(with_body).await;

        assert_ne!(empty, with_body);
    }

    #[tokio::test]
    async fn test_date_header_matches_signing_time() {
        let mut parts = parts_for("https://service.example.com/v1/resource");
        signer()
            .sign_request(&mut parts, &test_credential())
            .await
            .expect("sign must succeed");

        assert_eq!(parts.headers[X_SDK_DATE], "20220313T072004Z");
    }

    #[tokio::test]
    async fn test_security_token_enters_signed_headers() {
        let mut parts = parts_for("https://service.example.com/v1/resource");
        let credential = test_credential().with_security_token("TOK1");
        signer()
            .sign_request(&mut parts, &credential)
            .await
            .expect("sign must succeed");

        assert_eq!(parts.headers[X_SECURITY_TOKEN], "TOK1");
        let authorization = parts.headers[header::AUTHORIZATION].to_str().unwrap();
        assert!(authorization
            .contains("SignedHeaders=host;x-sdk-content-sha256;x-sdk-date;x-security-token, "));
    }

    #[tokio::test]
    async fn test_equivalent_path_spellings_sign_identically() {
        // An unnecessarily escaped unreserved character decodes and
        // re-encodes to the same canonical bytes as the plain spelling.
        let escaped =
            authorization_for(parts_for("https://service.example.com/v1/%72esource")).await;
        let plain = authorization_for(parts_for("https://service.example.com/v1/resource")).await;

        assert_eq!(escaped, plain);
    }

    #[tokio::test]
    async fn test_invalid_utf8_path_escape_is_rejected() {
        let mut parts = parts_for("https://service.example.com/v1/%FF");
        let err = signer()
            .sign_request(&mut parts, &test_credential())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), hwcsign_core::ErrorKind::RequestInvalid);
        // A path carrying the replacement character itself is valid UTF-8
        // and still signs; only the undecodable escape is refused.
        let replacement =
            authorization_for(parts_for("https://service.example.com/v1/%EF%BF%BD")).await;
        assert!(replacement.starts_with("SDK-HMAC-SHA256 "));
    }
}
