//! Marker and trust headers.

use axum::extract::Query;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, Uri};

use crate::TokenRecord;

/// Marker header; the literal value `true` flags a public request.
pub const X_PUBLIC: HeaderName = HeaderName::from_static("x-public");
/// Trust header carrying the caller (user) id.
pub const X_CALLER_ID: HeaderName = HeaderName::from_static("x-caller-id");
/// Trust header carrying the delegated client id.
pub const X_CLIENT_ID: HeaderName = HeaderName::from_static("x-client-id");

/// Query parameter carrying the access token id.
pub const PARAM_ACCESS_TOKEN: &str = "access_token";

/// Returns true when the request is flagged public.
///
/// A missing request counts as public.
pub fn is_public<B>(request: Option<&Request<B>>) -> bool {
    request.map_or(true, |r| is_public_headers(r.headers()))
}

/// Returns true when `X-Public` is exactly `true`.
pub fn is_public_headers(headers: &HeaderMap) -> bool {
    headers
        .get(X_PUBLIC)
        .is_some_and(|v| v.as_bytes() == b"true")
}

/// Caller id from the trust header, or 0.
pub fn caller_id<B>(request: Option<&Request<B>>) -> i64 {
    request.map_or(0, |r| caller_id_from(r.headers()))
}

/// Client id from the trust header, or 0.
pub fn client_id<B>(request: Option<&Request<B>>) -> i64 {
    request.map_or(0, |r| client_id_from(r.headers()))
}

/// Caller id from `X-Caller-Id`, or 0 when missing or not an integer.
pub fn caller_id_from(headers: &HeaderMap) -> i64 {
    read_id(headers, &X_CALLER_ID)
}

/// Client id from `X-Client-Id`, or 0 when missing or not an integer.
pub fn client_id_from(headers: &HeaderMap) -> i64 {
    read_id(headers, &X_CLIENT_ID)
}

fn read_id(headers: &HeaderMap, name: &HeaderName) -> i64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Removes both trust headers, every value of them.
pub fn clear_trust_headers(headers: &mut HeaderMap) {
    headers.remove(X_CALLER_ID);
    headers.remove(X_CLIENT_ID);
}

/// Writes the identity carried by `token` as decimal strings.
pub fn write_trust_headers(headers: &mut HeaderMap, token: &TokenRecord) {
    headers.insert(X_CALLER_ID, HeaderValue::from(token.user_id));
    headers.insert(X_CLIENT_ID, HeaderValue::from(token.client_id));
}

/// Token id from the `access_token` query parameter.
///
/// The first occurrence wins. Surrounding whitespace is trimmed and an empty
/// value counts as absent.
pub fn token_id(uri: &Uri) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    pairs
        .into_iter()
        .find(|(key, _)| key == PARAM_ACCESS_TOKEN)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
