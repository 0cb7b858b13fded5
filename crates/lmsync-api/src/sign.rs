// LMv1 request signing.
//
// Every call carries `Authorization: LMv1 <accessId>:<signature>:<epochMillis>`
// where the signature is an HMAC-SHA256 over the concatenated request
// details, hex-encoded, then base64-encoded. The base64-of-hex double
// encoding is part of the wire protocol and must not be collapsed into a
// single base64 of the raw digest -- the server computes the same string.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// Captured per request, never cached -- a stale timestamp invalidates the
/// signature server-side.
pub fn epoch_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Compute the LMv1 signature for one request.
///
/// The signed material is `verb + epoch + body + resource_path`, where
/// `body` is the exact JSON string that goes on the wire (empty for
/// body-less requests) and `resource_path` excludes any query string.
pub fn signature(
    access_key: &SecretString,
    verb: &str,
    epoch_ms: i64,
    canonical_body: &str,
    resource_path: &str,
) -> String {
    let message = format!("{verb}{epoch_ms}{canonical_body}{resource_path}");

    let mut mac = HmacSha256::new_from_slice(access_key.expose_secret().as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(message.as_bytes());

    let digest_hex = hex::encode(mac.finalize().into_bytes());
    BASE64.encode(digest_hex.as_bytes())
}

/// Build the full `Authorization` header value.
pub fn auth_header(
    access_id: &str,
    access_key: &SecretString,
    verb: &str,
    epoch_ms: i64,
    canonical_body: &str,
    resource_path: &str,
) -> String {
    let sig = signature(access_key, verb, epoch_ms, canonical_body, resource_path);
    format!("LMv1 {access_id}:{sig}:{epoch_ms}")
}
