// Signed REST client.
//
// Wraps `reqwest::Client` with per-request LMv1 signing, endpoint-family
// header selection, and envelope unwrapping. Lookup calls (GET) go through
// the typed envelope parsers; mutating calls return the parsed JSON body
// regardless of HTTP status, because create/update classification
// (name echo, duplicate-exists codes) belongs to the reconciler.

use reqwest::Method;
use reqwest::header::{self, HeaderValue};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::endpoint::{self, ResourcePath};
use crate::error::Error;
use crate::models::{ApiErrorBody, Paginated, RestEnvelope};
use crate::sign;
use crate::transport::TransportConfig;

/// Account credentials for one invocation.
///
/// The access key is secret material: it feeds the HMAC and is never
/// logged, echoed, or embedded in error messages.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account name -- the `<company>` in `<company>.logicmonitor.com`.
    pub company: String,
    pub access_id: String,
    pub access_key: SecretString,
}

/// Reply from a mutating call: HTTP status plus the parsed JSON body.
///
/// The body is kept raw because rejection bodies and echo bodies share no
/// schema; [`MutationReply::error_body`] extracts the structured error
/// shape when present.
#[derive(Debug, Clone)]
pub struct MutationReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl MutationReply {
    /// Parse the `{errorCode, errorMessage}` rejection shape, if this
    /// reply carries one.
    pub fn error_body(&self) -> Option<ApiErrorBody> {
        serde_json::from_value(self.body.clone()).ok()
    }

    /// A top-level string field of the reply body (e.g. the echoed `name`).
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.body.get(key)?.as_str()
    }
}

/// Async client for the platform's signed REST API.
pub struct LmClient {
    http: reqwest::Client,
    base_url: Url,
    access_id: String,
    access_key: SecretString,
}

impl LmClient {
    /// Build a client for the account's canonical API root:
    /// `https://<company>.logicmonitor.com/santaba/rest`.
    pub fn new(credentials: &Credentials, transport: &TransportConfig) -> Result<Self, Error> {
        let base = format!(
            "https://{}.logicmonitor.com/santaba/rest",
            credentials.company
        );
        Self::with_base_url(&base, credentials, transport)
    }

    /// Build a client against an explicit API root (tests point this at a
    /// mock server).
    pub fn with_base_url(
        base_url: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        Ok(Self {
            http,
            base_url,
            access_id: credentials.access_id.clone(),
            access_key: credentials.access_key.clone(),
        })
    }

    // ── Request plumbing ─────────────────────────────────────────────

    /// Sign and send one request. The signature covers the verb, a fresh
    /// epoch-milliseconds timestamp, the exact body string, and the
    /// resource path (query string excluded).
    async fn request(
        &self,
        method: Method,
        path: &ResourcePath,
        query: &[(&str, String)],
        body: Option<&str>,
    ) -> Result<reqwest::Response, Error> {
        let epoch = sign::epoch_millis();
        let canonical_body = body.unwrap_or("");
        let auth = sign::auth_header(
            &self.access_id,
            &self.access_key,
            method.as_str(),
            epoch,
            canonical_body,
            path.as_str(),
        );
        let mut auth_value = HeaderValue::from_str(&auth)
            .map_err(|e| Error::ClientBuild(format!("invalid authorization header: {e}")))?;
        auth_value.set_sensitive(true);

        // `Url` renders a root base as `http://host/`; trim so the
        // absolute resource path never double-slashes.
        let url = Url::parse(&format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.as_str()
        ))?;
        debug!("{} {}", method, path);

        let mut req = self
            .http
            .request(method.clone(), url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, auth_value);

        if path.versioned(&method) {
            req = req.header(endpoint::VERSION_HEADER, endpoint::VERSION_VALUE);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(b) = body {
            req = req.body(b.to_owned());
        }

        req.send()
            .await
            .map_err(|e| Error::transport(path.as_str(), e))
    }

    async fn read_body(&self, path: &ResourcePath, resp: reqwest::Response) -> Result<String, Error> {
        resp.text()
            .await
            .map_err(|e| Error::transport(path.as_str(), e))
    }

    // ── Lookup calls ─────────────────────────────────────────────────

    /// Versionless GET returning the `{status, data: {items, total}}`
    /// envelope. A non-200 embedded status is a fatal lookup failure.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &ResourcePath,
        query: &[(&str, String)],
    ) -> Result<Paginated<T>, Error> {
        let resp = self.request(Method::GET, path, query, None).await?;
        let body = self.read_body(path, resp).await?;

        let envelope: RestEnvelope<Paginated<T>> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        if envelope.status != 200 {
            return Err(Error::Api {
                path: path.as_str().to_owned(),
                status: envelope.status,
                message: envelope.errmsg.unwrap_or_else(|| "lookup failed".into()),
            });
        }
        envelope.data.ok_or_else(|| Error::Api {
            path: path.as_str().to_owned(),
            status: envelope.status,
            message: "response carried no data".into(),
        })
    }

    /// Versioned GET returning the bare `{items, total}` listing shape
    /// (collector-group family).
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &ResourcePath,
    ) -> Result<Paginated<T>, Error> {
        let resp = self.request(Method::GET, path, &[], None).await?;
        let body = self.read_body(path, resp).await?;

        // Rejections come back as {errorCode, errorMessage} with no items.
        if let Ok(err) = serde_json::from_str::<ApiErrorBody>(&body) {
            return Err(Error::Api {
                path: path.as_str().to_owned(),
                status: err.error_code,
                message: err.error_message,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    // ── Mutating calls ───────────────────────────────────────────────

    /// POST a typed payload. The payload is serialized once; the same
    /// string is signed and sent.
    pub async fn post<B: Serialize + Sync>(
        &self,
        path: &ResourcePath,
        payload: &B,
    ) -> Result<MutationReply, Error> {
        let canonical = serde_json::to_string(payload)?;
        self.mutate(Method::POST, path, &canonical).await
    }

    /// PUT a typed payload.
    pub async fn put<B: Serialize + Sync>(
        &self,
        path: &ResourcePath,
        payload: &B,
    ) -> Result<MutationReply, Error> {
        let canonical = serde_json::to_string(payload)?;
        self.mutate(Method::PUT, path, &canonical).await
    }

    /// DELETE (no body; the empty string is signed).
    pub async fn delete(&self, path: &ResourcePath) -> Result<MutationReply, Error> {
        self.mutate(Method::DELETE, path, "").await
    }

    async fn mutate(
        &self,
        method: Method,
        path: &ResourcePath,
        canonical: &str,
    ) -> Result<MutationReply, Error> {
        let body = if canonical.is_empty() {
            None
        } else {
            Some(canonical)
        };
        let resp = self.request(method, path, &[], body).await?;
        let status = resp.status().as_u16();
        let text = self.read_body(path, resp).await?;

        let value: serde_json::Value = if text.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: text,
            })?
        };

        Ok(MutationReply {
            status,
            body: value,
        })
    }
}
