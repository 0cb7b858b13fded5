use serde::Serialize;

/// Result of reconciling one resource.
///
/// `changed` reports whether a mutation was applied (always `false` in
/// dry-run, even when one *would* have been applied); `payload` carries
/// the server's reply body when there was one worth showing.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub changed: bool,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl Outcome {
    /// Desired state already holds; nothing was sent.
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            success: true,
            message: None,
            payload: None,
        }
    }

    /// A mutation would have been applied, but dry-run suppressed it.
    pub fn dry_run() -> Self {
        Self {
            changed: false,
            success: true,
            message: Some("dry run: no changes applied".into()),
            payload: None,
        }
    }

    /// A mutation was applied; `reply` is the server's echo body.
    pub fn applied(reply: serde_json::Value) -> Self {
        Self {
            changed: true,
            success: true,
            message: None,
            payload: if reply.is_null() { None } else { Some(reply) },
        }
    }

    /// Create was rejected as a duplicate -- the resource already
    /// exists, which is the desired end state.
    pub fn already_exists(message: String) -> Self {
        Self {
            changed: false,
            success: true,
            message: Some(message),
            payload: None,
        }
    }
}
