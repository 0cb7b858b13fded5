use thiserror::Error;

/// Domain-level errors from the reconciliation engine.
///
/// Wire-level failures bubble up from `lmsync-api` unchanged; the two
/// variants added here are the fatal conditions the engine itself
/// detects: a name reference that resolves to nothing, and a mutation
/// reply that matches neither the success nor the tolerated-rejection
/// shape.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Transport, URL, or lookup-endpoint failure. All fatal.
    #[error(transparent)]
    Api(#[from] lmsync_api::Error),

    /// A name reference in the desired spec matched nothing remotely.
    #[error("no {entity} match found for {name}")]
    ResolutionFailed { entity: &'static str, name: String },

    /// The server rejected a mutation and the reply was not a
    /// recognized duplicate. The raw reply body is included verbatim.
    #[error("failed to {action} {entity} {name}: {reply}")]
    MutationRejected {
        action: &'static str,
        entity: &'static str,
        name: String,
        reply: String,
    },
}

impl CoreError {
    pub(crate) fn not_found(entity: &'static str, name: &str) -> Self {
        Self::ResolutionFailed {
            entity,
            name: name.to_owned(),
        }
    }
}
