// The reconciliation state machine.
//
// One `Reconciler` per invocation. Each managed kind follows the same
// shape: resolve current state, build the fully-resolved desired
// payload (reference resolution runs even in dry-run, so infeasible
// specs fail identically), diff, then apply the transition the intent
// calls for. Dry-run short-circuits *every* mutating transition --
// create, update, and delete -- reporting `changed: false`.

mod device;
mod group;
mod tuning;

use lmsync_api::{LmClient, MutationReply};

use crate::error::CoreError;
use crate::outcome::Outcome;

/// Tunables for mutation classification.
#[derive(Debug, Clone)]
pub struct ReconcilePolicy {
    /// `errorCode` values on a rejected create that mean "already
    /// exists" and downgrade the rejection to an unchanged success.
    pub duplicate_error_codes: Vec<i64>,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            duplicate_error_codes: vec![1400, 1409],
        }
    }
}

/// Drives resources toward their desired state.
pub struct Reconciler<'a> {
    client: &'a LmClient,
    policy: ReconcilePolicy,
    dry_run: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(client: &'a LmClient) -> Self {
        Self {
            client,
            policy: ReconcilePolicy::default(),
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Report-only mode: resolve and diff normally, apply nothing.
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub(crate) fn client(&self) -> &'a LmClient {
        self.client
    }

    pub(crate) fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Classify a create reply.
    ///
    /// Success is the server echoing the resource back (`name` matches
    /// what was sent). A rejection whose `errorCode` is in the
    /// duplicate set means the resource already exists and counts as an
    /// unchanged success. Anything else is fatal, with the raw reply in
    /// the error.
    pub(crate) fn classify_create(
        &self,
        reply: &MutationReply,
        entity: &'static str,
        name: &str,
    ) -> Result<Outcome, CoreError> {
        if reply.field_str("name") == Some(name) {
            return Ok(Outcome::applied(reply.body.clone()));
        }
        if let Some(err) = reply.error_body() {
            if self.policy.duplicate_error_codes.contains(&err.error_code) {
                return Ok(Outcome::already_exists(err.error_message));
            }
        }
        Err(CoreError::MutationRejected {
            action: "create",
            entity,
            name: name.to_owned(),
            reply: reply.body.to_string(),
        })
    }
}
