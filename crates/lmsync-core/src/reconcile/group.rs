// Device-group reconciliation.
//
// Same state machine as devices, with one extra rule: a remote
// alerting disable that the spec did not ask for is treated as an
// operator override, and updates preserve it instead of re-enabling.

use tracing::{debug, info};

use lmsync_api::endpoint::ResourcePath;
use lmsync_api::models::DeviceGroup;
use lmsync_api::payload::DeviceGroupPayload;

use crate::diff;
use crate::error::CoreError;
use crate::outcome::Outcome;
use crate::resolve::Resolver;
use crate::resource::{DeviceGroupSpec, Intent};

use super::Reconciler;

impl Reconciler<'_> {
    /// Reconcile one device group toward the given intent.
    pub async fn device_group(
        &self,
        spec: &DeviceGroupSpec,
        intent: Intent,
    ) -> Result<Outcome, CoreError> {
        let resolver = Resolver::new(self.client());
        let current = resolver.find_group(&spec.name).await?;
        debug!(
            group = %spec.name,
            exists = current.is_some(),
            ?intent,
            "resolved group state"
        );

        match intent {
            Intent::Present => self.group_present(spec, current).await,
            Intent::Absent => self.group_absent(spec, current).await,
        }
    }

    async fn group_present(
        &self,
        spec: &DeviceGroupSpec,
        current: Option<DeviceGroup>,
    ) -> Result<Outcome, CoreError> {
        let mut payload = self.build_group_payload(spec).await?;

        match current {
            Some(group) => {
                let diff = diff::group_diff(&payload, &group);
                if !diff.changed {
                    return Ok(Outcome::unchanged());
                }
                if self.is_dry_run() {
                    return Ok(Outcome::dry_run());
                }
                if diff.manual_override {
                    // Keep the operator's disable in place.
                    payload.disable_alerting = true;
                    info!(group = %spec.name, "preserving manual alerting disable");
                }
                info!(group = %spec.name, id = group.id, "updating device group");
                let reply = self
                    .client()
                    .put(&ResourcePath::group(group.id), &payload)
                    .await?;
                Ok(Outcome::applied(reply.body))
            }
            None => {
                if self.is_dry_run() {
                    return Ok(Outcome::dry_run());
                }
                info!(group = %spec.name, "creating device group");
                let reply = self.client().post(&ResourcePath::groups(), &payload).await?;
                self.classify_create(&reply, "device group", &spec.name)
            }
        }
    }

    async fn group_absent(
        &self,
        spec: &DeviceGroupSpec,
        current: Option<DeviceGroup>,
    ) -> Result<Outcome, CoreError> {
        let Some(group) = current else {
            return Ok(Outcome::unchanged());
        };
        if self.is_dry_run() {
            return Ok(Outcome::dry_run());
        }
        info!(group = %spec.name, id = group.id, "removing device group");
        let reply = self.client().delete(&ResourcePath::group(group.id)).await?;
        Ok(Outcome::applied(reply.body))
    }

    /// Resolve name references and assemble the wire payload. The
    /// resolved collector group fills both the default and the
    /// auto-balanced assignment; `defaultCollectorId` stays zero.
    async fn build_group_payload(
        &self,
        spec: &DeviceGroupSpec,
    ) -> Result<DeviceGroupPayload, CoreError> {
        let resolver = Resolver::new(self.client());

        let parent_id = resolver
            .group_ref_or_root(spec.parent_group.as_deref())
            .await?;
        let collector_group = resolver.collector_group(&spec.collector_group).await?;

        Ok(DeviceGroupPayload {
            name: spec.name.clone(),
            parent_id,
            disable_alerting: spec.alert_disable,
            description: spec.description.clone(),
            custom_properties: spec.properties.to_vec(),
            default_collector_group_id: collector_group.id,
            default_collector_id: 0,
            default_auto_balanced_collector_group_id: collector_group.id,
        })
    }
}
