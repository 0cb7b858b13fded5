// Device reconciliation.

use tracing::{debug, info};

use lmsync_api::endpoint::ResourcePath;
use lmsync_api::models::Device;
use lmsync_api::payload::DevicePayload;

use crate::diff;
use crate::error::CoreError;
use crate::outcome::Outcome;
use crate::resolve::Resolver;
use crate::resource::{DeviceSpec, Intent};

use super::Reconciler;

impl Reconciler<'_> {
    /// Reconcile one device toward the given intent.
    pub async fn device(&self, spec: &DeviceSpec, intent: Intent) -> Result<Outcome, CoreError> {
        let resolver = Resolver::new(self.client());
        let current = resolver.find_device(&spec.name).await?;
        debug!(
            device = %spec.name,
            exists = current.is_some(),
            ?intent,
            "resolved device state"
        );

        match intent {
            Intent::Present => self.device_present(spec, current).await,
            Intent::Absent => self.device_absent(spec, current).await,
        }
    }

    async fn device_present(
        &self,
        spec: &DeviceSpec,
        current: Option<Device>,
    ) -> Result<Outcome, CoreError> {
        // Reference resolution happens before the dry-run gate so an
        // unresolvable spec fails the same way in both modes.
        let payload = self.build_device_payload(spec).await?;

        match current {
            Some(device) => {
                if !diff::device_changed(&payload, &device) {
                    return Ok(Outcome::unchanged());
                }
                if self.is_dry_run() {
                    return Ok(Outcome::dry_run());
                }
                info!(device = %spec.name, id = device.id, "updating device");
                let reply = self
                    .client()
                    .put(&ResourcePath::device(device.id), &payload)
                    .await?;
                Ok(Outcome::applied(reply.body))
            }
            None => {
                if self.is_dry_run() {
                    return Ok(Outcome::dry_run());
                }
                info!(device = %spec.name, "creating device");
                let reply = self.client().post(&ResourcePath::devices(), &payload).await?;
                self.classify_create(&reply, "device", &spec.name)
            }
        }
    }

    async fn device_absent(
        &self,
        spec: &DeviceSpec,
        current: Option<Device>,
    ) -> Result<Outcome, CoreError> {
        let Some(device) = current else {
            return Ok(Outcome::unchanged());
        };
        if self.is_dry_run() {
            return Ok(Outcome::dry_run());
        }
        info!(device = %spec.name, id = device.id, "removing device");
        let reply = self.client().delete(&ResourcePath::device(device.id)).await?;
        Ok(Outcome::applied(reply.body))
    }

    /// Resolve every name reference in the spec and assemble the wire
    /// payload. `preferredCollectorId` stays zero: assignment goes
    /// through the auto-balanced collector group.
    async fn build_device_payload(&self, spec: &DeviceSpec) -> Result<DevicePayload, CoreError> {
        let resolver = Resolver::new(self.client());

        let host_group_id = resolver.group_ref_or_root(spec.host_group.as_deref()).await?;
        let collector_group = resolver.collector_group(&spec.collector_group).await?;
        let (enable_netflow, netflow_collector_id) = match spec.netflow_collector.as_deref() {
            Some(description) => {
                let collector = resolver.collector_by_description(description).await?;
                (true, collector.id)
            }
            None => (false, 0),
        };

        Ok(DevicePayload {
            name: spec.name.clone(),
            display_name: spec.display_name.clone(),
            host_group_ids: host_group_id,
            disable_alerting: spec.alert_disable,
            description: spec.description.clone(),
            custom_properties: spec.properties.to_vec(),
            preferred_collector_id: 0,
            auto_balanced_collector_group_id: collector_group.id,
            enable_netflow,
            netflow_collector_id,
        })
    }
}
