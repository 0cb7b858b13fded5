// Alert tuning.
//
// Tuning never diffs: once the chain resolves, the PUT goes out
// unconditionally and `changed` is always reported. There is no
// intent either -- a tuning edit has no meaningful "absent".

use tracing::{debug, info};

use lmsync_api::endpoint::ResourcePath;
use lmsync_api::payload::{DatapointAlertPayload, InstanceAlertPayload, ThresholdPayload};

use crate::error::CoreError;
use crate::outcome::Outcome;
use crate::resolve::Resolver;
use crate::resource::TuningSpec;

use super::Reconciler;

impl Reconciler<'_> {
    /// Apply one tuning edit down the
    /// device → datasource → instance → datapoint chain. Any
    /// unresolvable hop aborts.
    pub async fn tuning(&self, spec: &TuningSpec) -> Result<Outcome, CoreError> {
        let resolver = Resolver::new(self.client());

        let device = resolver
            .device_by_display_name(&spec.device_display_name)
            .await?;
        let datasource = resolver
            .datasource_by_display_name(device.id, &spec.datasource)
            .await?;
        let instance = resolver
            .instance_by_name(device.id, datasource.id, &spec.instance)
            .await?;
        debug!(
            device = device.id,
            datasource = datasource.id,
            instance = instance.id,
            "resolved tuning chain"
        );

        match spec.datapoint.as_deref() {
            Some(datapoint_name) => {
                let datapoint = resolver
                    .datapoint_by_name(device.id, datasource.id, instance.id, datapoint_name)
                    .await?;
                if self.is_dry_run() {
                    return Ok(Outcome::dry_run());
                }

                let path =
                    ResourcePath::alert_setting(device.id, datasource.id, instance.id, datapoint.id);
                let reply = match spec.threshold.as_deref() {
                    Some(expr) => {
                        info!(datapoint = %datapoint_name, threshold = %expr, "updating threshold");
                        self.client()
                            .put(
                                &path,
                                &ThresholdPayload {
                                    alert_expr: expr.to_owned(),
                                },
                            )
                            .await?
                    }
                    None => {
                        info!(
                            datapoint = %datapoint_name,
                            disable = spec.alert_disable,
                            "toggling datapoint alerting"
                        );
                        self.client()
                            .put(
                                &path,
                                &DatapointAlertPayload {
                                    disable_alerting: spec.alert_disable,
                                },
                            )
                            .await?
                    }
                };
                Ok(Outcome::applied(reply.body))
            }
            None => {
                if self.is_dry_run() {
                    return Ok(Outcome::dry_run());
                }
                info!(
                    instance = %spec.instance,
                    disable = spec.alert_disable,
                    "toggling instance alerting"
                );
                let reply = self
                    .client()
                    .put(
                        &ResourcePath::instance(device.id, datasource.id, instance.id),
                        &InstanceAlertPayload {
                            disable_alerting: spec.alert_disable,
                            display_name: instance.display_name.clone(),
                            wild_value: instance.wild_value.clone(),
                        },
                    )
                    .await?;
                Ok(Outcome::applied(reply.body))
            }
        }
    }
}
