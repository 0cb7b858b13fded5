// Name → id resolution.
//
// Every cross-reference in a spec is a name; the API wants numeric ids.
// Devices and groups resolve with a server-side `filter=name:{name}`
// lookup; collectors resolve by their `description` field; collector
// groups are listed in full and matched client-side because the
// settings endpoint does not filter. First match wins throughout --
// the platform enforces name uniqueness within a namespace.

use tracing::debug;

use lmsync_api::endpoint::ResourcePath;
use lmsync_api::models::{
    AlertSetting, Collector, CollectorGroup, DataSourceInstance, Device, DeviceDataSource,
    DeviceGroup,
};
use lmsync_api::LmClient;

use crate::error::CoreError;

/// Id of the implicit root device group. The only id default in the
/// system: an unset host group or parent group resolves here without a
/// lookup.
pub const ROOT_GROUP_ID: i64 = 1;

/// Read-side lookups against one client.
pub struct Resolver<'a> {
    client: &'a LmClient,
}

impl<'a> Resolver<'a> {
    pub fn new(client: &'a LmClient) -> Self {
        Self { client }
    }

    // ── Devices ──────────────────────────────────────────────────────

    /// Look up a device by hostname. `None` means it does not exist,
    /// which is a normal state, not an error.
    pub async fn find_device(&self, name: &str) -> Result<Option<Device>, CoreError> {
        let page = self
            .client
            .get_page::<Device>(
                &ResourcePath::devices(),
                &[("filter", format!("name:{name}"))],
            )
            .await?;
        Ok(page.items.into_iter().next())
    }

    /// Look up a device by *display name*, scanning the full listing.
    /// Used by the tuning chain; a miss is fatal there.
    pub async fn device_by_display_name(&self, display_name: &str) -> Result<Device, CoreError> {
        let page = self
            .client
            .get_page::<Device>(&ResourcePath::devices(), &[])
            .await?;
        page.items
            .into_iter()
            .find(|d| d.display_name == display_name)
            .ok_or_else(|| CoreError::not_found("device", display_name))
    }

    // ── Device groups ────────────────────────────────────────────────

    /// Look up a full device group by name.
    pub async fn find_group(&self, name: &str) -> Result<Option<DeviceGroup>, CoreError> {
        let page = self
            .client
            .get_page::<DeviceGroup>(
                &ResourcePath::groups(),
                &[("filter", format!("name:{name}"))],
            )
            .await?;
        Ok(page.items.into_iter().next())
    }

    /// Resolve a group *reference* (host group, parent group) to its id.
    /// Only the id is fetched; a miss is fatal.
    pub async fn group_ref_id(&self, name: &str) -> Result<i64, CoreError> {
        let page = self
            .client
            .get_page::<DeviceGroup>(
                &ResourcePath::groups(),
                &[
                    ("filter", format!("name:{name}")),
                    ("fields", "id,name".into()),
                ],
            )
            .await?;
        page.items
            .first()
            .map(|g| g.id)
            .ok_or_else(|| CoreError::not_found("device group", name))
    }

    /// A group reference that defaults to the root group when unset.
    pub async fn group_ref_or_root(&self, name: Option<&str>) -> Result<i64, CoreError> {
        match name {
            Some(n) => self.group_ref_id(n).await,
            None => Ok(ROOT_GROUP_ID),
        }
    }

    // ── Collector infrastructure ─────────────────────────────────────

    /// Resolve a collector group by name. The settings endpoint has no
    /// server-side filter, so the whole listing is scanned.
    pub async fn collector_group(&self, name: &str) -> Result<CollectorGroup, CoreError> {
        let page = self
            .client
            .get_list::<CollectorGroup>(&ResourcePath::collector_groups())
            .await?;
        debug!(total = page.total, "scanned collector groups for {name}");
        page.items
            .into_iter()
            .find(|g| g.name == name)
            .ok_or_else(|| CoreError::not_found("collector group", name))
    }

    /// Resolve a collector by its `description` field (the collector's
    /// human name on this API).
    pub async fn collector_by_description(&self, description: &str) -> Result<Collector, CoreError> {
        let page = self
            .client
            .get_page::<Collector>(
                &ResourcePath::collectors(),
                &[
                    ("filter", format!("description:{description}")),
                    ("fields", "id,description".into()),
                ],
            )
            .await?;
        page.items
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::not_found("collector", description))
    }

    // ── Tuning chain ─────────────────────────────────────────────────
    //
    // Each hop narrows by the previous hop's id; any miss aborts the
    // whole tuning operation.

    pub async fn datasource_by_display_name(
        &self,
        device_id: i64,
        display_name: &str,
    ) -> Result<DeviceDataSource, CoreError> {
        let page = self
            .client
            .get_page::<DeviceDataSource>(&ResourcePath::device_datasources(device_id), &[])
            .await?;
        page.items
            .into_iter()
            .find(|ds| ds.data_source_display_name == display_name)
            .ok_or_else(|| CoreError::not_found("datasource", display_name))
    }

    pub async fn instance_by_name(
        &self,
        device_id: i64,
        datasource_id: i64,
        name: &str,
    ) -> Result<DataSourceInstance, CoreError> {
        let page = self
            .client
            .get_page::<DataSourceInstance>(&ResourcePath::instances(device_id, datasource_id), &[])
            .await?;
        page.items
            .into_iter()
            .find(|i| i.display_name == name)
            .ok_or_else(|| CoreError::not_found("instance", name))
    }

    pub async fn datapoint_by_name(
        &self,
        device_id: i64,
        datasource_id: i64,
        instance_id: i64,
        name: &str,
    ) -> Result<AlertSetting, CoreError> {
        let page = self
            .client
            .get_page::<AlertSetting>(
                &ResourcePath::alert_settings(device_id, datasource_id, instance_id),
                &[],
            )
            .await?;
        page.items
            .into_iter()
            .find(|dp| dp.data_point_name == name)
            .ok_or_else(|| CoreError::not_found("datapoint", name))
    }
}
