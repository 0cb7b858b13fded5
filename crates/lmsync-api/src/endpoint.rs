// Endpoint families and typed resource paths.
//
// The API splits into two header regimes: the collector-settings family
// (`/setting/collector/groups`) requires `x-version: 3` on every verb,
// while device/group resource paths require it only on mutating verbs --
// a plain GET there must omit it, or the server changes the response
// shape. Families are resolved once per path, as data; no substring
// matching on URLs.

use reqwest::Method;

/// The API version header sent where the v3 response shape is required.
pub const VERSION_HEADER: &str = "x-version";
pub const VERSION_VALUE: &str = "3";

/// Which header regime a resource path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFamily {
    /// Device / group / datasource / instance endpoints. Versionless GETs,
    /// versioned mutations.
    Resource,
    /// Collector-group settings endpoints. Versioned on every verb,
    /// including GET.
    CollectorSettings,
}

/// A resource path with its endpoint family attached.
///
/// Construct via the typed builders below; the raw path (no query string)
/// is exactly the string that enters the request signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    path: String,
    family: EndpointFamily,
}

impl ResourcePath {
    fn resource(path: String) -> Self {
        Self {
            path,
            family: EndpointFamily::Resource,
        }
    }

    // ── Devices ──────────────────────────────────────────────────────

    /// `/device/devices`
    pub fn devices() -> Self {
        Self::resource("/device/devices".into())
    }

    /// `/device/devices/{id}`
    pub fn device(id: i64) -> Self {
        Self::resource(format!("/device/devices/{id}"))
    }

    // ── Device groups ────────────────────────────────────────────────

    /// `/device/groups`
    pub fn groups() -> Self {
        Self::resource("/device/groups".into())
    }

    /// `/device/groups/{id}`
    pub fn group(id: i64) -> Self {
        Self::resource(format!("/device/groups/{id}"))
    }

    // ── Collector settings ───────────────────────────────────────────

    /// `/setting/collector/groups` -- the only family that forces the
    /// version header on GET.
    pub fn collector_groups() -> Self {
        Self {
            path: "/setting/collector/groups".into(),
            family: EndpointFamily::CollectorSettings,
        }
    }

    /// `/setting/collectors` -- plain collector listing. Despite the name
    /// this is a versionless GET endpoint (the version rule keys on the
    /// collector-*group* family only).
    pub fn collectors() -> Self {
        Self::resource("/setting/collectors".into())
    }

    // ── Tuning chain ─────────────────────────────────────────────────

    /// `/device/devices/{id}/devicedatasources`
    pub fn device_datasources(device_id: i64) -> Self {
        Self::resource(format!("/device/devices/{device_id}/devicedatasources"))
    }

    /// `.../devicedatasources/{dsId}/instances`
    pub fn instances(device_id: i64, datasource_id: i64) -> Self {
        Self::resource(format!(
            "/device/devices/{device_id}/devicedatasources/{datasource_id}/instances"
        ))
    }

    /// `.../instances/{instanceId}`
    pub fn instance(device_id: i64, datasource_id: i64, instance_id: i64) -> Self {
        Self::resource(format!(
            "/device/devices/{device_id}/devicedatasources/{datasource_id}/instances/{instance_id}"
        ))
    }

    /// `.../instances/{instanceId}/alertsettings`
    pub fn alert_settings(device_id: i64, datasource_id: i64, instance_id: i64) -> Self {
        Self::resource(format!(
            "/device/devices/{device_id}/devicedatasources/{datasource_id}/instances/{instance_id}/alertsettings"
        ))
    }

    /// `.../alertsettings/{datapointId}`
    pub fn alert_setting(
        device_id: i64,
        datasource_id: i64,
        instance_id: i64,
        datapoint_id: i64,
    ) -> Self {
        Self::resource(format!(
            "/device/devices/{device_id}/devicedatasources/{datasource_id}/instances/{instance_id}/alertsettings/{datapoint_id}"
        ))
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The raw resource path. This exact string is signed.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    pub fn family(&self) -> EndpointFamily {
        self.family
    }

    /// Whether a request with the given verb carries `x-version: 3`.
    pub fn versioned(&self, method: &Method) -> bool {
        *method != Method::GET || self.family == EndpointFamily::CollectorSettings
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}
