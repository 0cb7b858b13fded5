// REST API response types.
//
// Models for the platform's JSON API. Versionless GETs wrap their payload
// in the `RestEnvelope` (`{ status, data, errmsg }`); v3 endpoints return
// the payload bare. Fields use `#[serde(default)]` liberally because the
// API is inconsistent about field presence, and every object keeps a
// catch-all `extra` map for fields the reconciler never reads.

use serde::{Deserialize, Serialize};

// ── Envelopes ────────────────────────────────────────────────────────

/// Versionless response envelope.
///
/// ```json
/// { "status": 200, "data": { "items": [...], "total": 1 }, "errmsg": "OK" }
/// ```
///
/// The embedded `status` is authoritative for lookup calls -- a non-200
/// value there is a fatal resolution failure even on an HTTP 200.
#[derive(Debug, Deserialize)]
pub struct RestEnvelope<T> {
    pub status: i64,
    // No `#[serde(default)]` here: it would put a `T: Default` bound on
    // the derived impl, and a missing field already lands as `None`.
    pub data: Option<T>,
    #[serde(default)]
    pub errmsg: Option<String>,
}

/// A page of items. Both the envelope's `data` payload and the bare v3
/// listing responses use this shape.
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: i64,
}

/// Error body returned by mutating endpoints on rejection.
///
/// `errorCode` drives the duplicate-create idempotence rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub error_code: i64,
    #[serde(default)]
    pub error_message: String,
}

// ── Custom properties ────────────────────────────────────────────────

/// A single `{name, value}` custom property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// ── Devices ──────────────────────────────────────────────────────────

/// A monitored device from `/device/devices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Comma-separated group id list, as the API renders it.
    #[serde(default)]
    pub host_group_ids: String,
    #[serde(default)]
    pub disable_alerting: bool,
    #[serde(default)]
    pub preferred_collector_group_id: i64,
    #[serde(default)]
    pub custom_properties: Vec<Property>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Device groups ────────────────────────────────────────────────────

/// A device group from `/device/groups`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_id: i64,
    #[serde(default)]
    pub disable_alerting: bool,
    #[serde(default)]
    pub default_collector_group_id: i64,
    #[serde(default)]
    pub custom_properties: Vec<Property>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Collector infrastructure ─────────────────────────────────────────

/// A collector group from `/setting/collector/groups`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorGroup {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A collector from `/setting/collectors`. The API models the collector's
/// human name as `description`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collector {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Tuning chain ─────────────────────────────────────────────────────

/// A datasource applied to a device, from `.../devicedatasources`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDataSource {
    pub id: i64,
    #[serde(default)]
    pub data_source_display_name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An instance of a device datasource, from `.../instances`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceInstance {
    pub id: i64,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub wild_value: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A datapoint alert setting, from `.../alertsettings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSetting {
    pub id: i64,
    #[serde(default)]
    pub data_point_name: String,
    #[serde(default)]
    pub disable_alerting: bool,
    #[serde(default)]
    pub alert_expr: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
