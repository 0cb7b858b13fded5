// Typed mutation payloads.
//
// Each mutating request body is a struct serialized exactly once at the
// transport boundary, so the signed canonical body and the wire body are
// the same bytes. Field sets match what the server expects on
// create/update; the zeroed collector-id fields are required placeholders
// when auto-balanced collector groups are in use.

use serde::Serialize;

use crate::models::Property;

/// Create/update body for `/device/devices`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePayload {
    pub name: String,
    pub display_name: String,
    pub host_group_ids: i64,
    pub disable_alerting: bool,
    pub description: String,
    pub custom_properties: Vec<Property>,
    pub preferred_collector_id: i64,
    pub auto_balanced_collector_group_id: i64,
    pub enable_netflow: bool,
    pub netflow_collector_id: i64,
}

/// Create/update body for `/device/groups`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGroupPayload {
    pub name: String,
    pub parent_id: i64,
    pub disable_alerting: bool,
    pub description: String,
    pub custom_properties: Vec<Property>,
    pub default_collector_group_id: i64,
    pub default_collector_id: i64,
    pub default_auto_balanced_collector_group_id: i64,
}

/// Threshold update for a datapoint alert setting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdPayload {
    pub alert_expr: String,
}

/// Alert on/off toggle for a datapoint alert setting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatapointAlertPayload {
    pub disable_alerting: bool,
}

/// Alert toggle for a whole instance. `display_name` and `wild_value` are
/// echoed back from the resolved instance -- the endpoint requires them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceAlertPayload {
    pub disable_alerting: bool,
    pub display_name: String,
    pub wild_value: String,
}
