// Desired-state specs.
//
// These are the operator-facing descriptions of what should exist
// remotely. They carry names, not ids: every cross-reference (host
// group, collector group, netflow collector, parent group) is a
// human-readable name resolved at reconcile time.

use serde::{Deserialize, Serialize};

use lmsync_api::models::Property;

/// Whether a resource should exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Present,
    Absent,
}

/// Custom properties attached to a device or group.
///
/// Equality with a remote property list is symmetric containment: the
/// sets match only when every desired pair exists remotely *and* every
/// remote pair is desired. Order never matters; an extra remote
/// property is drift just like a missing one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertySet(Vec<Property>);

impl PropertySet {
    pub fn new(properties: Vec<Property>) -> Self {
        Self(properties)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Property] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<Property> {
        self.0.clone()
    }

    /// Symmetric double-containment comparison against a remote list.
    pub fn matches(&self, current: &[Property]) -> bool {
        Self::sets_match(&self.0, current)
    }

    /// Symmetric double-containment between two bare property lists.
    /// The single home of the rule; the differ compares payload lists
    /// through it too.
    pub fn sets_match(desired: &[Property], current: &[Property]) -> bool {
        desired.iter().all(|p| current.contains(p)) && current.iter().all(|p| desired.contains(p))
    }
}

impl FromIterator<Property> for PropertySet {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Desired state of a monitored device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSpec {
    /// Hostname or IP; the remote identity key.
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Host group name; `None` places the device under the root group.
    #[serde(default)]
    pub host_group: Option<String>,
    /// Auto-balanced collector group, by name. Required; a miss is fatal.
    pub collector_group: String,
    #[serde(default)]
    pub properties: PropertySet,
    #[serde(default)]
    pub alert_disable: bool,
    /// Netflow collector, by its description field. Enables netflow when
    /// set.
    #[serde(default)]
    pub netflow_collector: Option<String>,
}

/// Desired state of a device group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceGroupSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Parent group name; `None` parents under the root group.
    #[serde(default)]
    pub parent_group: Option<String>,
    pub collector_group: String,
    #[serde(default)]
    pub properties: PropertySet,
    #[serde(default)]
    pub alert_disable: bool,
}

/// One alert-tuning edit, addressed down the
/// device → datasource → instance → datapoint chain.
///
/// With `datapoint` set, the edit targets that datapoint's alert
/// setting (threshold update when `threshold` is set, alert toggle
/// otherwise). Without it, the edit toggles alerting on the whole
/// instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuningSpec {
    /// Device, addressed by *display name* (not hostname).
    pub device_display_name: String,
    pub datasource: String,
    pub instance: String,
    #[serde(default)]
    pub datapoint: Option<String>,
    /// Alert expression, e.g. `"> 95 98"`. Only meaningful with
    /// `datapoint`.
    #[serde(default)]
    pub threshold: Option<String>,
    #[serde(default)]
    pub alert_disable: bool,
}
