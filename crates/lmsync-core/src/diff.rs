// Drift detection.
//
// Compares a fully-resolved desired payload against the remote object.
// Asymmetric on purpose: only managed fields participate, and unmanaged
// remote fields never count as drift -- except custom properties, which
// compare symmetrically (see `PropertySet::matches`).

use lmsync_api::models::{Device, DeviceGroup};
use lmsync_api::payload::{DeviceGroupPayload, DevicePayload};

use crate::resource::PropertySet;

/// Whether a device needs an update.
///
/// The remote `hostGroupIds` field is a comma-separated string; the
/// desired single id is compared against its rendering. The desired
/// auto-balanced collector group compares against the remote
/// `preferredCollectorGroupId` -- the server reports the balanced
/// assignment through that field.
pub fn device_changed(desired: &DevicePayload, current: &Device) -> bool {
    desired.disable_alerting != current.disable_alerting
        || desired.description != current.description
        || desired.display_name != current.display_name
        || desired.host_group_ids.to_string() != current.host_group_ids
        || desired.auto_balanced_collector_group_id != current.preferred_collector_group_id
        || !PropertySet::sets_match(&desired.custom_properties, &current.custom_properties)
}

/// Result of diffing a device group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupDiff {
    pub changed: bool,
    /// Alerting was disabled remotely (by an operator) while the spec
    /// wants it enabled. The update must preserve the remote disable,
    /// and the mismatch itself is not drift.
    pub manual_override: bool,
}

pub fn group_diff(desired: &DeviceGroupPayload, current: &DeviceGroup) -> GroupDiff {
    let manual_override = current.disable_alerting && !desired.disable_alerting;
    let effective_disable = if manual_override {
        true
    } else {
        desired.disable_alerting
    };

    let changed = effective_disable != current.disable_alerting
        || desired.description != current.description
        || desired.parent_id != current.parent_id
        || desired.default_collector_group_id != current.default_collector_group_id
        || !PropertySet::sets_match(&desired.custom_properties, &current.custom_properties);

    GroupDiff {
        changed,
        manual_override,
    }
}
