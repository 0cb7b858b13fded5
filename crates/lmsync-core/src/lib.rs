//! Reconciliation engine: desired-state specs, name resolution, drift
//! detection, and the create/update/delete state machine.
//!
//! The flow for a managed resource is always the same: resolve the
//! remote object by name, resolve every name reference in the spec to
//! its numeric id, diff desired against current, then apply whichever
//! transition the diff and the intent call for. Alert tuning is the one
//! exception -- it resolves a chain of parents and applies
//! unconditionally.

pub mod diff;
pub mod error;
pub mod outcome;
pub mod reconcile;
pub mod resolve;
pub mod resource;

pub use error::CoreError;
pub use outcome::Outcome;
pub use reconcile::{ReconcilePolicy, Reconciler};
pub use resolve::{ROOT_GROUP_ID, Resolver};
pub use resource::{DeviceGroupSpec, DeviceSpec, Intent, PropertySet, TuningSpec};
