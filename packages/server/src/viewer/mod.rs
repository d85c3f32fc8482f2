mod controller;
mod error;
mod selection;
mod settings;

pub use controller::{SelectionController, ServedAsset, Transition};
pub use error::ViewerError;
pub use selection::{SelectionState, ViewerSource};
pub use settings::{SettingsUpdate, ViewerSettings};

/// Everything persisted for one component instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstanceRecord {
    pub settings: ViewerSettings,
    pub selection: SelectionState,
}
