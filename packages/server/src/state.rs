use std::sync::Arc;

use crate::config::AppConfig;
use crate::repository::InstanceRepository;
use crate::viewer::SelectionController;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub controller: Arc<SelectionController>,
    pub instances: Arc<dyn InstanceRepository>,
}
