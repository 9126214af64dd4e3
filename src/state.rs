use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::inference::StemSeparator;
use crate::infrastructure::storage::ObjectStorage;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: Arc<dyn ObjectStorage>,
    pub separator: Arc<dyn StemSeparator>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn ObjectStorage>,
        separator: Arc<dyn StemSeparator>,
    ) -> Self {
        Self {
            config,
            storage,
            separator,
        }
    }
}
