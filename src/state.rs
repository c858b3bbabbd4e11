use std::sync::Arc;

use super::{config::Config, store::SubmissionStore};

pub struct AppState {
    pub config: Config,
    pub store: SubmissionStore,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        Self::with(Config::load())
    }

    pub fn with(config: Config) -> Arc<Self> {
        let store = SubmissionStore::new(&config.submissions_path);

        Arc::new(Self { config, store })
    }
}
