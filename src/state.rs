use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{config::AppConfig, services::planner::Planner};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub planner: Arc<RwLock<Planner>>,
}

impl AppState {
    pub fn new(config: AppConfig, planner: Planner) -> Self {
        Self {
            config,
            planner: Arc::new(RwLock::new(planner)),
        }
    }
}
