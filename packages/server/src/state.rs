use std::sync::Arc;

use evaluator::Evaluator;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub evaluator: Arc<Evaluator>,
}
