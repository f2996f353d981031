use std::sync::Arc;

use raffle_common::media::MediaStore;
use sea_orm::DatabaseConnection;

use crate::campaign::notifier::Notifier;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub notifier: Arc<dyn Notifier>,
    pub media: Arc<dyn MediaStore>,
}
