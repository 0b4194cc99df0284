pub mod background;
pub mod http;
pub mod memory;
pub mod remote;

use std::sync::Arc;

use domain::models::UserDirectory;
use settings::AppSettings;

use crate::{background::BackgroundTaskRunner, memory::MemoryItemStore};

#[derive(Clone)]
pub struct AppState {
    pub app_settings: AppSettings,
    /// 起動時に構築し、以後変更しないユーザーディレクトリ
    pub directory: Arc<UserDirectory>,
    /// リモートサービスを呼び出すHTTPクライアント
    pub http_client: reqwest::Client,
    pub item_store: MemoryItemStore,
    pub background_tasks: BackgroundTaskRunner,
}
