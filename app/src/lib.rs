pub mod routes;

use std::sync::Arc;

use anyhow::Context as _;
use config::Config;
use tokio::net::TcpListener;
use tracing::{Subscriber, subscriber::set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt as _};

use domain::models::{User, UserDirectory, UserKey};
use infra::{AppState, background::BackgroundTaskRunner, memory::MemoryItemStore};
use settings::{AppSettings, DirectorySettings, HttpSettings};

pub fn load_app_settings(path: &str) -> anyhow::Result<AppSettings> {
    let config = Config::builder()
        .add_source(config::File::with_name(path))
        .build()
        .context("Failed to read the app_settings.toml file")?;
    config
        .try_deserialize()
        .context("The contents of the app_settings.toml file is incorrect")
}

pub async fn bind_address(settings: &HttpSettings) -> anyhow::Result<(TcpListener, u16)> {
    let listener = TcpListener::bind(settings.bind_address())
        .await
        .context("Failed to bind to the address for the HTTP server")?;
    let port = listener
        .local_addr()
        .context("Failed to get the port of listener")?
        .port();

    Ok((listener, port))
}

/// リモートサービスの呼び出しで共有するHTTPクライアントを作成する。
///
/// タイムアウトはリクエストごとに設定する。
pub fn create_http_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .build()
        .context("Failed to create the HTTP client")
}

/// ユーザーディレクトリを構築する。
///
/// 設定にユーザーが登録されていない場合は、既定のユーザーディレクトリを返す。
pub fn create_user_directory(settings: &DirectorySettings) -> UserDirectory {
    let directory = UserDirectory::new(settings.users.iter().map(|user| {
        (
            UserKey::from(user.key.as_str()),
            User::new(user.name.as_str(), user.surname.as_str()),
        )
    }));
    if directory.is_empty() {
        return UserDirectory::default();
    }
    directory
}

/// アプリケーションの状態を作成する。
///
/// リモートサービスのURLが不正な場合はエラーを返す。
pub fn create_app_state(app_settings: AppSettings) -> anyhow::Result<AppState> {
    reqwest::Url::parse(&app_settings.remote_users.url)
        .context("The URL of the remote users service is invalid")?;
    reqwest::Url::parse(&app_settings.tracking.uri)
        .context("The URI of the tracking service is invalid")?;

    let directory = Arc::new(create_user_directory(&app_settings.directory));
    let http_client = create_http_client()?;
    let background_tasks = BackgroundTaskRunner::new(app_settings.background_task.delay());

    Ok(AppState {
        app_settings,
        directory,
        http_client,
        item_store: MemoryItemStore::new(),
        background_tasks,
    })
}

pub fn get_subscriber<Sink>(
    name: String,
    log_level: log::Level,
    sink: Sink,
) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) {
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}
