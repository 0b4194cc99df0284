use anyhow::Context as _;

use app::{
    bind_address, create_app_state, get_subscriber, init_subscriber, load_app_settings,
    routes::create_router,
};

/// アプリケーションエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // アプリケーション設定を読み込み
    let app_settings = load_app_settings("app_settings.toml")?;

    // サブスクライバーを初期化
    let subscriber = get_subscriber("app".into(), app_settings.log.level, std::io::stdout);
    init_subscriber(subscriber);
    tracing::debug!("App settings: {:?}", app_settings);

    // ルーターを作成
    let (listener, port) = bind_address(&app_settings.http).await?;
    let app_state = create_app_state(app_settings.clone())?;
    let router = create_router(app_state);

    // HTTPサーバーを起動
    tracing::info!("HTTP server is running on port {}", port);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to start the HTTP server")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for the shutdown signal: {}", e);
    }
    tracing::info!("Shutting down the HTTP server");
}
