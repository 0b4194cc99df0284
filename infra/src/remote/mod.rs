//! リモートサービスを呼び出すリポジトリ
mod tracking;
mod user;

pub use tracking::*;
pub use user::*;

#[cfg(test)]
pub(crate) mod testing {
    use axum::Router;
    use tokio::net::TcpListener;

    /// ランダムなポートでスタブサーバーを起動して、オリジンを返す。
    pub async fn spawn_stub(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", address)
    }
}
