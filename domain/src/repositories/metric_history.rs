use crate::{DomainResult, models::MetricPoint};

/// メトリクス履歴リポジトリ
///
/// 実験管理サービスに記録された、実行（run）ごとのメトリクスの履歴を取得する。
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait MetricHistoryRepository: Send + Sync {
    /// メトリクスの履歴を取得する。
    ///
    /// # 引数
    ///
    /// * `run_id` - 実行ID
    /// * `key` - メトリクスキー
    async fn history(&self, run_id: &str, key: &str) -> DomainResult<Vec<MetricPoint>>;
}
