use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::task::JoinHandle;

/// バックグラウンドタスクランナー
///
/// レスポンスを返した後も実行を続ける、長時間かかるタスクを模擬する。
#[derive(Debug, Clone)]
pub struct BackgroundTaskRunner {
    delay: Duration,
    completed: Arc<AtomicU64>,
}

impl BackgroundTaskRunner {
    /// # 引数
    ///
    /// * `delay` - タスクが完了するまでの時間
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            completed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// 指定された時間だけ待機した後に完了する、偽のタスクを開始する。
    pub fn spawn_fake_task(&self) -> JoinHandle<()> {
        let delay = self.delay;
        let completed = Arc::clone(&self.completed);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            completed.fetch_add(1, Ordering::SeqCst);
            tracing::info!("Fake background task completed");
        })
    }

    /// 完了したタスクの数を返す。
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }
}
