use domain::{
    DomainResult,
    models::{
        ConfusionMatrix, ConfusionMatrixChart, ConfusionMatrixOptions, LineChart, TRAIN_LOSS_KEY,
        VALIDATION_LOSS_KEY,
    },
    repositories::MetricHistoryRepository,
};

/// 評価ユースケース
pub struct EvaluationUseCase<R>
where
    R: MetricHistoryRepository,
{
    pub metric_repo: R,
}

impl<R> EvaluationUseCase<R>
where
    R: MetricHistoryRepository,
{
    pub fn new(metric_repo: R) -> Self {
        Self { metric_repo }
    }

    /// 実行の訓練損失と検証損失の履歴から、損失曲線を作成する。
    pub async fn loss_curves(&self, run_id: &str) -> DomainResult<LineChart> {
        let train = self.metric_repo.history(run_id, TRAIN_LOSS_KEY).await?;
        let validation = self.metric_repo.history(run_id, VALIDATION_LOSS_KEY).await?;
        tracing::debug!(
            train = train.len(),
            validation = validation.len(),
            "loss histories fetched"
        );
        Ok(LineChart::loss_curves(train, validation))
    }
}

/// 正解ラベルと予測ラベルから混同行列グラフを作成する。
pub fn confusion_matrix(
    y_true: &[usize],
    y_pred: &[usize],
    options: ConfusionMatrixOptions,
) -> DomainResult<ConfusionMatrixChart> {
    let matrix = ConfusionMatrix::new(y_true, y_pred)?;
    ConfusionMatrixChart::new(&matrix, options)
}
