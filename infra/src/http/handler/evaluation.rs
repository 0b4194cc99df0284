use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::{Deserialize, Serialize};

use domain::models::{ConfusionMatrixChart, ConfusionMatrixOptions, LineChart};
use use_case::evaluation::{EvaluationUseCase, confusion_matrix as create_confusion_matrix};

use crate::{
    AppState,
    http::{ApiError, ApiResult, bad_request},
    remote::MlflowMetricHistoryRepository,
};

/// 実行の損失曲線を返すハンドラ
#[tracing::instrument(skip(app_state))]
pub async fn loss_curves(
    State(app_state): State<AppState>,
    run_id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<LineChart>> {
    let Path(run_id) = run_id.map_err(|e| bad_request(e.body_text().into()))?;
    let settings = &app_state.app_settings.tracking;
    let metric_repo = MlflowMetricHistoryRepository::new(
        app_state.http_client.clone(),
        settings.uri.clone(),
        settings.timeout(),
        settings.max_results,
        settings.token.clone(),
    );
    let use_case = EvaluationUseCase::new(metric_repo);
    let chart = use_case.loss_curves(&run_id).await.map_err(ApiError::from)?;
    Ok(Json(chart))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfusionMatrixRequestBody {
    /// 正解ラベル
    pub y_true: Vec<usize>,
    /// 予測ラベル
    pub y_pred: Vec<usize>,
    #[serde(flatten)]
    pub options: ConfusionMatrixOptions,
}

/// 混同行列グラフを返すハンドラ
#[tracing::instrument(skip(body))]
pub async fn confusion_matrix(
    body: Result<Json<ConfusionMatrixRequestBody>, JsonRejection>,
) -> ApiResult<Json<ConfusionMatrixChart>> {
    let Json(body) = body.map_err(|e| bad_request(e.body_text().into()))?;
    let chart = create_confusion_matrix(&body.y_true, &body.y_pred, body.options)
        .map_err(ApiError::from)?;
    Ok(Json(chart))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_option_defaults() {
        let body = serde_json::from_str::<ConfusionMatrixRequestBody>(
            r#"{"yTrue": [0, 1], "yPred": [1, 1]}"#,
        )
        .unwrap();
        assert_eq!(body.y_true, vec![0, 1]);
        assert_eq!(body.options, ConfusionMatrixOptions::default());
    }

    #[test]
    fn request_body_with_options() {
        let body = serde_json::from_str::<ConfusionMatrixRequestBody>(
            r#"{"yTrue": [0], "yPred": [0], "classes": ["cat"], "figsize": [4, 3], "textSize": 9}"#,
        )
        .unwrap();
        assert_eq!(body.options.classes, Some(vec![String::from("cat")]));
        assert_eq!(body.options.figsize, [4.0, 3.0]);
        assert_eq!(body.options.text_size, 9);
    }
}
