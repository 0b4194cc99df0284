use axum::{
    Json,
    extract::{
        Path, Query,
        rejection::{PathRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize};

use domain::models::PredefinedParameter;

use super::MessageResponseBody;
use crate::http::{ApiResult, bad_request};

/// パスパラメーターの説明を返すハンドラ
///
/// `/path_parameters/{p}`よりも優先して照合される。
#[tracing::instrument()]
pub async fn about() -> Json<MessageResponseBody> {
    Json(MessageResponseBody::new(
        "This route is used to demonstrate how to access path parameters",
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathParameterResponseBody {
    pub path_parameter: i64,
}

/// 整数のパスパラメーターを返すハンドラ
#[tracing::instrument()]
pub async fn path_parameter(
    p: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<PathParameterResponseBody>> {
    let Path(p) = p.map_err(|e| bad_request(e.body_text().into()))?;
    Ok(Json(PathParameterResponseBody { path_parameter: p }))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredefinedParameterResponseBody {
    pub parameter: PredefinedParameter,
    pub message: String,
}

/// 事前に定義されたパスパラメーターを返すハンドラ
#[tracing::instrument()]
pub async fn predefined_path_parameter(
    p: Result<Path<PredefinedParameter>, PathRejection>,
) -> ApiResult<Json<PredefinedParameterResponseBody>> {
    let Path(parameter) = p.map_err(|e| bad_request(e.body_text().into()))?;
    Ok(Json(PredefinedParameterResponseBody {
        parameter,
        message: parameter.message().to_string(),
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SumQueryParams {
    /// 1つ目の値
    pub q1: i64,
    /// 2つ目の値（省略時は5）
    #[serde(default = "default_q2")]
    pub q2: i64,
}

fn default_q2() -> i64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SumResponseBody {
    pub sum: i64,
}

/// クエリパラメーターの和を返すハンドラ
#[tracing::instrument()]
pub async fn query_parameters(
    query: Result<Query<SumQueryParams>, QueryRejection>,
) -> ApiResult<Json<SumResponseBody>> {
    let Query(SumQueryParams { q1, q2 }) = query.map_err(|e| bad_request(e.body_text().into()))?;
    let sum = q1
        .checked_add(q2)
        .ok_or_else(|| bad_request("The sum of q1 and q2 is out of range".into()))?;
    Ok(Json(SumResponseBody { sum }))
}
