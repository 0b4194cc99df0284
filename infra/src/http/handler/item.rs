use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use domain::{
    DomainError, DomainResult,
    models::{Item, ItemDescription, ItemId, ItemName},
};
use use_case::item::ItemUseCase;

use crate::{
    AppState,
    http::{ApiError, ApiResult, bad_request, not_found},
    memory::MemoryItemRepository,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequestBody {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl TryFrom<CreateItemRequestBody> for Item {
    type Error = DomainError;

    fn try_from(body: CreateItemRequestBody) -> DomainResult<Self> {
        Ok(Item {
            id: ItemId(body.id),
            name: ItemName::new(body.name)?,
            description: ItemDescription::new(body.description)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponseBody {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl From<Item> for ItemResponseBody {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.0,
            name: item.name.0,
            description: item.description.0,
        }
    }
}

/// アイテム登録ハンドラ
///
/// 同じIDのアイテムが登録されている場合は上書きする。
#[tracing::instrument(skip(app_state))]
pub async fn create(
    State(app_state): State<AppState>,
    body: Result<Json<CreateItemRequestBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ItemResponseBody>)> {
    let Json(body) = body.map_err(|e| bad_request(e.body_text().into()))?;
    let item = Item::try_from(body).map_err(ApiError::from)?;
    let use_case = item_use_case(&app_state);
    let item = use_case.create(item).await.map_err(ApiError::from)?;
    Ok((StatusCode::CREATED, Json(ItemResponseBody::from(item))))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadItemRequestBody {
    pub id: i64,
}

/// アイテム取得ハンドラのレスポンスボディ
///
/// IDは含まない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadItemResponseBody {
    pub name: String,
    pub description: String,
}

impl From<Item> for ReadItemResponseBody {
    fn from(item: Item) -> Self {
        Self {
            name: item.name.0,
            description: item.description.0,
        }
    }
}

/// アイテム取得ハンドラ
#[tracing::instrument(skip(app_state))]
pub async fn read(
    State(app_state): State<AppState>,
    body: Result<Json<ReadItemRequestBody>, JsonRejection>,
) -> ApiResult<Json<ReadItemResponseBody>> {
    let Json(body) = body.map_err(|e| bad_request(e.body_text().into()))?;
    let use_case = item_use_case(&app_state);
    let item = use_case
        .by_id(ItemId(body.id))
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| not_found("Item"))?;
    Ok(Json(ReadItemResponseBody::from(item)))
}

fn item_use_case(app_state: &AppState) -> ItemUseCase<MemoryItemRepository> {
    let item_repo = MemoryItemRepository::new(app_state.item_store.clone());
    ItemUseCase::new(item_repo)
}
