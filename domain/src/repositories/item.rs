use crate::{
    DomainResult,
    models::{Item, ItemId},
};

/// アイテムリポジトリ
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait ItemRepository: Send + Sync {
    /// アイテムを登録する。
    ///
    /// 同じIDのアイテムが登録されている場合は上書きする。
    async fn create(&self, item: Item) -> DomainResult<Item>;

    /// アイテムを取得する。
    async fn by_id(&self, id: ItemId) -> DomainResult<Option<Item>>;
}
