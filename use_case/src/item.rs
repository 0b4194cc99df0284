use domain::{
    DomainResult,
    models::{Item, ItemId},
    repositories::ItemRepository,
};

/// アイテムユースケース
pub struct ItemUseCase<R>
where
    R: ItemRepository,
{
    pub item_repo: R,
}

impl<R> ItemUseCase<R>
where
    R: ItemRepository,
{
    pub fn new(item_repo: R) -> Self {
        Self { item_repo }
    }

    /// アイテムを登録する。
    pub async fn create(&self, item: Item) -> DomainResult<Item> {
        self.item_repo.create(item).await
    }

    /// アイテムを取得する。
    pub async fn by_id(&self, id: ItemId) -> DomainResult<Option<Item>> {
        self.item_repo.by_id(id).await
    }
}
