use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use domain::{
    DomainResult,
    models::{Item, ItemId},
    repositories::ItemRepository,
};

/// アイテムのインメモリストア
///
/// プロセス内のすべてのリクエストで共有され、プロセスの終了とともに失われる。
#[derive(Debug, Clone, Default)]
pub struct MemoryItemStore {
    items: Arc<RwLock<HashMap<ItemId, Item>>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録されているアイテムの数を返す。
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

/// インメモリアイテムリポジトリ
pub struct MemoryItemRepository {
    pub store: MemoryItemStore,
}

impl MemoryItemRepository {
    pub fn new(store: MemoryItemStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl ItemRepository for MemoryItemRepository {
    async fn create(&self, item: Item) -> DomainResult<Item> {
        let mut items = self.store.items.write().await;
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn by_id(&self, id: ItemId) -> DomainResult<Option<Item>> {
        let items = self.store.items.read().await;
        Ok(items.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use domain::models::{ItemDescription, ItemName};

    fn item(id: i64, name: &str) -> Item {
        Item {
            id: ItemId(id),
            name: ItemName::new(name.to_string()).unwrap(),
            description: ItemDescription::new(format!("description of {}", name)).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_then_read_item() {
        let repo = MemoryItemRepository::new(MemoryItemStore::new());

        let created = repo.create(item(1, "item1")).await.unwrap();
        let found = repo.by_id(ItemId(1)).await.unwrap();

        assert_eq!(found, Some(created));
        assert!(repo.by_id(ItemId(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_overwrites_item_with_same_id() {
        let repo = MemoryItemRepository::new(MemoryItemStore::new());

        repo.create(item(1, "item1")).await.unwrap();
        repo.create(item(1, "renamed")).await.unwrap();

        let found = repo.by_id(ItemId(1)).await.unwrap().unwrap();
        assert_eq!(&*found.name, "renamed");
        assert_eq!(repo.store.len().await, 1);
    }

    #[tokio::test]
    async fn repositories_share_the_store() {
        let store = MemoryItemStore::new();
        MemoryItemRepository::new(store.clone())
            .create(item(7, "item7"))
            .await
            .unwrap();

        let found = MemoryItemRepository::new(store).by_id(ItemId(7)).await.unwrap();

        assert!(found.is_some());
    }
}
