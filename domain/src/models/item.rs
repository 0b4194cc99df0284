use garde::Validate as _;
use serde::{Deserialize, Serialize};

use crate::impl_string_primitive;

/// アイテムID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// アイテム名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, garde::Validate)]
#[serde(transparent)]
pub struct ItemName(#[garde(length(chars, min = 1, max = 100))] pub String);
impl_string_primitive!(ItemName);

/// アイテムの説明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, garde::Validate)]
#[serde(transparent)]
pub struct ItemDescription(#[garde(length(chars, max = 400))] pub String);
impl_string_primitive!(ItemDescription);

/// アイテム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// ID
    pub id: ItemId,
    /// 名前
    pub name: ItemName,
    /// 説明
    pub description: ItemDescription,
}
