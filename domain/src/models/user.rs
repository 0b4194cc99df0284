use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// ユーザーキー
///
/// 書式の制約を持たない不透明な文字列で、ユーザーディレクトリ内で一意である。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserKey(pub String);

impl From<&str> for UserKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for UserKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザー
///
/// リモートサービスが返すユーザーに含まれる、`name`と`surname`以外のフィールドは無視する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// 名前
    pub name: String,
    /// 苗字
    pub surname: String,
}

impl User {
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
        }
    }
}

/// ユーザーディレクトリ
///
/// 構築時に固定され、以後変更されないユーザーの対応表。
/// 検索は副作用を持たず、同じキーに対して常に同じ結果を返す。
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: HashMap<UserKey, User>,
}

impl UserDirectory {
    /// ユーザーディレクトリを構築する。
    ///
    /// 同じキーが複数含まれる場合は、後に現れたユーザーを登録する。
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (UserKey, User)>,
    {
        Self {
            users: entries.into_iter().collect(),
        }
    }

    /// キーに対応するユーザーを返す。
    ///
    /// キーに対応するユーザーが存在しない場合は`None`を返す。
    pub fn by_key(&self, key: &UserKey) -> Option<&User> {
        self.users.get(key)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new([
            (UserKey::from("user1"), User::new("John", "Doe")),
            (UserKey::from("user2"), User::new("Jane", "Doe")),
        ])
    }
}
