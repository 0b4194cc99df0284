use serde::{Deserialize, Serialize};

/// 事前に定義されたパスパラメーター
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredefinedParameter {
    Value1,
    Value2,
    Value3,
}

impl std::fmt::Display for PredefinedParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::Value1 => "value1",
            Self::Value2 => "value2",
            Self::Value3 => "value3",
        };
        write!(f, "{}", value)
    }
}

impl PredefinedParameter {
    /// パスパラメーターを説明するメッセージを返す。
    pub fn message(self) -> &'static str {
        match self {
            Self::Value1 => "This is the first predefined value",
            Self::Value2 => "This is the second predefined value",
            Self::Value3 => "This is the third predefined value",
        }
    }
}
