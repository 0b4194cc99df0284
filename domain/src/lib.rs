use std::borrow::Cow;

pub mod models;
pub mod repositories;

/// ドメインエラーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    /// 検証エラー
    Validation,
    /// エンティティが存在しない
    NotFound,
    /// リモートサービスの呼び出しに失敗
    Remote,
    /// 予期しないエラー
    Unexpected,
}

/// ドメインエラー
#[derive(Debug, thiserror::Error)]
#[error("{}", .messages.join(", "))]
pub struct DomainError {
    /// エラーの種類
    pub kind: DomainErrorKind,
    /// エラーメッセージ
    pub messages: Vec<Cow<'static, str>>,
    /// エラーの原因
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

/// ドメイン結果
pub type DomainResult<T> = Result<T, DomainError>;

/// メッセージからドメインエラーを作成する。
///
/// # 引数
///
/// * `kind` - エラーの種類
/// * `message` - エラーメッセージ
pub fn domain_error(kind: DomainErrorKind, message: impl Into<Cow<'static, str>>) -> DomainError {
    let message = message.into();
    DomainError {
        kind,
        messages: vec![message.clone()],
        source: anyhow::anyhow!(message).into(),
    }
}

fn starts_or_ends_with_whitespace(s: &str) -> bool {
    s.chars().next().is_some_and(|ch| ch.is_whitespace())
        || s.chars().last().is_some_and(|ch| ch.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_displays_messages() {
        let mut error = domain_error(DomainErrorKind::Validation, "name is empty");
        error.messages.push("description is too long".into());

        assert_eq!(error.kind, DomainErrorKind::Validation);
        assert_eq!(
            error.to_string(),
            "name is empty, description is too long"
        );
    }

    #[test]
    fn domain_error_keeps_message_as_source() {
        let error = domain_error(DomainErrorKind::NotFound, "item not found");
        assert_eq!(error.source.to_string(), "item not found");
    }

    #[rstest::rstest]
    #[case("foo", false)]
    #[case(" foo", true)]
    #[case("foo ", true)]
    #[case("f o o", false)]
    #[case("", false)]
    fn whitespace_edges(#[case] s: &str, #[case] expected: bool) {
        assert_eq!(starts_or_ends_with_whitespace(s), expected);
    }
}
