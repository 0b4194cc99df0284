use std::sync::Arc;

use domain::{
    models::{User, UserDirectory, UserKey},
    repositories::{RemoteUserListError, RemoteUserRepository},
};

/// ユーザーユースケース
pub struct UserUseCase<R>
where
    R: RemoteUserRepository,
{
    /// ユーザーディレクトリ
    pub directory: Arc<UserDirectory>,
    /// リモートユーザーリポジトリ
    pub remote_repo: R,
}

impl<R> UserUseCase<R>
where
    R: RemoteUserRepository,
{
    pub fn new(directory: Arc<UserDirectory>, remote_repo: R) -> Self {
        Self {
            directory,
            remote_repo,
        }
    }

    /// キーに対応するユーザーを返す。
    ///
    /// ユーザーが存在しない場合はエラーではなく`None`を返す。
    pub fn by_key(&self, key: &UserKey) -> Option<User> {
        self.directory.by_key(key).cloned()
    }

    /// リモートサービスからユーザーのリストを取得する。
    ///
    /// リモートサービスの呼び出しに失敗した場合、エラーをそのまま呼び出し元に返す。
    pub async fn list_remote(&self) -> Result<Vec<User>, RemoteUserListError> {
        self.remote_repo.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use domain::repositories::MockRemoteUserRepository;
    use rstest::{fixture, rstest};

    #[fixture]
    fn directory() -> Arc<UserDirectory> {
        Arc::new(UserDirectory::default())
    }

    #[rstest]
    #[case("user1", Some(User::new("John", "Doe")))]
    #[case("user2", Some(User::new("Jane", "Doe")))]
    #[case("user3", None)]
    fn by_key(directory: Arc<UserDirectory>, #[case] key: &str, #[case] expected: Option<User>) {
        // ディレクトリの検索はリモートサービスを呼び出さない
        let mut remote_repo = MockRemoteUserRepository::new();
        remote_repo.expect_list().never();
        let use_case = UserUseCase::new(directory, remote_repo);

        let key = UserKey::from(key);
        assert_eq!(use_case.by_key(&key), expected);
        assert_eq!(use_case.by_key(&key), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn list_remote_returns_users(directory: Arc<UserDirectory>) {
        let mut remote_repo = MockRemoteUserRepository::new();
        remote_repo
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![User::new("John", "Doe")]));
        let use_case = UserUseCase::new(directory, remote_repo);

        let users = use_case.list_remote().await.unwrap();

        assert_eq!(users, vec![User::new("John", "Doe")]);
    }

    #[rstest]
    #[case(400)]
    #[case(404)]
    #[case(500)]
    #[tokio::test]
    async fn list_remote_propagates_status_error(
        directory: Arc<UserDirectory>,
        #[case] status: u16,
    ) {
        let mut remote_repo = MockRemoteUserRepository::new();
        remote_repo
            .expect_list()
            .times(1)
            .returning(move || Err(RemoteUserListError::Status(status)));
        let use_case = UserUseCase::new(directory, remote_repo);

        let error = use_case.list_remote().await.unwrap_err();

        assert_eq!(error, RemoteUserListError::Status(status));
        assert_eq!(error.to_string(), format!("Error: {}", status));
    }

    #[rstest]
    #[tokio::test]
    async fn list_remote_sends_one_request_per_call(directory: Arc<UserDirectory>) {
        let mut remote_repo = MockRemoteUserRepository::new();
        remote_repo
            .expect_list()
            .times(2)
            .returning(|| Err(RemoteUserListError::Transport(String::from("timed out"))));
        let use_case = UserUseCase::new(directory, remote_repo);

        assert!(use_case.list_remote().await.is_err());
        assert!(use_case.list_remote().await.is_err());
    }
}
