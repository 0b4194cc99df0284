use std::time::Duration;

use enum_display::EnumDisplay;
use secrecy::SecretString;
use serde::Deserialize;

/// アプリケーション設定
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// HTTPサーバー設定
    pub http: HttpSettings,
    /// ログ設定
    pub log: LogSettings,
    /// ユーザーディレクトリ設定
    #[serde(default)]
    pub directory: DirectorySettings,
    /// リモートユーザー一覧設定
    pub remote_users: RemoteUsersSettings,
    /// 実験管理サービス設定
    pub tracking: TrackingSettings,
    /// バックグラウンドタスク設定
    pub background_task: BackgroundTaskSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, EnumDisplay)]
#[serde(rename = "protocol")]
#[serde(rename_all = "lowercase")]
#[enum_display(case = "Lower")]
pub enum HttpProtocol {
    /// HTTPプロトコル
    Http,
    /// HTTPSプロトコル
    Https,
}

/// HTTPサーバー設定
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// プロトコル
    pub protocol: HttpProtocol,
    /// ホスト名
    pub host: String,
    /// ポート番号
    pub port: u16,
}

/// ログ設定
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LogSettings {
    /// ログレベル
    ///
    /// `TRACE`、`DEBUG`、`INFO`、`WARN`または`ERROR`を大文字で指定する。
    /// 環境変数`RUST_LOG`が設定されている場合は、環境変数が優先される。
    pub level: log::Level,
}

/// ユーザーディレクトリ設定
///
/// プロセスの起動時に一度だけ読み込まれ、以後変更されない。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectorySettings {
    /// ディレクトリに登録するユーザー
    #[serde(default)]
    pub users: Vec<DirectoryUserSettings>,
}

/// ユーザーディレクトリに登録するユーザー
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryUserSettings {
    /// キー
    pub key: String,
    /// 名前
    pub name: String,
    /// 苗字
    pub surname: String,
}

/// リモートユーザー一覧設定
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUsersSettings {
    /// ユーザー一覧を返すURL
    pub url: String,
    /// リクエストタイムアウト（秒）
    pub timeout: u64,
}

/// 実験管理サービス設定
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingSettings {
    /// 実験管理サービスのURI
    pub uri: String,
    /// リクエストタイムアウト（秒）
    pub timeout: u64,
    /// メトリクス履歴を取得するときの1ページあたりの最大件数
    pub max_results: u32,
    /// Bearerトークン
    #[serde(default)]
    pub token: Option<SecretString>,
}

/// バックグラウンドタスク設定
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BackgroundTaskSettings {
    /// タスクが完了するまでの時間（秒）
    pub delay: u64,
}

impl HttpSettings {
    /// バインドするアドレス（ホスト名とポート番号）を返す。
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// オリジン（プロトコル、ホスト名及びポート番号）を返す。
    pub fn origin(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

impl RemoteUsersSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl TrackingSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl BackgroundTaskSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use secrecy::ExposeSecret as _;

    const SETTINGS: &str = r#"
        [http]
        protocol = "http"
        host = "127.0.0.1"
        port = 8000

        [log]
        level = "INFO"

        [[directory.users]]
        key = "user1"
        name = "John"
        surname = "Doe"

        [remote_users]
        url = "https://jsonplaceholder.typicode.com/users"
        timeout = 10

        [tracking]
        uri = "http://127.0.0.1:5000"
        timeout = 30
        max_results = 1000
        token = "secret"

        [background_task]
        delay = 5
    "#;

    fn load(source: &str) -> AppSettings {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn deserialize_app_settings() {
        let settings = load(SETTINGS);

        assert_eq!(settings.http.protocol, HttpProtocol::Http);
        assert_eq!(settings.http.bind_address(), "127.0.0.1:8000");
        assert_eq!(settings.log.level, log::Level::Info);
        assert_eq!(settings.directory.users.len(), 1);
        assert_eq!(settings.directory.users[0].key, "user1");
        assert_eq!(settings.remote_users.timeout(), Duration::from_secs(10));
        assert_eq!(settings.tracking.max_results, 1000);
        assert_eq!(
            settings.tracking.token.as_ref().map(|t| t.expose_secret()),
            Some("secret")
        );
        assert_eq!(settings.background_task.delay(), Duration::from_secs(5));
    }

    #[test]
    fn directory_and_token_are_optional() {
        let source = SETTINGS
            .replace("token = \"secret\"", "")
            .replace("[[directory.users]]", "")
            .replace("key = \"user1\"", "")
            .replace("name = \"John\"", "")
            .replace("surname = \"Doe\"", "");
        let settings = load(&source);

        assert!(settings.directory.users.is_empty());
        assert!(settings.tracking.token.is_none());
    }

    #[test]
    fn deserialize_workspace_app_settings() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../app_settings.toml");
        let settings: AppSettings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.log.level, log::Level::Info);
        assert_eq!(settings.directory.users.len(), 2);
    }

    #[rstest::rstest]
    #[case(HttpProtocol::Http, "http://localhost:8000")]
    #[case(HttpProtocol::Https, "https://localhost:8000")]
    fn origin(#[case] protocol: HttpProtocol, #[case] expected: &str) {
        let settings = HttpSettings {
            protocol,
            host: String::from("localhost"),
            port: 8000,
        };
        assert_eq!(settings.origin(), expected);
    }
}
