use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumMessage, IntoEnumIterator};

use crate::errors::{Result, ShortyError};

/// How the client proves its session to endpoints that accept either form
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, EnumIter, AsRefStr, EnumMessage,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AuthScheme {
    #[default]
    #[strum(message = "Send the session cookie (browser-style)")]
    Cookie,
    #[strum(message = "Send `Authorization: Bearer <token>`")]
    Bearer,
}

impl std::fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for AuthScheme {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cookie" => Ok(Self::Cookie),
            "bearer" => Ok(Self::Bearer),
            _ => Err(format!(
                "Invalid auth scheme: '{}'. Valid: cookie, bearer",
                s
            )),
        }
    }
}

/// Response contract of `/api/shorten/`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, EnumIter, AsRefStr, EnumMessage,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResponseContract {
    /// v1: the short URL is always the `short_url` field
    #[default]
    #[strum(message = "Only accept the `short_url` field (contract v1)")]
    Canonical,
    /// Accept legacy field names and scan the body for a URL
    #[strum(message = "Accept short_url, shortened_url or url, then scan the body")]
    Lenient,
}

impl std::fmt::Display for ResponseContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for ResponseContract {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "canonical" | "v1" => Ok(Self::Canonical),
            "lenient" => Ok(Self::Lenient),
            _ => Err(format!(
                "Invalid response contract: '{}'. Valid: canonical, lenient",
                s
            )),
        }
    }
}

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - api: backend location, auth scheme, response contract
/// - session: where the session is persisted
/// - analytics: copy confirmation and redirect base
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML > 默认值
    /// ENV 前缀：SHORTY，分隔符：__
    /// 示例：SHORTY__API__BASE_URL=https://sho.rt
    pub fn load_from(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let (path, required) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix("SHORTY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ShortyError::config(format!("Failed to build config: {}", e)))?;

        let config: StaticConfig = settings
            .try_deserialize()
            .map_err(|e| ShortyError::config(format!("Failed to deserialize config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the client cannot work with
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.api.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ShortyError::config(format!(
                "api.base_url must be http or https, got '{}'",
                base.scheme()
            )));
        }
        if let Some(ref redirect) = self.analytics.redirect_base_url {
            url::Url::parse(redirect)?;
        }
        if self.api.timeout_secs == 0 {
            return Err(ShortyError::config("api.timeout_secs must be positive"));
        }
        Ok(())
    }

    /// 生成示例 TOML 配置文件（带可选值说明）
    pub fn generate_sample_config() -> Result<String> {
        let body = toml::to_string_pretty(&Self::default())
            .map_err(|e| ShortyError::serialization(e.to_string()))?;

        let mut header = vec![
            "# shorty configuration".to_string(),
            "# Environment overrides: SHORTY__<SECTION>__<KEY>".to_string(),
            "#".to_string(),
        ];
        header.extend(enum_option_lines::<AuthScheme>("api.auth_scheme"));
        header.extend(enum_option_lines::<ResponseContract>("api.response_contract"));

        Ok(format!("{}\n\n{}", header.join("\n"), body))
    }

    /// 写入示例配置文件，必要时创建父目录
    pub fn write_sample_config<P: AsRef<std::path::Path>>(path: P) -> Result<()> {
        let content = Self::generate_sample_config()?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Base for `<base>/s/<code>` links, falling back to the API host
    pub fn redirect_base(&self) -> &str {
        self.analytics
            .redirect_base_url
            .as_deref()
            .unwrap_or(&self.api.base_url)
    }
}

pub const DEFAULT_CONFIG_PATH: &str = "shorty.toml";

// ========== enum 选项说明 ==========

fn enum_option_lines<E>(key: &str) -> Vec<String>
where
    E: IntoEnumIterator + AsRef<str> + EnumMessage,
{
    let mut lines = vec![format!("# {}:", key)];
    lines.extend(E::iter().map(|v| {
        format!(
            "#   {:<10} {}",
            v.as_ref(),
            v.get_message().unwrap_or_default()
        )
    }));
    lines
}

/// Backend 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub auth_scheme: AuthScheme,
    #[serde(default)]
    pub response_contract: ResponseContract,
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie: String,
}

/// Session 持久化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

/// Analytics screen behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Seconds the "copied" confirmation stays visible
    #[serde(default = "default_copy_notice_secs")]
    pub copy_notice_secs: u64,
    /// CLI 复制后保持剪贴板所有权的秒数（仅 Linux），0 表示不等待
    #[serde(default = "default_clipboard_hold_secs")]
    pub clipboard_hold_secs: u64,
    /// Host that serves `/s/<code>` redirects, defaults to `api.base_url`
    #[serde(default)]
    pub redirect_base_url: Option<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_session_cookie() -> String {
    "sessionid".to_string()
}

fn default_csrf_cookie() -> String {
    "csrftoken".to_string()
}

fn default_store_path() -> String {
    ".shorty/session.json".to_string()
}

fn default_copy_notice_secs() -> u64 {
    3
}

fn default_clipboard_hold_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            auth_scheme: AuthScheme::default(),
            response_contract: ResponseContract::default(),
            session_cookie: default_session_cookie(),
            csrf_cookie: default_csrf_cookie(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            copy_notice_secs: default_copy_notice_secs(),
            clipboard_hold_secs: default_clipboard_hold_secs(),
            redirect_base_url: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.auth_scheme, AuthScheme::Cookie);
        assert_eq!(config.api.response_contract, ResponseContract::Canonical);
        assert_eq!(config.analytics.copy_notice_secs, 3);
        assert_eq!(config.redirect_base(), "http://localhost:8000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_redirect_base_override() {
        let mut config = StaticConfig::default();
        config.analytics.redirect_base_url = Some("https://sho.rt".into());
        assert_eq!(config.redirect_base(), "https://sho.rt");
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = StaticConfig::default();
        config.api.base_url = "ftp://example.com".into();
        assert!(matches!(config.validate(), Err(ShortyError::Config(_))));

        config.api.base_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = StaticConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(AuthScheme::from_str("Bearer").unwrap(), AuthScheme::Bearer);
        assert!(AuthScheme::from_str("basic").is_err());
        assert_eq!(
            ResponseContract::from_str("v1").unwrap(),
            ResponseContract::Canonical
        );
        assert_eq!(
            ResponseContract::from_str("LENIENT").unwrap(),
            ResponseContract::Lenient
        );
    }

    #[test]
    fn test_sample_config_round_trips_through_toml() {
        let sample = StaticConfig::generate_sample_config().unwrap();
        assert!(sample.contains("[api]"));
        assert!(sample.contains("#   cookie     Send the session cookie (browser-style)"));
        assert!(sample.contains("#   lenient    Accept short_url, shortened_url or url"));
        assert!(sample.contains("copy_notice_secs = 3"));
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.api.session_cookie, "sessionid");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("shorty.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://api.sho.rt\"\nauth_scheme = \"bearer\"\n\n[analytics]\ncopy_notice_secs = 10\n",
        )
        .unwrap();

        let config = StaticConfig::load_from(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.api.base_url, "https://api.sho.rt");
        assert_eq!(config.api.auth_scheme, AuthScheme::Bearer);
        assert_eq!(config.analytics.copy_notice_secs, 10);
        assert_eq!(config.session.store_path, ".shorty/session.json");
    }

    #[test]
    fn test_load_from_missing_explicit_file_fails() {
        let result = StaticConfig::load_from(Some("/definitely/not/here/shorty.toml"));
        assert!(matches!(result, Err(ShortyError::Config(_))));
    }
}
