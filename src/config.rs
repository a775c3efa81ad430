use serde::{Deserialize, Serialize};

use crate::models::Currency;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub currency: Currency,
    /// 启动时载入演示数据
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            display: DisplayConfig {
                currency: Currency::Mad,
                seed_demo_data: true,
            },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let plain = PlainEnv::read(&env);
        Self {
            server: ServerConfig {
                host: plain.host.unwrap_or(defaults.server.host),
                port: plain.port.unwrap_or(defaults.server.port),
            },
            display: DisplayConfig {
                currency: plain.currency.unwrap_or(defaults.display.currency),
                seed_demo_data: plain.seed.unwrap_or(defaults.display.seed_demo_data),
            },
        }
    }

    /// 分层加载: 默认值 < dashboard.toml (可选) < DASHBOARD_ 前缀环境变量 < 直接环境变量
    ///
    /// 嵌套字段用双下划线, 例如 `DASHBOARD_SERVER__PORT=9000`;
    /// `SERVER_HOST` / `SERVER_PORT` / `DASHBOARD_CURRENCY` / `DASHBOARD_SEED` 优先级最高。
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("dashboard")
    }

    pub fn load_from(file_stem: &str) -> Result<Self, config::ConfigError> {
        Self::load_with(file_stem, env_var)
    }

    fn load_with(
        file_stem: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let plain = PlainEnv::read(&env);
        config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("display.currency", defaults.display.currency.code())?
            .set_default("display.seed_demo_data", defaults.display.seed_demo_data)?
            .add_source(config::File::with_name(file_stem).required(false))
            .add_source(
                config::Environment::with_prefix("DASHBOARD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("server.host", plain.host)?
            .set_override_option("server.port", plain.port.map(i64::from))?
            .set_override_option("display.currency", plain.currency.map(|c| c.code()))?
            .set_override_option("display.seed_demo_data", plain.seed)?
            .build()?
            .try_deserialize()
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// 直接环境变量, 无法解析的值视为未设置
struct PlainEnv {
    host: Option<String>,
    port: Option<u16>,
    currency: Option<Currency>,
    seed: Option<bool>,
}

impl PlainEnv {
    fn read(env: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: env("SERVER_HOST"),
            port: env("SERVER_PORT").and_then(|p| p.trim().parse().ok()),
            currency: env("DASHBOARD_CURRENCY").and_then(|c| c.parse().ok()),
            seed: env("DASHBOARD_SEED").and_then(|s| s.trim().parse().ok()),
        }
    }
}
