use crate::Result;
use crate::output::{DEFAULT_MAX_OUTPUTS, PLAYGROUND_SESSION_ID};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// 输出目录的环境变量覆盖
pub const OUTPUT_DIR_ENV: &str = "RECIPEUI_OUTPUT_DIR";

/// 完整的配置文件 (recipeui.toml)
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub http: HttpConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 每个会话保留的输出条数
    pub max_entries: usize,
    /// 输出存储目录
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_OUTPUTS,
            dir: PathBuf::from(".recipeui"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 请求超时 (秒)
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 未指定 --session 时使用的会话
    pub default: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default: PLAYGROUND_SESSION_ID.to_string(),
        }
    }
}

impl Config {
    /// 输出目录，环境变量优先
    pub fn output_dir(&self) -> PathBuf {
        std::env::var(OUTPUT_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.output.dir.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "recipeui.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/recipeui/
    pub fn find_and_load() -> Option<Config> {
        Self::find_config_file().and_then(|path| match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                None
            }
        })
    }

    /// 找不到或无法解析时使用默认配置
    pub fn load_or_default() -> Config {
        Self::find_and_load().unwrap_or_default()
    }

    fn find_config_file() -> Option<PathBuf> {
        if let Ok(current) = std::env::current_dir()
            && let Some(path) = Self::search_upwards(&current)
        {
            return Some(path);
        }

        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("recipeui").join(Self::CONFIG_FILE);
        config_path.exists().then_some(config_path)
    }

    fn search_upwards(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(Self::CONFIG_FILE))
            .find(|path| path.exists())
    }
}
