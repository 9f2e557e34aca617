use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("无效的 URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP 请求失败: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("JSON5 解析错误: {0}")]
    RelaxedJsonError(#[from] json5::Error),

    #[error("URL 解析错误: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for RecipeError {
    fn from(err: anyhow::Error) -> Self {
        RecipeError::Other(err.to_string())
    }
}

impl From<toml::de::Error> for RecipeError {
    fn from(err: toml::de::Error) -> Self {
        RecipeError::ConfigError(err.to_string())
    }
}

/// Result type for recipeui crate
pub type Result<T> = std::result::Result<T, RecipeError>;
