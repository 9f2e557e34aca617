use std::fmt;
use std::str::FromStr;

use crate::{RecipeError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl FromStr for Method {
    type Err = RecipeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            _ => Err(RecipeError::ParseError(format!(
                "Invalid HTTP method: {}",
                s
            ))),
        }
    }
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 默认 host，当 URL 中未指定 host 时使用
const DEFAULT_HOST: &str = "localhost";
/// 默认 scheme，当 URL 中未指定 scheme 时使用
const DEFAULT_SCHEME: &str = "http";

/// 规范化并解析 URL
///
/// 支持的简化格式:
/// 1. ":3000/api" -> "http://localhost:3000/api"
/// 2. "example.com/path" -> "http://example.com/path"
/// 3. "https://:8080" -> "https://localhost:8080"
pub fn normalize_url(s: &str) -> Result<url::Url> {
    let input = s.trim();
    if input.is_empty() {
        return Err(RecipeError::InvalidUrl("URL is required".to_string()));
    }

    let normalized = if input.starts_with(':') {
        format!("{}://{}{}", DEFAULT_SCHEME, DEFAULT_HOST, input)
    } else if let Some(pos) = input.find("://") {
        let after_scheme = &input[pos + 3..];
        if after_scheme.starts_with(':') {
            format!("{}://{}{}", &input[..pos], DEFAULT_HOST, after_scheme)
        } else {
            input.to_string()
        }
    } else {
        format!("{}://{}", DEFAULT_SCHEME, input)
    };

    let url = url::Url::parse(&normalized)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(RecipeError::InvalidUrl(format!(
            "Unsupported scheme: {}",
            url.scheme()
        )));
    }
    Ok(url)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(u16);

impl Status {
    pub fn new(code: u16) -> Result<Self> {
        if (100..600).contains(&code) {
            Ok(Self(code))
        } else {
            Err(RecipeError::ParseError(format!(
                "Invalid HTTP status code: {}",
                code
            )))
        }
    }

    pub fn code(&self) -> u16 {
        self.0
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.0)
    }

    pub fn is_redirect(&self) -> bool {
        (300..=399).contains(&self.0)
    }

    pub fn is_client_error(&self) -> bool {
        (400..=499).contains(&self.0)
    }

    pub fn is_server_error(&self) -> bool {
        (500..=599).contains(&self.0)
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}
