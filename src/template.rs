//! 请求模板：保存的示例参数，应用到解析后的请求上

use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;
use crate::curl::RequestDescriptor;
use crate::json::parse_relaxed;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeTemplate {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_params: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_params: Option<Map<String, Value>>,
}

impl RecipeTemplate {
    /// 模板以宽松 JSON (JSON5) 保存
    pub fn from_relaxed_str(content: &str) -> Result<Self> {
        let value = parse_relaxed(content)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_relaxed_str(&content)
    }

    /// 将模板应用到请求
    ///
    /// 模板请求体替换原请求体，GET 随之变为 POST；
    /// URL 中的 `{name}` 占位符替换为 `urlParams` 的值，
    /// `queryParams` 追加到查询字符串。
    pub fn apply(&self, request: &mut RequestDescriptor) {
        if let Some(body) = &self.request_body {
            request.body = Some(body.clone());
            if request.method.eq_ignore_ascii_case("GET") {
                request.method = "POST".to_string();
            }
        }

        if let Some(params) = &self.url_params {
            request.url = substitute_url_params(&request.url, params);
        }

        if let Some(params) = self.query_params.as_ref().filter(|p| !p.is_empty()) {
            request.url = append_query(&request.url, params);
        }
    }
}

fn param_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn substitute_url_params(url: &str, params: &Map<String, Value>) -> String {
    static PARAM_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = PARAM_REGEX.get_or_init(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

    re.replace_all(url, |caps: &Captures| {
        params
            .get(&caps[1])
            .map(param_to_string)
            .unwrap_or_else(|| caps[0].to_string())
    })
    .to_string()
}

fn append_query(url: &str, params: &Map<String, Value>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, &param_to_string(value));
    }
    let query = serializer.finish();

    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    };

    let mut result = format!("{}{}{}", base, separator, query);
    if let Some(fragment) = fragment {
        result.push('#');
        result.push_str(fragment);
    }
    result
}
