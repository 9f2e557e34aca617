use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::types::Method;

/// 默认请求方法
pub const DEFAULT_METHOD: &str = "GET";

/// curl 命令解析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// 原样保留的方法字符串，`-X post` 得到 "post"
    pub method: String,

    /// 请求 URL，未找到时为空字符串
    pub url: String,

    /// 请求头，重复的名称后者覆盖前者
    pub headers: HashMap<String, String>,

    /// 由 `-d` 解析出的请求体
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Default for RequestDescriptor {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            url: String::new(),
            headers: HashMap::new(),
            body: None,
        }
    }
}

impl RequestDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 将原样保留的方法解析为已知的 HTTP 方法
    pub fn method_kind(&self) -> Option<Method> {
        self.method.parse().ok()
    }

    /// 按名称查找请求头 (忽略大小写)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let descriptor = RequestDescriptor::new();
        assert_eq!(descriptor.method, "GET");
        assert!(descriptor.url.is_empty());
        assert!(descriptor.headers.is_empty());
        assert!(descriptor.body.is_none());
        assert!(!descriptor.has_url());
    }

    #[test]
    fn test_method_kind() {
        let mut descriptor = RequestDescriptor::new();
        descriptor.method = "patch".to_string();
        assert_eq!(descriptor.method_kind(), Some(Method::Patch));

        descriptor.method = "PURGE".to_string();
        assert_eq!(descriptor.method_kind(), None);
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut descriptor = RequestDescriptor::new();
        descriptor
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());

        assert_eq!(descriptor.header("content-type"), Some("application/json"));
        assert_eq!(descriptor.header("Accept"), None);
    }

    #[test]
    fn test_serialize_skips_missing_body() {
        let descriptor = RequestDescriptor::new();
        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(value, json!({"method": "GET", "url": "", "headers": {}}));
    }
}
