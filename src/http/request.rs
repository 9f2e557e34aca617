use reqwest::header::{CONTENT_TYPE, HeaderMap as Headers, HeaderName, HeaderValue};

use crate::curl::RequestDescriptor;
use crate::http::types::{Method, normalize_url};
use crate::{RecipeError, Result};

/// 可直接发送的请求
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: url::Url,
    pub headers: Headers,
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: &str, url: &str) -> Result<Self> {
        Ok(Self {
            method: method.parse()?,
            url: normalize_url(url)?,
            headers: Headers::new(),
            body: None,
        })
    }

    /// 从 curl 解析结果构建请求，校验方法、URL 与请求头
    pub fn from_descriptor(descriptor: &RequestDescriptor) -> Result<Self> {
        let mut request = Self::new(&descriptor.method, &descriptor.url)?;

        for (key, value) in &descriptor.headers {
            request.insert_header(key, value)?;
        }

        if let Some(body) = &descriptor.body {
            request.body = Some(serde_json::to_string(body)?);
            if !request.headers.contains_key(CONTENT_TYPE) {
                request
                    .headers
                    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
        }

        Ok(request)
    }

    fn insert_header(&mut self, key: &str, value: &str) -> Result<()> {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| RecipeError::ParseError(format!("Invalid header name {}: {}", key, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| RecipeError::ParseError(format!("Invalid header value for {}: {}", key, e)))?;
        self.headers.insert(name, value);
        Ok(())
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Result<Self> {
        self.insert_header(key, value)?;
        Ok(self)
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.body = Some(text.to_owned());
        self
    }
}

impl TryFrom<&RequestDescriptor> for Request {
    type Error = RecipeError;

    fn try_from(descriptor: &RequestDescriptor) -> Result<Self> {
        Self::from_descriptor(descriptor)
    }
}
