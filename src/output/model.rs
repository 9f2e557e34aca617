use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::curl::RequestDescriptor;

/// 输出类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    #[default]
    Default,
    Error,
    Void,
    Streaming,
}

impl OutputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Default => "default",
            OutputType::Error => "error",
            OutputType::Void => "void",
            OutputType::Streaming => "streaming",
        }
    }
}

/// 一次请求的输出记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutput {
    /// 唯一 ID (UUID)，相同 ID 的记录会被替换
    pub id: String,

    /// 写入时间，mock 输出不带时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "type")]
    pub output_type: OutputType,

    /// 响应内容 (JSON 或字符串)
    pub output: Value,

    /// 产生该输出的请求
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl SessionOutput {
    pub fn new(output_type: OutputType, output: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: None,
            output_type,
            output,
            request: None,
            status: None,
            duration_ms: None,
        }
    }

    /// 会话没有任何记录时展示的占位输出
    pub fn void() -> Self {
        Self {
            id: String::new(),
            created_at: None,
            output_type: OutputType::Void,
            output: Value::Object(Default::default()),
            request: None,
            status: None,
            duration_ms: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_request(mut self, request: RequestDescriptor) -> Self {
        self.request = Some(request);
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_void(&self) -> bool {
        self.output_type == OutputType::Void
    }
}
