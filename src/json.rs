//! 宽松 JSON 解析
//!
//! 从文档中复制的请求体往往不是严格的 JSON (键不带引号、单引号字符串、
//! 结尾逗号)，这里按 JSON5 解析为 [`serde_json::Value`]。

use crate::Result;
use serde_json::Value;

/// 解析宽松 JSON 文本
pub fn parse_relaxed(input: &str) -> Result<Value> {
    let value = json5::from_str::<Value>(input)?;
    Ok(value)
}
