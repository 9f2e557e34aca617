use crate::curl::RequestDescriptor;
use crate::http::Response;
use crate::output::api::OutputApi;
use crate::output::model::{OutputType, SessionOutput};
use chrono::Utc;
use serde_json::Value;
use tracing::warn;

/// 记录请求输出
///
/// 这是一个 Best-effort 操作，如果写入失败会打印警告，但不会返回错误。
pub fn record_response(
    api: &OutputApi,
    session_id: &str,
    request: &RequestDescriptor,
    response: &Response,
) -> SessionOutput {
    let output_type = if response.status.code() >= 400 {
        OutputType::Error
    } else {
        OutputType::Default
    };

    let output = SessionOutput::new(output_type, response.body_value())
        .with_request(request.clone())
        .with_status(response.status.code())
        .with_duration_ms(response.duration.as_millis() as u64);

    save(api, session_id, output)
}

/// 记录未得到响应的请求 (构建失败、网络错误等)
pub fn record_failure(
    api: &OutputApi,
    session_id: &str,
    request: &RequestDescriptor,
    message: &str,
) -> SessionOutput {
    let output = SessionOutput::new(OutputType::Error, Value::String(message.to_string()))
        .with_request(request.clone());

    save(api, session_id, output)
}

/// 返回值与保存的记录一致 (包括时间戳)，保存失败时也带上时间戳
fn save(api: &OutputApi, session_id: &str, output: SessionOutput) -> SessionOutput {
    match api.add_output(session_id, output.clone(), false) {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Failed to save session output: {}", e);
            SessionOutput {
                created_at: Some(Utc::now()),
                ..output
            }
        }
    }
}
