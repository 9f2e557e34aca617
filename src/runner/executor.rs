use crate::Result;
use crate::curl::RequestDescriptor;
use crate::http::{Client, Request, Response};
use crate::output::OutputApi;
use crate::output::recorder::{record_failure, record_response};

/// 发送解析后的请求，并按会话记录输出
pub struct RequestRunner {
    client: Client,
    outputs: OutputApi,
}

impl RequestRunner {
    pub fn new(client: Client, outputs: OutputApi) -> Self {
        Self { client, outputs }
    }

    pub fn outputs(&self) -> &OutputApi {
        &self.outputs
    }

    /// 执行单个请求
    ///
    /// 成功和失败都会记录到会话输出中，失败时仍返回错误。
    pub async fn run(&self, session_id: &str, descriptor: &RequestDescriptor) -> Result<Response> {
        // 转换为 Request
        let request = match Request::try_from(descriptor) {
            Ok(req) => req,
            Err(e) => {
                record_failure(
                    &self.outputs,
                    session_id,
                    descriptor,
                    &format!("Failed to build request: {}", e),
                );
                return Err(e);
            }
        };

        // 执行请求
        match self.client.execute(request).await {
            Ok(response) => {
                record_response(&self.outputs, session_id, descriptor, &response);
                Ok(response)
            }
            Err(e) => {
                record_failure(
                    &self.outputs,
                    session_id,
                    descriptor,
                    &format!("Request failed: {}", e),
                );
                Err(e)
            }
        }
    }
}
