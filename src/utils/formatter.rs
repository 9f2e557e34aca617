use crate::http::Response;
use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Compact,
    Verbose,
}

pub struct ResponseFormatter {
    format: ResponseFormat,
    color: bool,
    show_timing: bool,
}

impl ResponseFormatter {
    /// Compact 模式下超过该长度的 body 只显示字节数
    const COMPACT_BODY_LIMIT: usize = 2000;

    pub fn new(format: ResponseFormat) -> Self {
        Self {
            format,
            color: true,
            show_timing: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_timing(mut self, show_timing: bool) -> Self {
        self.show_timing = show_timing;
        self
    }

    pub fn format(&self, response: &Response) -> String {
        let mut output = vec![self.status_line(response)];

        if self.show_timing {
            let timing = format!("Time: {}ms", response.duration.as_millis());
            output.push(self.paint(timing, |s| s.cyan()));
        }

        if self.format == ResponseFormat::Verbose {
            output.push(String::new());
            output.push(self.paint("Headers:".to_string(), |s| s.blue().bold()));
            for (key, value) in response.headers.iter() {
                let value_str = value.to_str().unwrap_or("<invalid utf-8>");
                output.push(self.paint(format!("   {}: {}", key, value_str), |s| s.blue()));
            }
        }

        let body = &response.body;
        if !body.is_empty() {
            match self.format {
                ResponseFormat::Compact if body.len() > Self::COMPACT_BODY_LIMIT => {
                    output.push(format!("Body: {} bytes", body.len()));
                }
                ResponseFormat::Compact => output.push(Self::pretty_body(body)),
                ResponseFormat::Verbose => {
                    output.push(String::new());
                    output.push(self.paint("Body:".to_string(), |s| s.blue().bold()));
                    output.push(Self::pretty_body(body));
                }
            }
        }

        output.join("\n")
    }

    fn status_line(&self, response: &Response) -> String {
        let status_line = format!(
            "HTTP {} {}",
            response.status.code(),
            response.status.reason_phrase()
        );
        let bold = self.format == ResponseFormat::Verbose;

        self.paint(status_line, |s| {
            let colored = if response.is_success() {
                s.green()
            } else if response.is_client_error() {
                s.yellow()
            } else {
                s.red()
            };
            if bold { colored.bold() } else { colored }
        })
    }

    fn paint(&self, text: String, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.color {
            style(&text).to_string()
        } else {
            text
        }
    }

    /// 尝试将 body 格式化为漂亮的 JSON，失败则返回原始内容
    fn pretty_body(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .and_then(|value| serde_json::to_string_pretty(&value))
            .unwrap_or_else(|_| body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};
    use std::time::Duration;

    fn response(status: u16, body: &str) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-1"));
        Response::new(status, headers, body.to_string(), Duration::from_millis(7)).unwrap()
    }

    #[test]
    fn test_compact() {
        let formatter = ResponseFormatter::new(ResponseFormat::Compact).with_color(false);
        let text = formatter.format(&response(200, r#"{"a":1}"#));
        assert_eq!(text, "HTTP 200 OK\nTime: 7ms\n{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_compact_large_body() {
        let formatter = ResponseFormatter::new(ResponseFormat::Compact)
            .with_color(false)
            .with_timing(false);
        let body = "x".repeat(3000);
        let text = formatter.format(&response(500, &body));
        assert_eq!(text, "HTTP 500 Internal Server Error\nBody: 3000 bytes");
    }

    #[test]
    fn test_verbose() {
        let formatter = ResponseFormatter::new(ResponseFormat::Verbose)
            .with_color(false)
            .with_timing(false);
        let text = formatter.format(&response(404, "missing"));
        assert!(text.starts_with("HTTP 404 Not Found"));
        assert!(text.contains("Headers:\n   x-request-id: req-1"));
        assert!(text.ends_with("Body:\nmissing"));
    }
}
