use super::model::{OutputType, SessionOutput};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, Table};

/// 按给定顺序将输出渲染为表格
pub fn outputs_table(outputs: &[SessionOutput]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "ID", "Time", "Type", "Method", "URL", "Status", "Duration",
    ]);

    for output in outputs {
        let type_color = match output.output_type {
            OutputType::Error => Color::Red,
            OutputType::Void => Color::DarkGrey,
            _ => Color::Green,
        };
        let (method, url) = output
            .request
            .as_ref()
            .map(|r| (r.method.as_str(), r.url.as_str()))
            .unwrap_or(("-", "-"));

        table.add_row(vec![
            Cell::new(output.id.chars().take(8).collect::<String>()), // Short ID
            Cell::new(
                output
                    .created_at
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(output.output_type.as_str()).fg(type_color),
            Cell::new(method),
            Cell::new(url).add_attribute(Attribute::Dim),
            Cell::new(
                output
                    .status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(
                output
                    .duration_ms
                    .map(|d| format!("{}ms", d))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curl::parse_curl;
    use serde_json::json;

    #[test]
    fn test_outputs_table() {
        let outputs = vec![
            SessionOutput::new(OutputType::Default, json!({}))
                .with_id("0123456789abcdef")
                .with_request(parse_curl("curl -X PUT https://x.test/a"))
                .with_status(200)
                .with_duration_ms(42),
            SessionOutput::new(OutputType::Error, json!("boom")).with_id("ffff"),
        ];

        let rendered = outputs_table(&outputs).to_string();
        assert!(rendered.contains("01234567"));
        assert!(!rendered.contains("0123456789"));
        assert!(rendered.contains("PUT"));
        assert!(rendered.contains("https://x.test/a"));
        assert!(rendered.contains("42ms"));
        assert!(rendered.contains("error"));
    }
}
