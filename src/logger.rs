use tracing_subscriber::{EnvFilter, fmt};

/// 初始化日志系统
///
/// 日志级别优先读取 RUST_LOG，其次使用 `default_level`。
/// 日志输出到 stderr，避免污染 `recipeui parse` 的 JSON 输出。
///
/// 示例:
/// - RUST_LOG=recipeui=debug recipeui parse "curl -X PUT https://x.test"
pub fn init_logger(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试中）时忽略错误
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();

    tracing::debug!("Logger initialized");
}
