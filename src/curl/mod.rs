pub mod descriptor;
pub mod flags;
pub mod interpreter;
pub mod tokenizer;

pub use descriptor::RequestDescriptor;
pub use interpreter::interpret;
pub use tokenizer::tokenize;

/// 将 curl 命令字符串解析为请求描述
///
/// 对任意输入都返回结果，最差情况为空 URL 的默认 GET 请求。
pub fn parse_curl(input: &str) -> RequestDescriptor {
    let tokens = tokenize(input);
    tracing::debug!(?tokens, "Tokenized curl command");
    interpret(&tokens)
}

/// 判断输入是否以 curl 关键字开头
pub fn is_curl(input: &str) -> bool {
    tokenize(input)
        .first()
        .is_some_and(|first| first.eq_ignore_ascii_case("curl"))
}
