use tracing::{debug, warn};

use crate::curl::descriptor::RequestDescriptor;
use crate::curl::flags::{Arity, Flag};
use crate::json::parse_relaxed;

/// 根据 curl token 构建请求描述
///
/// 参数从左到右依次生效：后出现的 `-X` 覆盖先前 `-d` 设置的 `POST`，反之亦然。
/// 不会失败，无法使用的参数直接跳过。
pub fn interpret<S: AsRef<str>>(tokens: &[S]) -> RequestDescriptor {
    let mut descriptor = RequestDescriptor::default();
    let mut index = 0;

    while index < tokens.len() {
        let token = tokens[index].as_ref();

        match Flag::lookup(token) {
            Some(flag) => {
                let value = match flag.arity() {
                    Arity::NoArg => None,
                    Arity::TakesArg => {
                        index += 1;
                        match tokens.get(index) {
                            Some(value) => Some(value.as_ref()),
                            None => {
                                warn!("curl flag {} is missing its value", token);
                                break;
                            }
                        }
                    }
                };
                apply_flag(&mut descriptor, flag, value);
            }
            None if !token.starts_with('-') => {
                if descriptor.url.is_empty() {
                    descriptor.url = token.to_string();
                } else {
                    debug!("Ignoring extra positional token: {}", token);
                }
            }
            None => debug!("Ignoring unsupported curl flag: {}", token),
        }

        index += 1;
    }

    descriptor
}

fn apply_flag(descriptor: &mut RequestDescriptor, flag: Flag, value: Option<&str>) {
    match (flag, value) {
        (Flag::Curl, _) => {}
        (Flag::Get, _) => descriptor.method = "GET".to_string(),
        (Flag::Request, Some(method)) => {
            if method.is_empty() {
                warn!("Ignoring empty request method");
            } else {
                descriptor.method = method.to_string();
            }
        }
        (Flag::Header, Some(header)) => {
            let (name, value) = split_header(header);
            if name.is_empty() {
                warn!("Ignoring header without a name: {}", header);
            } else {
                descriptor.headers.insert(name.to_string(), value.to_string());
            }
        }
        (Flag::Data, Some(data)) => match parse_relaxed(data) {
            Ok(body) => {
                descriptor.body = Some(body);
                descriptor.method = "POST".to_string();
            }
            Err(e) => warn!("Unable to parse body {}: {}", data, e),
        },
        (Flag::Url, Some(url)) => descriptor.url = url.to_string(),
        (Flag::Request | Flag::Header | Flag::Data | Flag::Url, None) => {}
    }
}

/// 按第一个冒号拆分请求头，没有冒号时值为空字符串
fn split_header(header: &str) -> (&str, &str) {
    match header.split_once(':') {
        Some((name, value)) => (name.trim(), value.trim()),
        None => (header.trim(), ""),
    }
}
