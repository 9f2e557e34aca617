/// 参数是否读取紧随其后的 token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    NoArg,
    TakesArg,
}

/// 支持的 curl 参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// `curl` 关键字本身
    Curl,
    Request,
    Get,
    Header,
    Data,
    Url,
}

/// 小写 token 到参数的映射表
const FLAG_TABLE: &[(&str, Flag)] = &[
    ("curl", Flag::Curl),
    ("-x", Flag::Request),
    ("--request", Flag::Request),
    ("-g", Flag::Get),
    ("--get", Flag::Get),
    ("-h", Flag::Header),
    ("--header", Flag::Header),
    ("-d", Flag::Data),
    ("--data", Flag::Data),
    ("--url", Flag::Url),
    ("--location", Flag::Url),
];

impl Flag {
    /// 查找参数 (忽略大小写)
    pub fn lookup(token: &str) -> Option<Flag> {
        let normalized = token.to_lowercase();
        FLAG_TABLE
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, flag)| *flag)
    }

    pub fn arity(self) -> Arity {
        match self {
            Flag::Curl | Flag::Get => Arity::NoArg,
            Flag::Request | Flag::Header | Flag::Data | Flag::Url => Arity::TakesArg,
        }
    }
}
