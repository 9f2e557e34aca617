const QUOTE_CHARS: [char; 2] = ['\'', '"'];

/// 将 curl 命令拆分为 token
///
/// 空格和反斜杠作为分隔符。引号内的空格与续行符保留在 token 中，
/// 输出时去掉外层引号。引号不配对时不会报错，字符串一直延续到输入结尾。
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokenizer = Tokenizer::default();
    for c in input.trim().chars() {
        tokenizer.push(c);
    }
    tokenizer.finish()
}

#[derive(Default)]
struct Tokenizer {
    tokens: Vec<String>,
    builder: String,
    in_string: bool,
}

impl Tokenizer {
    fn push(&mut self, c: char) {
        if is_boundary(c) {
            if self.builder.is_empty() {
                return;
            }

            // 字符串内的分隔符按普通字符处理
            if self.in_string && !self.builder.ends_with(&QUOTE_CHARS[..]) {
                self.builder.push(c);
                return;
            }

            self.flush();
        } else {
            if QUOTE_CHARS.contains(&c) {
                self.in_string = true;
            }
            self.builder.push(c);
        }
    }

    fn flush(&mut self) {
        let word = if self.in_string {
            self.in_string = false;
            strip_outer(&self.builder).trim().to_string()
        } else {
            self.builder.trim().to_string()
        };
        self.tokens.push(word);
        self.builder.clear();
    }

    fn finish(mut self) -> Vec<String> {
        if !self.builder.is_empty() {
            self.flush();
        }

        // `\` + 换行续行留下的残余
        self.tokens
            .retain(|token| !token.starts_with('\\') && !token.starts_with('\n'));
        self.tokens
    }
}

fn is_boundary(c: char) -> bool {
    c == ' ' || c == '\\'
}

/// 去掉首尾各一个字符
fn strip_outer(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str) -> Vec<String> {
        tokenize(input)
    }

    #[test]
    fn test_empty_input() {
        assert!(words("").is_empty());
        assert!(words("   ").is_empty());
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(
            words("curl -X POST https://example.com"),
            vec!["curl", "-X", "POST", "https://example.com"]
        );
    }

    #[test]
    fn test_repeated_spaces_are_skipped() {
        assert_eq!(words("curl    -G   url"), vec!["curl", "-G", "url"]);
    }

    #[test]
    fn test_single_quoted_token() {
        assert_eq!(
            words("curl -H 'Accept: application/json' url"),
            vec!["curl", "-H", "Accept: application/json", "url"]
        );
    }

    #[test]
    fn test_double_quoted_token() {
        assert_eq!(
            words(r#"-d "{name: 'foo bar'}""#),
            vec!["-d", "{name: 'foo bar'}"]
        );
    }

    #[test]
    fn test_quoted_token_is_trimmed() {
        assert_eq!(words("'a b  '"), vec!["a b"]);
    }

    #[test]
    fn test_quotes_only_collapse_to_empty() {
        assert_eq!(words("''"), vec![""]);
        assert_eq!(words(r#""""#), vec![""]);
    }

    #[test]
    fn test_line_continuations() {
        let input = "curl 'https://example.com' \\\n  -H 'Accept: */*' \\\n  --insecure";
        let tokens = words(input);
        assert_eq!(tokens[0], "curl");
        assert_eq!(tokens[1], "https://example.com");
        assert!(tokens.contains(&"-H".to_string()));
        assert!(tokens.contains(&"Accept: */*".to_string()));
        assert_eq!(tokens.last().map(String::as_str), Some("--insecure"));
    }

    #[test]
    fn test_backslash_inside_string_is_kept() {
        assert_eq!(words(r"'a\b c'"), vec![r"a\b c"]);
    }

    #[test]
    fn test_backslash_outside_string_splits() {
        assert_eq!(words(r"abc\def"), vec!["abc", "def"]);
    }

    #[test]
    fn test_unbalanced_quote_absorbs_rest() {
        assert_eq!(
            words("curl -d '{bad -H X: 1"),
            vec!["curl", "-d", "{bad -H X:"]
        );
    }

    #[test]
    fn test_strip_outer() {
        assert_eq!(strip_outer("'abc'"), "abc");
        assert_eq!(strip_outer("'"), "");
        assert_eq!(strip_outer(""), "");
        assert_eq!(strip_outer("'é'"), "é");
    }
}
