//! 输出解析函数

use super::types::SearchCandidate;

/// 清理终端输出中的 ANSI 转义序列和特殊字符
pub fn clean_terminal_output(input: &str) -> String {
    let mut result = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\x1b' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    while let Some(&next) = chars.peek() {
                        chars.next();
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
            }
            '\r' => {
                if chars.peek() != Some(&'\n') && !result.ends_with('\n') {
                    result.push('\n');
                }
            }
            c if c.is_control() && c != '\n' && c != '\t' => {}
            _ => result.push(c),
        }
    }

    result
}

/// 解析 `yay -Ss` / `paru -Ss` 的搜索输出
///
/// 行首非空白的行视为候选：第一个空白分隔的 token 是包名；
/// 去掉首字符后按第一个空格切开，后半部分作为描述。
/// 缩进的描述行和空行被丢弃。
///
/// 典型输出：
///   `aur/google-chrome 131.0-1 (+1969 12.41)`
///   `    The popular web browser by Google`
pub fn parse_search_candidates(output: &str) -> Vec<SearchCandidate> {
    let cleaned = clean_terminal_output(output);
    cleaned
        .lines()
        .filter(|line| line.chars().next().is_some_and(|c| !c.is_whitespace()))
        .filter_map(|line| {
            let name = line.split_whitespace().next()?;
            let mut rest = line.chars();
            rest.next();
            let description = rest
                .as_str()
                .split_once(' ')
                .map(|(_, desc)| desc.to_string())
                .unwrap_or_default();
            Some(SearchCandidate {
                name: name.to_string(),
                description,
            })
        })
        .collect()
}

/// 候选列表的显示文本，序号从 1 开始
pub fn format_candidates(candidates: &[SearchCandidate]) -> Vec<String> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {} - {}", i + 1, c.name, c.description))
        .collect()
}
