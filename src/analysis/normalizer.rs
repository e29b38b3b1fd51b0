//! 歌词文本规范化。
//!
//! 把原始歌词行折叠为小写、去重音、只含字母数字的规范形式，
//! 并负责移除歌词末尾的推广标签。

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// 歌词网站附加在最后一行末尾的推广标签，前面可能带有浏览量数字（如 `123.4K`）。
static TRAILING_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(\.[0-9]+)?[KMB]?)?EmbedShare URLCopyEmbedCopy")
        .expect("编译 TRAILING_TAG_REGEX 失败")
});

/// 规范化一行歌词。
///
/// 返回空字符串表示该行应被丢弃。
///
/// 规则（逐个以空白分隔的词处理）：
/// - 转为小写；
/// - 保留字母数字和 `[` `]`；
/// - `.`、`-` 和破折号 `—` 视为词的分隔符；
/// - `&` 替换为 `and`；
/// - 撇号只在词的内部保留，词首词尾的撇号被丢弃；
/// - 重音符号在 NFKD 分解后被去除，其他所有字符直接丢弃。
///
/// 对已规范化的文本再次调用不会产生任何变化。
pub fn normalize_line(line: &str) -> String {
    let mut tokens: Vec<String> = Vec::new();

    for raw_token in line.to_lowercase().split_whitespace() {
        let mut folded = String::with_capacity(raw_token.len());
        for c in raw_token.chars() {
            match c {
                '.' | '-' | '—' => folded.push(' '),
                '&' => folded.push_str("and"),
                '[' | ']' | '\'' => folded.push(c),
                c if c.is_alphanumeric() => push_ascii_base(&mut folded, c),
                _ => {}
            }
        }

        tokens.extend(
            folded
                .split(' ')
                .map(|piece| piece.trim_matches('\''))
                .filter(|piece| !piece.is_empty())
                .map(str::to_string),
        );
    }

    tokens.join(" ")
}

/// 把一个字母数字字符分解后的 ASCII 部分追加到缓冲区，附加的重音符号被丢弃。
fn push_ascii_base(buffer: &mut String, c: char) {
    if c.is_ascii() {
        buffer.push(c);
        return;
    }
    for decomposed in c.to_string().nfkd() {
        if decomposed.is_ascii_alphanumeric() {
            buffer.push(decomposed.to_ascii_lowercase());
        }
    }
}

/// 移除最后一个非空行末尾的推广标签（例如 `123.4KEmbedShare URLCopyEmbedCopy`）。
///
/// 标签及其之后同一行的内容被删除，标签之前的部分和末尾的换行符原样保留；
/// 没有标签时原样返回。
pub fn remove_tag(lyrics: &str) -> String {
    let body_end = lyrics.trim_end().len();
    let line_start = lyrics[..body_end].rfind('\n').map_or(0, |i| i + 1);

    let Some(found) = TRAILING_TAG_REGEX.find(&lyrics[line_start..body_end]) else {
        return lyrics.to_string();
    };

    let trailing = &lyrics[body_end..];
    let line_breaks = trailing
        .find(['\r', '\n'])
        .map_or("", |i| &trailing[i..]);

    let mut cleaned = String::with_capacity(lyrics.len());
    cleaned.push_str(&lyrics[..line_start + found.start()]);
    cleaned.push_str(line_breaks);
    cleaned
}

/// 只保留字母数字字符，用于生成文件名。
pub fn keep_alphanumeric(text: &str) -> String {
    text.chars().filter(|c| c.is_alphanumeric()).collect()
}
