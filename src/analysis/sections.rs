//! 按方括号段落标题（如 `[Verse 1]`、`[Chorus]`）把歌词切分为段落。

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

use crate::analysis::normalizer::normalize_line;

/// 可识别的段落类型。
///
/// 声明顺序即匹配顺序，`IntoStaticStr` 给出规范化后的标题关键字。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
pub enum SectionKind {
    /// 主歌
    #[strum(serialize = "verse")]
    Verse,
    /// 副歌
    #[strum(serialize = "chorus")]
    Chorus,
    /// Hook
    #[strum(serialize = "hook")]
    Hook,
    /// 叠句
    #[strum(serialize = "refrain")]
    Refrain,
    /// 桥段
    #[strum(serialize = "bridge")]
    Bridge,
    /// 预副歌
    #[strum(serialize = "pre chorus")]
    PreChorus,
    /// 副歌后段
    #[strum(serialize = "post chorus")]
    PostChorus,
}

impl SectionKind {
    /// 规范化标题中紧跟 `[` 的关键字。
    pub fn keyword(self) -> &'static str {
        self.into()
    }

    /// 识别一个规范化后的标题行。
    ///
    /// 只有关键字紧跟在 `[` 之后时才算识别成功，标题其余位置出现关键字不计。
    pub fn recognize(header: &str) -> Option<Self> {
        let body = header.strip_prefix('[')?;
        Self::iter().find(|kind| body.starts_with(kind.keyword()))
    }
}

/// 歌词中的一个段落。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// 段落类型。
    pub kind: SectionKind,
    /// 规范化后的标题行，例如 `[verse 1 artist]`。
    pub header: String,
    /// 段落内规范化后的非空歌词行，保持原顺序。
    pub lines: Vec<String>,
}

impl Section {
    /// 段落内所有的词，按出现顺序。
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().flat_map(|line| line.split_whitespace())
    }
}

/// 判断规范化后的行是否是段落标题。
fn is_header_line(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('[') && line.ends_with(']')
}

/// 从原始歌词中提取所有段落。
///
/// 逐行规范化并跳过空行。遇到任何标题行（无论能否识别）都会结束当前段落；
/// 只有最近一次的标题被识别时，之后的普通行才会被收入新段落。
/// 第一个标题之前的行会被丢弃，最后只返回非空段落。
pub fn extract_sections(lyrics: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;

    for raw_line in lyrics.split('\n') {
        let line = normalize_line(raw_line);
        if line.is_empty() {
            continue;
        }

        if is_header_line(&line) {
            sections.extend(current.take());
            current = SectionKind::recognize(&line).map(|kind| Section {
                kind,
                header: line,
                lines: Vec::new(),
            });
        } else if let Some(section) = current.as_mut() {
            section.lines.push(line);
        }
    }
    sections.extend(current);

    sections.retain(|section| !section.lines.is_empty());
    sections
}
