//! 定义了与歌曲搜索功能相关的核心数据结构，包括搜索输入、搜索结果和匹配程度。

use serde::{Deserialize, Serialize};

/// 代表搜索结果与查询的匹配程度。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum MatchType {
    /// 标题不匹配。
    #[default]
    None,
    /// 只有标题匹配。
    Title,
    /// 标题和艺术家都匹配。
    TitleAndArtist,
}

/// 代表一次歌曲搜索的输入参数。
#[derive(Default, Debug, Clone, Copy)]
pub struct SongQuery<'a> {
    /// 歌曲标题。
    pub title: &'a str,
    /// 艺术家，为空时只按标题匹配。
    pub artist: Option<&'a str>,
}

impl<'a> SongQuery<'a> {
    /// 同时指定标题和艺术家的查询。
    pub fn new(title: &'a str, artist: &'a str) -> Self {
        Self {
            title,
            artist: Some(artist),
        }
    }

    /// 只按标题查询。
    pub fn title_only(title: &'a str) -> Self {
        Self {
            title,
            artist: None,
        }
    }

    /// 接受一条搜索结果所需的最低匹配程度。
    pub fn required_match(&self) -> MatchType {
        if self.artist.is_some() {
            MatchType::TitleAndArtist
        } else {
            MatchType::Title
        }
    }
}

/// 歌词来源返回的一首歌曲，包含未经处理的歌词文本。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FoundSong {
    /// 在其所在来源中的唯一 ID。
    pub id: String,
    /// 歌曲标题。
    pub title: String,
    /// 主要艺术家。
    pub artist: String,
    /// 原始歌词文本，可能带有段落标题和末尾的推广标签。
    pub lyrics: String,
}

impl FoundSong {
    /// 创建一条搜索结果。
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        lyrics: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            lyrics: lyrics.into(),
        }
    }
}
