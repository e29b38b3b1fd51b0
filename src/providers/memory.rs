//! 基于内存歌曲目录的歌词来源，可以从 JSON 文件加载。

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    config::ClientConfig,
    error::Result,
    model::track::{FoundSong, MatchType, SongQuery},
    providers::LyricsSource,
    search::matcher::compare_song,
};

/// 在一个固定的歌曲目录中搜索的歌词来源。
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    songs: Vec<FoundSong>,
}

impl InMemorySource {
    /// 创建一个空目录。
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用给定的歌曲创建目录。
    pub fn with_songs(songs: Vec<FoundSong>) -> Self {
        Self { songs }
    }

    /// 从 JSON 文件加载目录，文件内容是 `FoundSong` 数组。
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let songs: Vec<FoundSong> = serde_json::from_str(&content)?;
        info!(
            "[InMemorySource] 已从 {:?} 加载 {} 首歌曲",
            path,
            songs.len()
        );
        Ok(Self { songs })
    }

    /// 向目录中添加一首歌曲。
    pub fn add_song(&mut self, song: FoundSong) {
        self.songs.push(song);
    }

    /// 目录中的歌曲数量。
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// 目录是否为空。
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

#[async_trait]
impl LyricsSource for InMemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    /// 返回标题与查询相近的所有歌曲。
    async fn search_songs(
        &self,
        query: &SongQuery<'_>,
        _config: &ClientConfig,
    ) -> Result<Vec<FoundSong>> {
        let results: Vec<FoundSong> = self
            .songs
            .iter()
            .filter(|song| compare_song(query, song) != MatchType::None)
            .cloned()
            .collect();
        debug!(
            "[InMemorySource] '{}' 命中 {} 首歌曲",
            query.title,
            results.len()
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemorySource {
        InMemorySource::with_songs(vec![
            FoundSong::new("1", "Lose Yourself (Live)", "Eminem", "[Verse]\nlive"),
            FoundSong::new("2", "Lose Yourself", "Eminem", "[Verse]\nstudio"),
            FoundSong::new("3", "Without Me", "Eminem", "[Verse]\nother"),
        ])
    }

    #[tokio::test]
    async fn test_search_skips_excluded_titles() {
        let config = ClientConfig::default();
        let found = catalog()
            .search_song(&SongQuery::new("Lose Yourself", "Eminem"), &config)
            .await
            .unwrap()
            .expect("应找到歌曲");
        assert_eq!(found.id, "2");
    }

    #[tokio::test]
    async fn test_excluded_terms_come_from_call_time_config() {
        let source = catalog();
        let query = SongQuery::title_only("Lose Yourself (Live)");
        let mut config = ClientConfig::default();

        let candidates = source.search_songs(&query, &config).await.unwrap();
        assert_eq!(candidates.len(), 1, "候选结果本身不做排除");
        assert!(source.search_song(&query, &config).await.unwrap().is_none());

        assert!(config.remove_excluded_term("(Live)"));
        let found = source.search_song(&query, &config).await.unwrap().unwrap();
        assert_eq!(found.id, "1");
    }

    #[tokio::test]
    async fn test_not_found() {
        let config = ClientConfig::default();
        let found = catalog()
            .search_song(&SongQuery::new("Stan", "Eminem"), &config)
            .await
            .unwrap();
        assert!(found.is_none());
        assert!(InMemorySource::new().is_empty());
    }
}
