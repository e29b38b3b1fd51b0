//! 歌词来源模块
//!
//! 该模块定义了与歌词来源进行交互的核心抽象。
//! 远程歌词服务的客户端不在本库中实现，使用者实现 [`LyricsSource`] 后注册到
//! [`crate::LyricEmpirics`] 即可。

use async_trait::async_trait;

use crate::{
    config::ClientConfig,
    error::Result,
    model::track::{FoundSong, SongQuery},
    search,
};

pub mod memory;

pub use memory::InMemorySource;

/// 定义了所有歌词来源需要实现的通用接口。
#[async_trait]
pub trait LyricsSource: Send + Sync {
    ///
    /// 返回歌词来源的唯一名称。
    ///
    /// 一个全小写的静态字符串，例如 `"memory"`。
    ///
    fn name(&self) -> &'static str;

    ///
    /// 根据歌曲标题和艺术家搜索歌曲。
    ///
    /// # 参数
    /// * `query` - 一个包含搜索关键词的 `SongQuery` 引用。
    /// * `config` - 本次调用使用的客户端配置。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含一个 `Vec<FoundSong>`，代表搜索到的候选歌曲，
    /// 无需排序或过滤。
    ///
    async fn search_songs(
        &self,
        query: &SongQuery<'_>,
        config: &ClientConfig,
    ) -> Result<Vec<FoundSong>>;

    ///
    /// 搜索并返回最匹配的一首歌曲。
    ///
    /// 默认实现对 `search_songs` 的结果排除标题含有排除词语的歌曲，
    /// 再按匹配程度选出最佳结果。
    ///
    /// # 返回
    /// * `Ok(Some(FoundSong))` - 找到了匹配的歌曲。
    /// * `Ok(None)` - 没有合格的结果。
    ///
    async fn search_song(
        &self,
        query: &SongQuery<'_>,
        config: &ClientConfig,
    ) -> Result<Option<FoundSong>> {
        let results = self.search_songs(query, config).await?;
        Ok(search::rank_results(self.name(), query, results, config)
            .into_iter()
            .next()
            .map(|ranked| ranked.song))
    }
}
