//! 搜索模块

use futures::future;
use tracing::{debug, info, warn};

use crate::{
    config::ClientConfig,
    error::{LyricEmpiricsError, Result},
    model::track::{FoundSong, MatchType, SongQuery},
    providers::LyricsSource,
};

pub mod matcher;
use matcher::compare_song;

/// 一条带有匹配程度和来源名称的搜索结果。
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSong {
    /// 返回该结果的歌词来源名称。
    pub source_name: &'static str,
    /// 与查询的匹配程度。
    pub match_type: MatchType,
    /// 搜索结果本身。
    pub song: FoundSong,
}

/// 对搜索结果打分并过滤，按匹配度从高到低排序。
///
/// 标题含有排除词语的结果、匹配程度低于查询要求的结果都会被丢弃。
/// 匹配度相同的结果保持原有顺序。
pub fn rank_results(
    source_name: &'static str,
    query: &SongQuery<'_>,
    results: Vec<FoundSong>,
    config: &ClientConfig,
) -> Vec<RankedSong> {
    let required = query.required_match();

    let mut ranked: Vec<RankedSong> = results
        .into_iter()
        .filter(|song| {
            let excluded = config.is_excluded(&song.title);
            if excluded {
                debug!("[Search] 跳过含有排除词语的结果: '{}'", song.title);
            }
            !excluded
        })
        .map(|song| RankedSong {
            source_name,
            match_type: compare_song(query, &song),
            song,
        })
        .filter(|ranked| ranked.match_type >= required)
        .collect();

    ranked.sort_by(|a, b| b.match_type.cmp(&a.match_type));
    ranked
}

/// 在指定歌词来源上搜索，受配置中的超时时间限制。
///
/// # 返回
/// 一个 `Result`，成功时包含按匹配度排序、已过滤的结果。
/// 超时返回 `LyricEmpiricsError::Timeout`。
pub async fn search_source(
    source: &dyn LyricsSource,
    query: &SongQuery<'_>,
    config: &ClientConfig,
) -> Result<Vec<RankedSong>> {
    debug!(
        "[Search] 正在 '{}' 中搜索 '{}' by {}",
        source.name(),
        query.title,
        query.artist.unwrap_or("未知艺术家")
    );

    let results = tokio::time::timeout(config.timeout(), source.search_songs(query, config))
        .await
        .map_err(|_| {
            LyricEmpiricsError::Timeout(format!(
                "'{}' 在 {:?} 内没有返回结果",
                source.name(),
                config.timeout()
            ))
        })??;

    Ok(rank_results(source.name(), query, results, config))
}

/// 在多个歌词来源中并发搜索。
///
/// 出错的来源会被忽略。返回所有来源的合格结果，已按匹配度从高到低排序。
pub async fn search_all_sources(
    sources: &[&dyn LyricsSource],
    query: &SongQuery<'_>,
    config: &ClientConfig,
) -> Vec<RankedSong> {
    let search_futures = sources
        .iter()
        .map(|source| search_source(*source, query, config));

    let mut combined: Vec<RankedSong> = Vec::new();
    for (source, result) in sources.iter().zip(future::join_all(search_futures).await) {
        match result {
            Ok(ranked) => {
                if !ranked.is_empty() && config.verbose() {
                    info!("[Search] '{}' 返回 {} 条合格结果。", source.name(), ranked.len());
                }
                combined.extend(ranked);
            }
            Err(e) => {
                warn!(
                    "[Search] '{}' 的搜索失败: {}. 将忽略此来源的结果。",
                    source.name(),
                    e
                );
            }
        }
    }

    combined.sort_by(|a, b| b.match_type.cmp(&a.match_type));
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(id: &str, title: &str, artist: &str) -> FoundSong {
        FoundSong::new(id, title, artist, "")
    }

    #[test]
    fn test_rank_prefers_artist_match_and_drops_excluded() {
        let config = ClientConfig::default();
        let query = SongQuery::title_only("Stan");
        let ranked = rank_results(
            "memory",
            &query,
            vec![
                found("1", "Stan (Live)", "Eminem"),
                found("2", "Stan", "Cover Band"),
                found("3", "Without Me", "Eminem"),
            ],
            &config,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].song.id, "2");
        assert_eq!(ranked[0].match_type, MatchType::Title);
    }

    #[test]
    fn test_rank_requires_artist_when_given() {
        let config = ClientConfig::default();
        let query = SongQuery::new("Stan", "Eminem");
        let ranked = rank_results(
            "memory",
            &query,
            vec![found("2", "Stan", "Cover Band"), found("4", "Stan", "Eminem")],
            &config,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].song.id, "4");
        assert_eq!(ranked[0].match_type, MatchType::TitleAndArtist);
        assert_eq!(ranked[0].source_name, "memory");
    }
}
