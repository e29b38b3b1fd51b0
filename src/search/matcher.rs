//! 匹配算法模块，简单实现

use crate::model::track::{FoundSong, MatchType, SongQuery};
use strsim::normalized_levenshtein;

/// 字符串相似度阈值，高于此值则认为匹配
const SIMILARITY_THRESHOLD: f64 = 0.85;

fn similar(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim().to_lowercase(), b.trim().to_lowercase());
    normalized_levenshtein(&a, &b) >= SIMILARITY_THRESHOLD
}

/// 比较查询和搜索结果，返回匹配类型
pub fn compare_song(query: &SongQuery<'_>, result: &FoundSong) -> MatchType {
    if !similar(query.title, &result.title) {
        return MatchType::None;
    }

    // 没有提供艺术家时只看标题
    let Some(artist) = query.artist else {
        return MatchType::Title;
    };

    // 合作歌曲的艺术家字段常带有其他名字，包含关系也算匹配
    let (wanted, found) = (artist.to_lowercase(), result.artist.to_lowercase());
    if similar(&wanted, &found) || found.contains(&wanted) {
        MatchType::TitleAndArtist
    } else {
        MatchType::Title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(title: &str, artist: &str) -> FoundSong {
        FoundSong::new("1", title, artist, "")
    }

    #[test]
    fn test_title_and_artist() {
        let query = SongQuery::new("Lose Yourself", "Eminem");
        assert_eq!(
            compare_song(&query, &found("Lose Yourself", "Eminem")),
            MatchType::TitleAndArtist
        );
        assert_eq!(
            compare_song(&query, &found("lose yourself ", "EMINEM")),
            MatchType::TitleAndArtist
        );
        assert_eq!(
            compare_song(&query, &found("Lose Yourself", "Eminem & Dr. Dre")),
            MatchType::TitleAndArtist
        );
    }

    #[test]
    fn test_artist_mismatch_keeps_title_match() {
        let query = SongQuery::new("Lose Yourself", "Eminem");
        assert_eq!(
            compare_song(&query, &found("Lose Yourself", "Cover Band")),
            MatchType::Title
        );
    }

    #[test]
    fn test_title_mismatch() {
        let query = SongQuery::title_only("Lose Yourself");
        assert_eq!(
            compare_song(&query, &found("Without Me", "Eminem")),
            MatchType::None
        );
        assert_eq!(
            compare_song(&query, &found("Lose Yourself", "Anyone")),
            MatchType::Title
        );
    }
}
