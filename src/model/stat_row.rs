//! 面向持久化的统计数据行。
//!
//! 行内字段的顺序和表头名称是固定的，下游的表格存储直接按列写入。

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::analysis::SongMetrics;

/// 统计数据行的全部表头，按列顺序排列。
pub const STAT_HEADERS: [&str; 19] = [
    "Name",
    "Artist",
    "ID",
    "NumSects",
    "WdCnt",
    "UnqWdCnt",
    "UnqWdPct",
    "TotRS",
    "ProxRS",
    "RymDens",
    "LgRymDens",
    "Wd/Sect",
    "Syll/Wd",
    "UnqWd/Sect",
    "RS/Sect",
    "RS/Wd",
    "ProxRS/Sect",
    "ProxRS/Wd",
    "SectSim",
];

/// 统计数据行中的一个单元格。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    /// 文本，用于名称、艺术家和 ID。
    Text(String),
    /// 计数。
    Count(usize),
    /// 小数指标。
    Number(f64),
    /// 没有段落的歌曲不计算的指标。
    Missing,
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Count(count) => write!(f, "{count}"),
            // `Debug` 总会保留小数点，例如 `12.0`
            Self::Number(number) => write!(f, "{number:?}"),
            Self::Missing => f.write_str("None"),
        }
    }
}

/// 一首歌的统计数据行。
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    values: Vec<StatValue>,
}

impl StatRow {
    /// 由歌曲身份信息和统计指标组成一行。
    pub fn new(
        name: &str,
        artist: &str,
        id: &str,
        section_count: usize,
        metrics: Option<&SongMetrics>,
    ) -> Self {
        let mut values = vec![
            StatValue::Text(name.to_string()),
            StatValue::Text(artist.to_string()),
            StatValue::Text(id.to_string()),
            StatValue::Count(section_count),
        ];

        match metrics {
            Some(m) => values.extend([
                StatValue::Count(m.word_count),
                StatValue::Count(m.unique_word_count),
                StatValue::Number(m.unique_word_pct),
                StatValue::Number(m.total_rhyme_score),
                StatValue::Number(m.proximity_rhyme_score),
                StatValue::Number(m.rhyme_density),
                StatValue::Number(m.large_rhyme_density),
                StatValue::Number(m.words_per_section),
                StatValue::Number(m.syllables_per_word),
                StatValue::Number(m.unique_words_per_section),
                StatValue::Number(m.rhyme_score_per_section),
                StatValue::Number(m.rhyme_score_per_word),
                StatValue::Number(m.proximity_score_per_section),
                StatValue::Number(m.proximity_score_per_word),
                StatValue::Number(m.section_similarity),
            ]),
            None => values.resize(STAT_HEADERS.len(), StatValue::Missing),
        }

        Self { values }
    }

    /// 按列顺序遍历 `(表头, 值)`。
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StatValue)> {
        STAT_HEADERS.iter().copied().zip(self.values.iter())
    }

    /// 按表头查找一个值。
    pub fn get(&self, header: &str) -> Option<&StatValue> {
        STAT_HEADERS
            .iter()
            .position(|h| *h == header)
            .and_then(|index| self.values.get(index))
    }

    /// 所有值，按列顺序。
    pub fn values(&self) -> &[StatValue] {
        &self.values
    }

    /// CSV 表头行。
    pub fn csv_header() -> String {
        STAT_HEADERS.join(",")
    }

    /// 把这一行渲染为一条 CSV 记录。
    pub fn to_csv_record(&self) -> String {
        self.values
            .iter()
            .map(|value| escape_csv_field(&value.to_string()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Serialize for StatRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (header, value) in self.iter() {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
