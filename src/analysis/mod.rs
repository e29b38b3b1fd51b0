//! 歌词分析核心模块
//!
//! 从原始歌词文本出发，依次完成：
//! 1. 文本规范化 (`normalizer`)
//! 2. 段落切分 (`sections`)
//! 3. 词汇索引 (`vocabulary`)
//! 4. 押韵评分与汇总 (`rhyme`, `aggregator`)
//! 5. 统计指标计算 (`statistics`)
//!
//! 整个流程不做任何 I/O，发音数据通过 [`crate::oracle`] 中的接口注入。

pub mod aggregator;
pub mod normalizer;
pub mod rhyme;
pub mod sections;
pub mod statistics;
pub mod vocabulary;

pub use sections::{Section, SectionKind};
pub use statistics::{LyricAnalysis, SongMetrics, SongStatistics, analyze_lyrics};
pub use vocabulary::Vocabulary;
