//! 发音与音节数据来源模块
//!
//! 该模块定义了分析核心所依赖的两个外部数据接口，以及它们的具体实现。
//! 两个接口都是以单词为键的纯函数，可以安全地缓存或在测试中替换。

use std::collections::HashSet;
use std::sync::Arc;

pub mod cache;
pub mod cmu;
pub mod syllables;

pub use cache::CachedOracle;
pub use cmu::CmuDictionary;
pub use syllables::HeuristicSyllables;

/// 提供单词发音与完美押韵信息的接口。
pub trait PhoneticOracle: Send + Sync {
    ///
    /// 返回与 `word` 构成完美押韵的单词集合。
    ///
    /// 查不到时返回空集合。
    ///
    fn perfect_rhymes(&self, word: &str) -> HashSet<String>;

    ///
    /// 返回 `word` 的所有候选发音。
    ///
    /// 每个发音是一个音素序列，音素可能带有重音数字（如 `AY1`），
    /// 调用方在比较前自行去除。查不到时返回空列表。
    ///
    fn pronunciations(&self, word: &str) -> Vec<Vec<String>>;
}

/// 估算单词音节数的接口。
pub trait SyllableOracle: Send + Sync {
    /// 估算 `word` 的音节数。
    fn estimate_syllables(&self, word: &str) -> u32;
}

impl<T: PhoneticOracle + ?Sized> PhoneticOracle for Arc<T> {
    fn perfect_rhymes(&self, word: &str) -> HashSet<String> {
        (**self).perfect_rhymes(word)
    }

    fn pronunciations(&self, word: &str) -> Vec<Vec<String>> {
        (**self).pronunciations(word)
    }
}

impl<T: SyllableOracle + ?Sized> SyllableOracle for Arc<T> {
    fn estimate_syllables(&self, word: &str) -> u32 {
        (**self).estimate_syllables(word)
    }
}
