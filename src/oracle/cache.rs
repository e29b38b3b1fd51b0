//! 以单词为键的查询缓存。

use std::collections::HashSet;

use dashmap::DashMap;

use crate::oracle::{PhoneticOracle, SyllableOracle};

/// 给任意数据来源加上按单词记忆的缓存。
///
/// 内部使用 `DashMap`，可以在多首歌、多个线程之间共享。
/// 被包装的数据来源必须是纯函数，否则缓存结果会过期。
#[derive(Debug, Default)]
pub struct CachedOracle<O> {
    inner: O,
    rhymes: DashMap<String, HashSet<String>>,
    pronunciations: DashMap<String, Vec<Vec<String>>>,
    syllables: DashMap<String, u32>,
}

impl<O> CachedOracle<O> {
    /// 包装一个数据来源。
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            rhymes: DashMap::new(),
            pronunciations: DashMap::new(),
            syllables: DashMap::new(),
        }
    }

    /// 被包装的数据来源。
    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// 已缓存的单词数量（按押韵、发音、音节三类分别统计后取最大值）。
    pub fn cached_words(&self) -> usize {
        self.rhymes
            .len()
            .max(self.pronunciations.len())
            .max(self.syllables.len())
    }

    /// 清空所有缓存。
    pub fn clear(&self) {
        self.rhymes.clear();
        self.pronunciations.clear();
        self.syllables.clear();
    }
}

impl<O: PhoneticOracle> PhoneticOracle for CachedOracle<O> {
    fn perfect_rhymes(&self, word: &str) -> HashSet<String> {
        if let Some(cached) = self.rhymes.get(word) {
            return cached.clone();
        }
        // 在持有分片锁之前完成查询
        let rhymes = self.inner.perfect_rhymes(word);
        self.rhymes
            .entry(word.to_string())
            .or_insert(rhymes)
            .clone()
    }

    fn pronunciations(&self, word: &str) -> Vec<Vec<String>> {
        if let Some(cached) = self.pronunciations.get(word) {
            return cached.clone();
        }
        let pronunciations = self.inner.pronunciations(word);
        self.pronunciations
            .entry(word.to_string())
            .or_insert(pronunciations)
            .clone()
    }
}

impl<O: SyllableOracle> SyllableOracle for CachedOracle<O> {
    fn estimate_syllables(&self, word: &str) -> u32 {
        if let Some(cached) = self.syllables.get(word) {
            return *cached;
        }
        let syllables = self.inner.estimate_syllables(word);
        *self.syllables.entry(word.to_string()).or_insert(syllables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingOracle {
        calls: AtomicUsize,
    }

    impl PhoneticOracle for CountingOracle {
        fn perfect_rhymes(&self, word: &str) -> HashSet<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            HashSet::from([format!("{word}-rhyme")])
        }

        fn pronunciations(&self, _word: &str) -> Vec<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            vec![vec!["AH0".to_string()]]
        }
    }

    impl SyllableOracle for CountingOracle {
        fn estimate_syllables(&self, word: &str) -> u32 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            word.len() as u32
        }
    }

    #[test]
    fn test_repeated_lookups_hit_the_cache() {
        let cached = CachedOracle::new(CountingOracle::default());
        for _ in 0..3 {
            assert!(cached.perfect_rhymes("cat").contains("cat-rhyme"));
            assert_eq!(cached.pronunciations("cat").len(), 1);
            assert_eq!(cached.estimate_syllables("cat"), 3);
        }
        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 3);
        assert_eq!(cached.cached_words(), 1);
    }

    /// 在查询进行中检查缓存是否仍可被其他调用者访问。
    struct ReentrantOracle {
        cache: std::sync::OnceLock<std::sync::Weak<CachedOracle<ReentrantOracle>>>,
    }

    impl SyllableOracle for ReentrantOracle {
        fn estimate_syllables(&self, word: &str) -> u32 {
            if let Some(cache) = self.cache.get().and_then(|weak| weak.upgrade()) {
                // 读取全部分片
                let _ = cache.syllables.len();
                assert!(cache.syllables.get(word).is_none());
                cache.syllables.insert(format!("{word}-side"), 7);
            }
            word.len() as u32
        }
    }

    #[test]
    fn test_inner_lookup_runs_outside_the_shard_lock() {
        let cached = std::sync::Arc::new(CachedOracle::new(ReentrantOracle {
            cache: std::sync::OnceLock::new(),
        }));
        let _ = cached.inner().cache.set(std::sync::Arc::downgrade(&cached));

        assert_eq!(cached.estimate_syllables("night"), 5);
        assert_eq!(cached.estimate_syllables("night-side"), 7);
        assert_eq!(cached.estimate_syllables("night"), 5);
    }

    #[test]
    fn test_clear_forces_fresh_lookups() {
        let cached = CachedOracle::new(CountingOracle::default());
        cached.estimate_syllables("dog");
        cached.clear();
        cached.estimate_syllables("dog");
        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
    }
}
