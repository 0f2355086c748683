//! 翻译缓存：按源字符串内容去重，作用域为单个目标语言的一次运行

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: HashMap<String, String>,
    hits: usize,
    misses: usize,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查找已缓存的译文，命中时计数
    pub fn lookup(&mut self, source: &str) -> Option<String> {
        match self.entries.get(source) {
            Some(translated) => {
                self.hits += 1;
                Some(translated.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, source: impl Into<String>, translated: impl Into<String>) {
        self.entries.insert(source.into(), translated.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
