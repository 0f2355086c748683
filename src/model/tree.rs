//! 本地化树：节点分类、统计与递归翻译
//!
//! 树本身就是 `serde_json::Value`（启用 preserve_order，对象键保持插入顺序），
//! 遍历时对 Object/Array/String/Number/Bool/Null 逐一模式匹配。

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};

use crate::model::cache::TranslationCache;
use crate::translator::{translate_or_fallback, Translator};

/// JSON 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl NodeKind {
    pub fn of(v: &Value) -> Self {
        match v {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Bool,
            Value::Null => NodeKind::Null,
        }
    }
}

/// 树的结构统计，用于在翻译前估算最多需要多少次网络调用
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub objects: usize,
    pub arrays: usize,
    pub strings: usize,
    pub unique_strings: usize,
    pub other_scalars: usize,
}

impl TreeStats {
    fn record(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::Object => self.objects += 1,
            NodeKind::Array => self.arrays += 1,
            NodeKind::String => self.strings += 1,
            NodeKind::Number | NodeKind::Bool | NodeKind::Null => self.other_scalars += 1,
        }
    }

    pub fn collect(root: &Value) -> Self {
        fn walk<'v>(v: &'v Value, stats: &mut TreeStats, seen: &mut HashSet<&'v str>) {
            stats.record(NodeKind::of(v));
            match v {
                Value::Object(map) => map.values().for_each(|child| walk(child, stats, seen)),
                Value::Array(arr) => arr.iter().for_each(|child| walk(child, stats, seen)),
                Value::String(s) => {
                    seen.insert(s.as_str());
                }
                _ => {}
            }
        }

        let mut stats = TreeStats::default();
        let mut seen = HashSet::new();
        walk(root, &mut stats, &mut seen);
        stats.unique_strings = seen.len();
        stats
    }
}

/// 空字符串不送去翻译，原样返回；仅含空白的字符串照常请求
fn needs_translation(text: &str) -> bool {
    !text.is_empty()
}

/// 递归翻译整棵树，返回结构相同的新树
///
/// 缓存按字符串内容（而非树中位置）去重：同一原文在一次运行中最多请求一次翻译服务。
/// 对象键不参与缓存查找。数字、布尔、null 原样返回。
pub fn translate_tree<'a>(
    node: &'a Value,
    target_lang: &'a str,
    translator: &'a dyn Translator,
    cache: &'a mut TranslationCache,
) -> Pin<Box<dyn Future<Output = Value> + Send + 'a>> {
    Box::pin(async move {
        match node {
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, child) in map {
                    let translated = translate_tree(child, target_lang, translator, cache).await;
                    out.insert(key.clone(), translated);
                }
                Value::Object(out)
            }
            Value::Array(arr) => {
                let mut out = Vec::with_capacity(arr.len());
                for child in arr {
                    out.push(translate_tree(child, target_lang, translator, cache).await);
                }
                Value::Array(out)
            }
            Value::String(text) => {
                if let Some(hit) = cache.lookup(text) {
                    return Value::String(hit);
                }
                let translated = if needs_translation(text) {
                    translate_or_fallback(translator, text, target_lang).await
                } else {
                    text.clone()
                };
                cache.insert(text.clone(), translated.clone());
                Value::String(translated)
            }
            other => other.clone(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::tests::FakeTranslator;
    use serde_json::json;

    #[test]
    fn test_node_kind_classification() {
        assert_eq!(NodeKind::of(&json!({})), NodeKind::Object);
        assert_eq!(NodeKind::of(&json!([])), NodeKind::Array);
        assert_eq!(NodeKind::of(&json!("Ahoj")), NodeKind::String);
        assert_eq!(NodeKind::of(&json!(4.5)), NodeKind::Number);
        assert_eq!(NodeKind::of(&json!(false)), NodeKind::Bool);
        assert_eq!(NodeKind::of(&Value::Null), NodeKind::Null);
    }

    #[test]
    fn test_tree_stats() {
        let tree = json!({
            "title": "Ahoj",
            "menu": {"home": "Domov", "back": "Ahoj"},
            "items": ["Jeden", 2, null, true],
        });
        let stats = TreeStats::collect(&tree);
        assert_eq!(stats.objects, 2);
        assert_eq!(stats.arrays, 1);
        assert_eq!(stats.strings, 4);
        assert_eq!(stats.unique_strings, 3);
        assert_eq!(stats.other_scalars, 3);
    }

    #[tokio::test]
    async fn test_translate_preserves_structure_and_order() {
        let fake = FakeTranslator::with_table(&[("Ahoj", "Hello"), ("Domov", "Home"), ("Jeden", "One")]);
        let tree = json!({
            "zeta": "Ahoj",
            "alpha": {"home": "Domov", "count": 3},
            "list": ["Jeden", 2, null, false],
        });

        let mut cache = TranslationCache::new();
        let out = translate_tree(&tree, "en", &fake, &mut cache).await;

        assert_eq!(
            out,
            json!({
                "zeta": "Hello",
                "alpha": {"home": "Home", "count": 3},
                "list": ["One", 2, null, false],
            })
        );
        let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "list"]);
    }

    #[tokio::test]
    async fn test_duplicate_strings_translated_once() {
        let fake = FakeTranslator::with_table(&[("Uložiť", "Save")]);
        let tree = json!({
            "save": "Uložiť",
            "dialog": {"confirm": "Uložiť"},
            "buttons": ["Uložiť", "Uložiť"],
        });

        let mut cache = TranslationCache::new();
        let out = translate_tree(&tree, "en", &fake, &mut cache).await;

        assert_eq!(fake.calls(), vec!["Uložiť".to_string()]);
        assert_eq!(cache.hits(), 3);
        assert_eq!(out["buttons"][1], json!("Save"));
    }

    #[tokio::test]
    async fn test_object_keys_do_not_hit_cache() {
        // 键名与某个已翻译的原文相同，不能复用该译文
        let fake = FakeTranslator::with_table(&[("Ahoj", "Hello"), ("Svet", "World")]);
        let tree = json!({"first": "Ahoj", "Ahoj": "Svet"});

        let mut cache = TranslationCache::new();
        let out = translate_tree(&tree, "en", &fake, &mut cache).await;

        assert_eq!(out, json!({"first": "Hello", "Ahoj": "World"}));
    }

    #[tokio::test]
    async fn test_empty_strings_not_sent() {
        let fake = FakeTranslator::default();
        let tree = json!({"blank": "", "again": ""});

        let mut cache = TranslationCache::new();
        let out = translate_tree(&tree, "en", &fake, &mut cache).await;

        assert!(fake.calls().is_empty());
        assert_eq!(out, tree);
    }

    #[tokio::test]
    async fn test_whitespace_strings_are_sent() {
        let fake = FakeTranslator::with_table(&[("  ", "  "), ("\n", "\n")]);
        let tree = json!({"space": "  ", "nl": "\n", "blank": ""});

        let mut cache = TranslationCache::new();
        let out = translate_tree(&tree, "en", &fake, &mut cache).await;

        assert_eq!(fake.calls(), vec!["  ".to_string(), "\n".to_string()]);
        assert_eq!(out, tree);
    }

    #[tokio::test]
    async fn test_failed_string_keeps_original() {
        let fake = FakeTranslator {
            fail_on: vec!["Dovidenia".into()],
            ..FakeTranslator::with_table(&[("Ahoj", "Hello")])
        };
        let tree = json!({"greeting": "Ahoj", "farewell": "Dovidenia"});

        let mut cache = TranslationCache::new();
        let out = translate_tree(&tree, "en", &fake, &mut cache).await;

        assert_eq!(out, json!({"greeting": "Hello", "farewell": "Dovidenia"}));
    }
}
