//! 文件合并：翻译源文件、与已有目标文件合并、按源文件键顺序写回

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::model::cache::TranslationCache;
use crate::model::error::AppError;
use crate::model::tree::{translate_tree, TreeStats};
use crate::translator::Translator;
use crate::utils::fs::{read_existing_target, read_json_file, target_path_for, write_json_file};

/// 合并过程中各顶层键的去向
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// 目标文件中原本没有的键
    pub added: Vec<String>,
    /// 已存在但译文发生变化的键
    pub updated: Vec<String>,
    /// 已存在且译文一致的键
    pub unchanged: Vec<String>,
    /// 源文件中已删除、从目标文件移除的键
    pub removed: Vec<String>,
}

impl MergeReport {
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty())
    }
}

/// 单个目标语言的处理结果
#[derive(Debug, Clone)]
pub struct LanguageOutcome {
    pub target_lang: String,
    pub target_path: PathBuf,
    pub report: MergeReport,
    pub cache_hits: usize,
    pub cache_misses: usize,
}

/// 纯合并步骤，不做任何 IO
///
/// 1. 按源文件键顺序，译文与已有值相同的键视为已满足，其余键作为更新；
/// 2. 已有目标中不在译文里的键被删除；
/// 3. 以已有目标为底叠加更新；
/// 4. 按源文件顶层键顺序重新输出，只保留源文件中存在的键。
pub fn merge_documents(
    source: &Map<String, Value>,
    translated: &Map<String, Value>,
    existing: Map<String, Value>,
) -> (Map<String, Value>, MergeReport) {
    let mut report = MergeReport::default();
    let mut updates = Map::new();

    for key in source.keys() {
        let Some(new_value) = translated.get(key) else {
            continue;
        };
        match existing.get(key) {
            Some(old) if old == new_value => report.unchanged.push(key.clone()),
            Some(_) => {
                report.updated.push(key.clone());
                updates.insert(key.clone(), new_value.clone());
            }
            None => {
                report.added.push(key.clone());
                updates.insert(key.clone(), new_value.clone());
            }
        }
    }

    let mut merged = existing;
    merged.retain(|key, _| {
        let keep = translated.contains_key(key);
        if !keep {
            report.removed.push(key.clone());
        }
        keep
    });
    merged.extend(updates);

    let mut ordered = Map::with_capacity(source.len());
    for key in source.keys() {
        if let Some(value) = merged.remove(key) {
            ordered.insert(key.clone(), value);
        }
    }
    (ordered, report)
}

/// 处理一个目标语言：读取、翻译、合并并覆盖写入 `<lang>.json`
pub async fn merge_and_write(
    source_path: &Path,
    target_lang: &str,
    translator: &dyn Translator,
) -> Result<LanguageOutcome, AppError> {
    let source = match read_json_file(source_path).await? {
        Value::Object(map) => map,
        _ => {
            return Err(AppError::State(format!(
                "源文件顶层必须是对象: {}",
                source_path.display()
            )))
        }
    };

    let target_path = target_path_for(source_path, target_lang);
    let existing = read_existing_target(&target_path).await;

    let source_tree = Value::Object(source);
    let stats = TreeStats::collect(&source_tree);
    tracing::info!(
        "开始翻译到 {}: {} 个字符串，{} 个不同原文",
        target_lang.to_lowercase(),
        stats.strings,
        stats.unique_strings
    );

    let mut cache = TranslationCache::new();
    let translated = translate_tree(&source_tree, target_lang, translator, &mut cache).await;
    let (Value::Object(source), Value::Object(translated)) = (source_tree, translated) else {
        return Err(AppError::State("翻译结果结构与源文件不一致".into()));
    };

    let (ordered, report) = merge_documents(&source, &translated, existing);
    write_json_file(&target_path, &Value::Object(ordered)).await?;

    tracing::info!(
        "翻译到 {} 完成，输出已保存到 {} (新增 {}，更新 {}，未变 {}，删除 {}；缓存命中 {}，未命中 {})",
        target_lang.to_lowercase(),
        target_path.display(),
        report.added.len(),
        report.updated.len(),
        report.unchanged.len(),
        report.removed.len(),
        cache.hits(),
        cache.misses()
    );

    Ok(LanguageOutcome {
        target_lang: target_lang.to_string(),
        target_path,
        report,
        cache_hits: cache.hits(),
        cache_misses: cache.misses(),
    })
}
