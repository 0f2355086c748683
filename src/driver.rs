//! 调度：每个目标语言一个任务，全部并发执行并在返回前等待完成

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::model::merger::{merge_and_write, LanguageOutcome};
use crate::translator::Translator;

#[derive(Debug, Clone)]
pub struct LanguageFailure {
    /// 任务异常退出时无法得知语言
    pub target_lang: Option<String>,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub succeeded: Vec<LanguageOutcome>,
    pub failed: Vec<LanguageFailure>,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 为每个目标语言启动独立任务（各自持有自己的翻译缓存），并等待全部结束
pub async fn run_all(
    source_path: PathBuf,
    target_langs: Vec<String>,
    translator: Arc<dyn Translator>,
) -> RunSummary {
    let mut tasks = JoinSet::new();
    for lang in target_langs {
        let source_path = source_path.clone();
        let translator = Arc::clone(&translator);
        tasks.spawn(async move {
            let result = merge_and_write(&source_path, &lang, translator.as_ref()).await;
            (lang, result)
        });
    }

    let mut summary = RunSummary::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(outcome))) => summary.succeeded.push(outcome),
            Ok((lang, Err(e))) => {
                tracing::error!("翻译到 {} 失败: {}", lang.to_lowercase(), e);
                summary.failed.push(LanguageFailure {
                    target_lang: Some(lang),
                    error: e.to_string(),
                });
            }
            Err(e) => {
                tracing::error!("翻译任务异常退出: {}", e);
                summary.failed.push(LanguageFailure {
                    target_lang: None,
                    error: e.to_string(),
                });
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::tests::FakeTranslator;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_all_languages_written_before_return() {
        let dir = TempDir::new().unwrap();
        let source_path = dir.path().join("sk.json");
        std::fs::write(&source_path, r#"{"greeting": "Ahoj"}"#).unwrap();

        let translator: Arc<dyn Translator> = Arc::new(FakeTranslator::default());
        let summary = run_all(
            source_path,
            vec!["en".into(), "DE".into(), "cs".into()],
            translator,
        )
        .await;

        assert!(summary.all_succeeded());
        assert_eq!(summary.succeeded.len(), 3);
        for lang in ["en", "de", "cs"] {
            assert!(dir.path().join(format!("{}.json", lang)).exists(), "{} 应已写入", lang);
        }
    }

    #[tokio::test]
    async fn test_source_failure_reported_per_language() {
        let dir = TempDir::new().unwrap();
        let translator: Arc<dyn Translator> = Arc::new(FakeTranslator::default());
        let summary = run_all(dir.path().join("missing.json"), vec!["en".into(), "de".into()], translator).await;

        assert!(summary.succeeded.is_empty());
        assert_eq!(summary.failed.len(), 2);
        let mut langs: Vec<_> = summary.failed.iter().filter_map(|f| f.target_lang.clone()).collect();
        langs.sort();
        assert_eq!(langs, vec!["de", "en"]);
    }

    #[tokio::test]
    async fn test_write_failure_does_not_stop_other_languages() {
        let dir = TempDir::new().unwrap();
        let source_path = dir.path().join("sk.json");
        std::fs::write(&source_path, r#"{"greeting": "Ahoj"}"#).unwrap();
        std::fs::create_dir(dir.path().join("en.json")).unwrap();

        let translator: Arc<dyn Translator> = Arc::new(FakeTranslator::default());
        let summary = run_all(source_path, vec!["en".into(), "de".into()], translator).await;

        assert_eq!(summary.succeeded.len(), 1);
        assert_eq!(summary.succeeded[0].target_lang, "de");
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].target_lang.as_deref(), Some("en"));
        assert!(dir.path().join("de.json").is_file());
    }

    #[tokio::test]
    async fn test_each_language_has_own_cache() {
        let dir = TempDir::new().unwrap();
        let source_path = dir.path().join("sk.json");
        std::fs::write(&source_path, r#"{"a": "Ahoj", "b": "Ahoj"}"#).unwrap();

        let fake = Arc::new(FakeTranslator::default());
        let translator: Arc<dyn Translator> = fake.clone();
        let summary = run_all(source_path, vec!["en".into(), "de".into()], translator).await;

        assert!(summary.all_succeeded());
        // 每个语言各请求一次
        assert_eq!(fake.calls().len(), 2);
    }
}
