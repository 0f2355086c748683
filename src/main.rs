//! 程序入口：加载 .env、初始化日志、解析参数，并等待所有目标语言翻译完成

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use juzhen_locale_sync::cli::Cli;
use juzhen_locale_sync::{run_all, Config, MyMemoryClient};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 不存在时忽略
    let _ = dotenvy::dotenv();

    // 默认 INFO，可通过 RUST_LOG 覆盖
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .try_init();

    let cli = Cli::parse();
    let config = Config::from_env().context("加载配置失败")?;
    let client = MyMemoryClient::from_config(&config).context("创建翻译客户端失败")?;

    let target_langs = cli.target_languages();
    tracing::info!(
        "源文件 {}（{}），目标语言: {}",
        cli.input.display(),
        config.source_lang,
        target_langs.join(",")
    );

    let summary = run_all(cli.input.clone(), target_langs, Arc::new(client)).await;

    // 单个语言失败不影响退出码
    if summary.all_succeeded() {
        tracing::info!("全部 {} 个目标语言翻译完成", summary.succeeded.len());
    } else {
        tracing::warn!(
            "翻译结束：成功 {} 个，失败 {} 个",
            summary.succeeded.len(),
            summary.failed.len()
        );
    }
    Ok(())
}
