//! 命令行参数：`--input=<源文件>` 与 `--output=<逗号分隔的语言代码>`

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "juzhen_locale_sync")]
#[command(version)]
#[command(about = "将源语言 JSON 本地化文件翻译并合并到各目标语言文件")]
pub struct Cli {
    /// 源语言 JSON 文件路径
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// 目标语言代码，逗号分隔（如 en,de,cs）
    #[arg(long, value_name = "LANGS", value_delimiter = ',', required = true)]
    pub output: Vec<String>,
}

impl Cli {
    /// 去除空白与空项；大小写不同的同一语言只保留第一次出现（它们会写入同一个文件）
    pub fn target_languages(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.output
            .iter()
            .map(|lang| lang.trim())
            .filter(|lang| !lang.is_empty())
            .filter(|lang| seen.insert(lang.to_lowercase()))
            .map(str::to_string)
            .collect()
    }
}
