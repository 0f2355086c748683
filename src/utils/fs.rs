//! IO helper: JSON 文件读写与目标文件路径

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::model::error::AppError;

/// 从文件读取JSON数据
pub async fn read_json_file(p: &Path) -> Result<Value, AppError> {
    let bytes = tokio::fs::read(p).await?;
    let v: Value = serde_json::from_slice(&bytes)?;
    Ok(v)
}

/// 将JSON数据保存到文件（两空格缩进，覆盖原有内容）
pub async fn write_json_file(p: &Path, value: &Value) -> Result<(), AppError> {
    let bytes = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(p, bytes).await?;
    Ok(())
}

/// 目标语言文件与源文件同目录，文件名为小写语言代码
pub fn target_path_for(source: &Path, target_lang: &str) -> PathBuf {
    let file_name = format!("{}.json", target_lang.to_lowercase());
    match source.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// 读取已有的目标语言文件；不存在、无法解析或顶层不是对象时都视为空映射
pub async fn read_existing_target(p: &Path) -> Map<String, Value> {
    match read_json_file(p).await {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            tracing::debug!("目标文件顶层不是对象，按空文件处理: {}", p.display());
            Map::new()
        }
        Err(e) => {
            tracing::debug!("目标文件不可用，按空文件处理: {}: {}", p.display(), e);
            Map::new()
        }
    }
}
