use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{ENTRY_TYPE, ThesisRecord};

pub const DEFAULT_BIB_FILE: &str = "tesis.bib";

/// 字段值加引号；值里有双引号时改用花括号
fn quote(value: &str) -> String {
    if value.contains('"') {
        format!("{{{}}}", value)
    } else {
        format!("\"{}\"", value)
    }
}

/// 把一条记录渲染成 BibTeX 文本
pub fn render_entry(record: &ThesisRecord) -> String {
    let mut out = format!("@{}{{{}", ENTRY_TYPE, record.key);
    for (name, value) in record.fields() {
        out.push_str(&format!(",\n    {} = {}", name, quote(value)));
    }
    out.push_str("\n}\n");
    out
}

/// 追加写入 .bib 文件：每条记录单独打开、写入、关闭
#[derive(Debug, Clone)]
pub struct BibWriter {
    path: PathBuf,
}

impl Default for BibWriter {
    fn default() -> Self {
        Self::new(DEFAULT_BIB_FILE)
    }
}

impl BibWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &ThesisRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("创建输出目录失败: {}", parent.display()))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("打开输出文件失败: {}", self.path.display()))?;
        file.write_all(render_entry(record).as_bytes())
            .with_context(|| format!("写入输出文件失败: {}", self.path.display()))?;

        debug!("已写入记录 {} -> {}", record.key, self.path.display());
        Ok(())
    }
}
