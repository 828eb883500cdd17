use clap::Parser;
use std::path::PathBuf;

use super::config::{AppConfig, PageStrategy};

/// 从 Cybertesis 目录抓取论文元数据并写入 BibTeX 文件
#[derive(Debug, Parser)]
#[command(name = "thesis_bib", version)]
pub struct Cli {
    /// 配置文件路径（默认读取当前目录下的 config.toml，不存在则用默认值）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出的 .bib 文件
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 最多处理的目录页数
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// 显示浏览器窗口
    #[arg(long)]
    pub headed: bool,

    /// 连接到已打开浏览器的远程调试端口
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, value_enum)]
    pub strategy: Option<PageStrategy>,
}

impl Cli {
    /// 命令行参数覆盖配置文件
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(output) = &self.output {
            config.output_file = output.clone();
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if self.headed {
            config.headless = false;
        }
        if let Some(port) = self.port {
            config.debug_port = Some(port);
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
    }
}
