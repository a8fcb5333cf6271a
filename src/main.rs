//! rsniffer 命令行工具
//! 按 UA 过滤样式表（文件或标准输入），结果写到标准输出

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rsniffer::{ConfigManager, Sniffer};

/// 服务端浏览器嗅探：按 UA 过滤带条件注释的样式表
#[derive(Parser, Debug)]
#[command(name = "rsniffer", version, about, long_about = None)]
struct Cli {
    /// 待过滤的文件（缺省读取标准输入）
    file: Option<PathBuf>,

    /// 浏览器 UA 字符串
    #[arg(short, long, env = "HTTP_USER_AGENT")]
    user_agent: Option<String>,

    /// 只输出浏览器画像（JSON）
    #[arg(long)]
    profile: bool,

    /// 关闭结果缓存
    #[arg(long)]
    no_cache: bool,

    /// 缓存目录
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// 启用浏览器黑名单
    #[arg(long)]
    blacklist: bool,

    /// 详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 日志输出到 stderr，避免污染过滤结果
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut builder = ConfigManager::custom()
        .cache(!cli.no_cache)
        .blacklist(cli.blacklist)
        .verbose(cli.verbose);
    if let Some(dir) = cli.cache_dir {
        builder = builder.cache_dir(dir);
    }
    let sniffer = Sniffer::from_user_agent(builder.build(), cli.user_agent.as_deref());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.profile {
        let json = serde_json::to_string_pretty(sniffer.profile())?;
        writeln!(out, "{}", json)?;
        return Ok(());
    }

    match cli.file {
        Some(path) => {
            let output = sniffer
                .sniff_file(&path)
                .await
                .with_context(|| format!("过滤失败：{}", path.display()))?;
            out.write_all(output.as_bytes())?;
        }
        None => {
            let stdin = io::stdin();
            for line in sniffer.sniff_reader(stdin.lock()) {
                out.write_all(line.context("读取标准输入失败")?.as_bytes())?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
