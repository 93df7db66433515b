use anyhow::{Context, Result};
use clap::Parser;
use parse_questions::extractor::Backend;
use parse_questions::output::OutputFormat;
use parse_questions::utils::logging;
use parse_questions::{App, Config};
use std::path::PathBuf;

/// 解析題庫 HTML 並輸出 `|` 分隔的答案表
#[derive(Debug, Parser)]
#[command(name = "parse_questions", version, about, long_about = None)]
struct Args {
    /// 輸入 HTML 檔案（預設: questions.html）
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 輸出檔案（預設: 自動編號）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 輸出格式
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// 解析後端
    #[arg(short, long, value_enum)]
    parser: Option<Backend>,

    /// TOML 設定檔
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 顯示詳細日誌
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 加载配置：默认值 < 配置文件 < 环境变量 < 命令行
    let mut config = Config::load(args.config.as_deref()).context("加载配置失败")?;
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(parser) = args.parser {
        config.parser = parser;
    }
    config.verbose_logging |= args.verbose;

    logging::init(config.verbose_logging);

    let app = App::new(config);
    let outcome = app
        .run(args.input.as_deref(), args.output.as_deref())
        .context("解析题库失败")?;

    println!("{}", outcome.status_line());
    Ok(())
}
