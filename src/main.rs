//! # 图片输入工具 — 命令行入口
//!
//! 本文件仅负责日志初始化、参数解析与结果输出。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;
use std::process::ExitCode;

use bytes::Bytes;
use clap::{Parser, Subcommand};
use image_intake::error::AppError;
use image_intake::form::{FormState, ImageInputForm, MessageLevel, check_upload_size};
use image_intake::image_source::{
    ImageSourceResolver, InputMode, RawInput, ResolverConfig, SystemClipboard, paste_capability,
};
use image_intake::settings;

#[derive(Parser)]
#[command(name = "image-intake")]
#[command(about = "Provide an image by file upload, URL or clipboard paste", long_about = None)]
struct Cli {
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the URL fetch timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Print the outcome as a JSON report
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the input methods offered in this environment
    Modes,
    /// Upload a local image file
    Upload {
        /// Image file path
        path: PathBuf,
    },
    /// Fetch an image from a URL
    Url {
        /// Image URL
        url: String,
    },
    /// Paste an image from the system clipboard
    Paste,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("❌ {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let config = match &cli.config {
        Some(path) => settings::load_settings(path)?,
        None => ResolverConfig::default(),
    };
    let config = settings::with_timeout_override(config, cli.timeout)?;

    // 能力只在启动时探测一次
    let paste_available = paste_capability();
    let resolver = ImageSourceResolver::new(config)?;
    let mut form = ImageInputForm::new(resolver, paste_available);

    match cli.command {
        Commands::Modes => {
            for mode in form.offered_modes() {
                println!("{}\t{}", mode.as_str(), mode.label());
            }
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Upload { path } => {
            form.choose_mode(InputMode::UploadFile)?;
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned());
            let size = std::fs::metadata(&path)?.len();
            check_upload_size(&filename, size, form.max_file_size())?;
            let bytes = std::fs::read(&path)?;
            form.submit(RawInput::UploadFile {
                filename,
                bytes: Bytes::from(bytes),
            })
            .await?;
        }
        Commands::Url { url } => {
            form.choose_mode(InputMode::EnterUrl)?;
            form.submit(RawInput::EnterUrl { url }).await?;
        }
        Commands::Paste => {
            form.choose_mode(InputMode::PasteFromClipboard)?;
            form.paste(&mut SystemClipboard).await?;
        }
    }

    if cli.json {
        let report = serde_json::to_string_pretty(&form.report()).map_err(std::io::Error::from)?;
        println!("{}", report);
    } else {
        for message in form.messages() {
            match message.level {
                MessageLevel::Error | MessageLevel::Warning => eprintln!("{}", message.text),
                MessageLevel::Info | MessageLevel::Success => println!("{}", message.text),
            }
        }
    }

    Ok(match form.state() {
        FormState::Failed { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
