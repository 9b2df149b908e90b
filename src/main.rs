//! 命令行入口
//!
//! 三个面向文档的子命令对应页面端的三种请求：
//! `translate`（翻译页面）、`remove`（移除译文）、`check`（查询状态），
//! 另有 `languages` 列出支持的目标语言。

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use url::Url;

use translayer::core::{
    inspect_html_document, strip_html_document, translate_html_document, TranslayerOptions,
};
use translayer::translation::client::RemoteTranslator;
use translayer::translation::config;

#[derive(Parser)]
#[command(
    name = "translayer",
    version,
    about = "Layer machine translations into HTML documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate the visible text of an HTML document
    Translate {
        /// Input HTML file ("-" reads standard input)
        input: PathBuf,

        /// Target language code (defaults to the saved preference, then the locale)
        #[arg(short = 'l', long)]
        language: Option<String>,

        /// Output file (standard output when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Translation endpoint base URL
        #[arg(long)]
        api_url: Option<String>,

        /// Subscription key (falls back to TRANSLAYER_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Document charset
        #[arg(long)]
        encoding: Option<String>,

        /// Re-translate even if the document was translated before
        #[arg(long)]
        refresh: bool,

        /// Do not embed the metadata comment
        #[arg(long)]
        no_metadata: bool,

        /// Address the document was loaded from
        #[arg(long)]
        page_url: Option<String>,
    },

    /// Remove all translation artifacts from an HTML document
    Remove {
        /// Input HTML file ("-" reads standard input)
        input: PathBuf,

        /// Output file (standard output when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Document charset
        #[arg(long)]
        encoding: Option<String>,
    },

    /// Report whether an HTML document carries translations
    Check {
        /// Input HTML file ("-" reads standard input)
        input: PathBuf,

        /// Document charset
        #[arg(long)]
        encoding: Option<String>,
    },

    /// List supported target languages
    Languages,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("translayer: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Translate {
            input,
            language,
            output,
            api_url,
            api_key,
            encoding,
            refresh,
            no_metadata,
            page_url,
        } => {
            let data = read_input(&input)?;

            let language = language
                .or_else(config::load_last_language)
                .unwrap_or_else(|| config::default_language().to_string());

            if !config::is_supported_language(&language) {
                tracing::warn!("语言代码 {} 不在内置语言表中，按原样使用", language);
            }

            let page_url = page_url.map(|raw| match Url::parse(&raw) {
                Ok(parsed) => parsed.to_string(),
                Err(_) => {
                    tracing::warn!("页面地址无法解析，按原样使用: {}", raw);
                    raw
                }
            });

            let options = TranslayerOptions {
                target_language: Some(language.clone()),
                api_url,
                api_key: api_key.or_else(|| std::env::var("TRANSLAYER_API_KEY").ok()),
                encoding,
                refresh,
                no_metadata,
                page_url,
            };

            let translator = RemoteTranslator::new(options.translation_config());
            let translated = translate_html_document(&data, &translator, &options).await?;

            write_output(output.as_deref(), &translated)?;
            config::store_last_language(&language);
        }

        Commands::Remove {
            input,
            output,
            encoding,
        } => {
            let data = read_input(&input)?;
            let options = TranslayerOptions {
                encoding,
                ..Default::default()
            };

            let (cleaned, removed) = strip_html_document(&data, &options)?;
            tracing::info!("移除了 {} 个合成翻译节点", removed);

            write_output(output.as_deref(), &cleaned)?;
        }

        Commands::Check { input, encoding } => {
            let data = read_input(&input)?;
            let options = TranslayerOptions {
                encoding,
                ..Default::default()
            };

            let has_translation = inspect_html_document(&data, &options)?;
            println!("{}", has_translation);
        }

        Commands::Languages => {
            for (code, name) in config::SUPPORTED_LANGUAGES {
                println!("{:<8} {}", code, name);
            }
        }
    }

    Ok(())
}

fn read_input(path: &std::path::Path) -> io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut data = Vec::new();
        io::stdin().read_to_end(&mut data)?;
        Ok(data)
    } else {
        fs::read(path)
    }
}

fn write_output(path: Option<&std::path::Path>, data: &[u8]) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, data),
        None => io::stdout().write_all(data),
    }
}
