use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use recipeui::config::{Config, ConfigLoader};
use recipeui::curl::parse_curl;
use recipeui::http::Client;
use recipeui::output::printer::outputs_table;
use recipeui::output::{FileOutputStore, OutputApi};
use recipeui::runner::RequestRunner;
use recipeui::template::RecipeTemplate;
use recipeui::utils::{ResponseFormat, ResponseFormatter};
use tracing::debug;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 默认日志级别 (RUST_LOG 优先)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 解析 curl 命令并输出 JSON
    Parse {
        /// curl 命令；省略或为 "-" 时从 stdin 读取
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        curl: Vec<String>,
    },
    /// 解析并发送 curl 命令，记录输出
    Send {
        /// 会话 ID
        #[arg(short, long)]
        session: Option<String>,

        /// 显示响应头
        #[arg(short, long)]
        verbose: bool,

        /// 请求模板文件 (JSON5)
        #[arg(short, long)]
        template: Option<PathBuf>,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        curl: Vec<String>,
    },
    /// 列出会话中的输出 (最新在前)
    Outputs {
        #[arg(short, long)]
        session: Option<String>,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// 清空会话输出
    Clear {
        #[arg(short, long)]
        session: Option<String>,
    },
}

struct CliRunner {
    config: Config,
}

impl CliRunner {
    fn new(config: Config) -> Self {
        Self { config }
    }

    fn output_api(&self) -> OutputApi {
        let store = FileOutputStore::new(self.config.output_dir());
        OutputApi::with_capacity(Arc::new(store), self.config.output.max_entries)
    }

    fn session<'a>(&'a self, session: &'a Option<String>) -> &'a str {
        session
            .as_deref()
            .unwrap_or(self.config.session.default.as_str())
    }

    fn parse(&self, args: &[String]) -> Result<()> {
        let input = read_curl_input(args)?;
        let descriptor = parse_curl(&input);
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
        Ok(())
    }

    async fn send(
        &self,
        session: &Option<String>,
        verbose: bool,
        template: Option<&PathBuf>,
        args: &[String],
    ) -> Result<()> {
        let input = read_curl_input(args)?;
        let mut descriptor = parse_curl(&input);

        if let Some(path) = template {
            let template = RecipeTemplate::load(path)
                .with_context(|| format!("Failed to load template {}", path.display()))?;
            debug!("Applying template {}", template.title);
            template.apply(&mut descriptor);
        }

        let client = Client::with_timeout(self.config.timeout())?;
        let runner = RequestRunner::new(client, self.output_api());
        let response = runner.run(self.session(session), &descriptor).await?;

        let format = if verbose {
            ResponseFormat::Verbose
        } else {
            ResponseFormat::Compact
        };
        println!("{}", ResponseFormatter::new(format).format(&response));
        Ok(())
    }

    fn list(&self, session: &Option<String>, limit: usize) -> Result<()> {
        let session = self.session(session);
        let outputs: Vec<_> = self
            .output_api()
            .outputs(session)?
            .into_iter()
            .take(limit)
            .collect();

        if outputs.is_empty() {
            println!("No outputs for session {}", session);
        } else {
            println!("{}", outputs_table(&outputs));
        }
        Ok(())
    }

    fn clear(&self, session: &Option<String>) -> Result<()> {
        let session = self.session(session);
        self.output_api().clear_output(session)?;
        println!("Cleared outputs for session {}", session);
        Ok(())
    }
}

/// 读取 curl 输入
///
/// 单个参数原样使用；多个参数按 shell 规则重新加引号拼接；
/// 没有参数或参数为 "-" 时从 stdin 读取 (支持多行粘贴)。
fn read_curl_input(args: &[String]) -> Result<String> {
    match args {
        [] => read_stdin(),
        [single] if single == "-" => read_stdin(),
        [single] => Ok(single.clone()),
        many => Ok(join_shell_args(many)),
    }
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read curl command from stdin")?;
    Ok(input)
}

/// 重新给参数加引号，使 tokenizer 能还原 shell 已拆分的参数
fn join_shell_args(args: &[String]) -> String {
    args.iter()
        .map(|arg| quote_arg(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    let needs_quotes = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\'));

    if !needs_quotes {
        arg.to_string()
    } else if arg.contains('\'') {
        format!("\"{}\"", arg)
    } else {
        format!("'{}'", arg)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let runner = CliRunner::new(ConfigLoader::load_or_default());

    match &cli.command {
        Commands::Parse { curl } => runner.parse(curl),
        Commands::Send {
            session,
            verbose,
            template,
            curl,
        } => runner.send(session, *verbose, template.as_ref(), curl).await,
        Commands::Outputs { session, limit } => runner.list(session, *limit),
        Commands::Clear { session } => runner.clear(session),
    }
}
