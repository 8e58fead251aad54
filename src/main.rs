use anyhow::Context;
use api_client::{FileTokenStore, HttpApiClient, TokenStore};
use clap::{Parser, Subcommand};
use configuration::LogLevel;
use rust_decimal::Decimal;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use ui::{
    AccountPage, ConsultPage, DEFAULT_INITIAL_FUNDS, LoginPage, Page, PageContext, RegisterPage,
    StrategyPage, TerminalSurface, TradePage,
};

/// The main entry point for the Stockpilot advisory client.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; it only carries optional overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    let _log_guard = configuration::init_tracing(&config.logging)?;

    let tokens: Arc<dyn TokenStore> = Arc::new(match &config.session.token_file {
        Some(path) => FileTokenStore::with_path(path.clone()),
        None => FileTokenStore::new(),
    });
    let client = HttpApiClient::new(&config.api, tokens.clone())
        .context("Failed to build the HTTP client")?;
    tracing::debug!(base_url = client.base_url(), "Client ready.");

    let ctx = PageContext::new(Arc::new(client), tokens);
    let mut surface = TerminalSurface::new();
    let mut prompt = Prompt::new();

    match cli.command {
        Commands::Login(args) => {
            let password = match args.password {
                Some(password) => password,
                None => read_password("密码: ").await?,
            };
            LoginPage::new(ctx.clone())
                .submit(&mut surface, &args.username, &password)
                .await;
            // Landing page after a successful login.
            if surface.redirected_to() == Some(Page::Trade) {
                TradePage::new(ctx).open(&mut surface).await;
            }
        }
        Commands::Register(args) => {
            let password = match args.password {
                Some(password) => password,
                None => read_password("密码: ").await?,
            };
            let confirm = match args.confirm {
                Some(confirm) => confirm,
                None => read_password("确认密码: ").await?,
            };
            RegisterPage::new(ctx)
                .submit(
                    &mut surface,
                    &args.username,
                    &password,
                    &confirm,
                    args.initial_funds,
                )
                .await;
        }
        Commands::Logout => AccountPage::new(ctx).logout(&mut surface),
        Commands::Whoami => AccountPage::new(ctx).whoami(&mut surface).await,
        Commands::Consult { question } => {
            let page = ConsultPage::new(ctx);
            if !page.open(&mut surface).await {
                return Ok(());
            }
            if question.is_empty() {
                println!("输入问题后回车发送，输入 exit 退出。");
                while let Some(line) = prompt.ask("问题> ").await? {
                    if is_exit(&line) {
                        break;
                    }
                    page.send_message(&mut surface, &line).await;
                }
            } else {
                page.send_message(&mut surface, &question.join(" ")).await;
            }
        }
        Commands::Strategy { instruction } => {
            let page = StrategyPage::new(ctx);
            if !page.open(&mut surface).await {
                return Ok(());
            }
            if instruction.is_empty() {
                println!("描述您的投资需求后回车生成策略，输入 exit 退出。");
                while let Some(line) = prompt.ask("需求> ").await? {
                    if is_exit(&line) {
                        break;
                    }
                    page.generate(&mut surface, &line).await;
                }
            } else {
                page.generate(&mut surface, &instruction.join(" ")).await;
            }
        }
        Commands::Positions => {
            TradePage::new(ctx).open(&mut surface).await;
        }
        Commands::Trade(args) => {
            let page = TradePage::new(ctx);
            if page.open(&mut surface).await {
                page.submit_trade(&mut surface, &args.action, &args.code, &args.quantity)
                    .await;
            }
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Terminal client for the securities advisory backend.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a configuration file (defaults to ./stockpilot.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides `api.base_url` (e.g., "http://localhost:8000").
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Overrides `logging.level`.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token.
    Login(LoginArgs),
    /// Create a new account.
    Register(RegisterArgs),
    /// Forget the stored session token.
    Logout,
    /// Verify the stored session with the backend.
    Whoami,
    /// Ask the assistant a question; starts a chat when no question is given.
    Consult { question: Vec<String> },
    /// Generate an investment strategy; starts a chat when no instruction is given.
    Strategy { instruction: Vec<String> },
    /// Show current holdings.
    Positions,
    /// Submit a buy or sell order, then show holdings.
    Trade(TradeArgs),
}

#[derive(Parser)]
struct LoginArgs {
    #[arg(long, short)]
    username: String,

    /// Prompted for when omitted.
    #[arg(long, short)]
    password: Option<String>,
}

#[derive(Parser)]
struct RegisterArgs {
    #[arg(long, short)]
    username: String,

    /// Prompted for when omitted.
    #[arg(long, short)]
    password: Option<String>,

    /// Prompted for when omitted.
    #[arg(long)]
    confirm: Option<String>,

    /// Starting cash balance of the account.
    #[arg(long, default_value_t = DEFAULT_INITIAL_FUNDS)]
    initial_funds: Decimal,
}

#[derive(Parser)]
struct TradeArgs {
    /// "buy" or "sell".
    #[arg(long)]
    action: String,

    /// Stock code (e.g., "600000").
    #[arg(long)]
    code: String,

    /// Number of shares.
    #[arg(long)]
    quantity: String,
}

fn is_exit(line: &str) -> bool {
    matches!(line.trim(), "exit" | "quit" | "退出")
}

/// Prompts for a password on the terminal without echoing it.
async fn read_password(label: &'static str) -> anyhow::Result<String> {
    let password = tokio::task::spawn_blocking(move || rpassword::prompt_password(label))
        .await?
        .context("Failed to read password")?;
    Ok(password)
}

/// Line-oriented prompts on stdin.
struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prints `label` and reads one line. `None` at end of input.
    async fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        print!("{}", label);
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }
}
