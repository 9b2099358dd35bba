//! BRILL CLI
//!
//! Terminal client for the BRILL bank:
//! - Open an account or log in
//! - Check the balance and recent operations
//! - Transfer to a card
//! - Ask the AI assistant

use anyhow::{bail, Context};
use brill::banking::{format_rubles, TransferForm};
use brill::client::chat::UNREACHABLE;
use brill::client::{BankClient, ChatLog, ClientError, Sender, Session, SessionStore};
use brill::config::{expand_path, generate_default_config, Config};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brill-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for the BRILL bank")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (default: client.server_url from config)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Session file (default: client.session_file from config)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a new account
    Register {
        /// Email
        email: String,
        /// Full name, e.g. "Иван Иванов"
        #[arg(short = 'n', long)]
        full_name: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log into an existing account
    Login {
        /// Email
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the account and balance
    Status,

    /// Transfer money to a card
    Transfer {
        /// Card number, 16 digits (spaces allowed)
        card: String,
        /// Amount in rubles
        amount: String,
    },

    /// Show recent operations
    History {
        /// Number of operations
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Ask the AI assistant (interactive when no message is given)
    Chat {
        /// Question
        message: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Ошибка: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_default().config;
    let server = cli.server.unwrap_or(config.client.server_url);
    let sessions = SessionStore::new(
        cli.session_file
            .unwrap_or_else(|| expand_path(&config.client.session_file)),
    );
    let client = BankClient::new(server)?;

    match cli.command {
        Commands::Register {
            email,
            full_name,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let session = client.register(&email, &password, &full_name).await?;
            sessions.save(&session)?;
            println!("Добро пожаловать! Регистрация прошла успешно");
            print_account(&session);
        }

        Commands::Login { email, password } => {
            let password = password_or_prompt(password)?;
            let session = client.login(&email, &password).await?;
            sessions.save(&session)?;
            println!("Успешно! Вы вошли в систему");
            print_account(&session);
        }

        Commands::Logout => {
            sessions.clear()?;
            println!("Вы вышли из системы");
        }

        Commands::Status => {
            let mut session = require_session(&sessions)?;
            match client.transactions(session.user.id, 1).await {
                Ok((balance, _)) => {
                    if let Some(updated) = sessions.update_balance(balance)? {
                        session = updated;
                    }
                }
                Err(e) => eprintln!("Баланс может быть неактуален: {}", e),
            }
            print_account(&session);
        }

        Commands::Transfer { card, amount } => {
            let session = require_session(&sessions)?;

            let mut form = TransferForm::new();
            form.set_card(&card);
            form.set_amount(&amount);
            let transfer = form
                .validate()
                .map_err(|e| ClientError::Validation(e.to_string()))?;

            let result = client
                .transfer(session.user.id, transfer.card.as_str(), transfer.amount)
                .await?;
            sessions.update_balance(result.new_balance)?;

            println!("Успешно! {}", result.message);
            println!("Баланс: {} ₽", format_rubles(result.new_balance));
        }

        Commands::History { limit } => {
            let session = require_session(&sessions)?;
            let (balance, transactions) = client.transactions(session.user.id, limit).await?;
            sessions.update_balance(balance)?;

            if transactions.is_empty() {
                println!("Операций пока нет");
            } else {
                println!("{:<12} {:<36} {:>14}", "Дата", "Описание", "Сумма");
                println!("{}", "-".repeat(64));
                for tx in &transactions {
                    let signed = tx.signed_amount();
                    let sign = if signed.0 > 0 { "+" } else { "" };
                    println!(
                        "{:<12} {:<36} {:>14}",
                        format_date(&tx.created_at),
                        tx.description,
                        format!("{}{} ₽", sign, format_rubles(signed)),
                    );
                }
            }
            println!();
            println!("Баланс: {} ₽", format_rubles(balance));
        }

        Commands::Chat { message } => match message {
            Some(message) => {
                let mut log = ChatLog::new();
                let Some(text) = log.begin(&message) else {
                    bail!("Сообщение не может быть пустым");
                };
                let reply = client.chat(&text).await.map_err(chat_error)?;
                println!("{}", reply);
            }
            None => interactive_chat(&client).await?,
        },

        Commands::Config { output } => {
            let config = generate_default_config();
            if let Some(path) = output {
                std::fs::write(&path, config)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {:?}", path);
            } else {
                print!("{}", config);
            }
        }
    }

    Ok(())
}

async fn interactive_chat(client: &BankClient) -> anyhow::Result<()> {
    let mut log = ChatLog::new();
    for message in log.messages() {
        println!("AI: {}", message.text);
    }
    println!("(пустая строка или Ctrl+D для выхода)");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let Some(text) = log.begin(line.trim_end_matches(['\r', '\n'])) else {
            break;
        };

        match client.chat(&text).await {
            Ok(reply) => {
                log.complete(reply);
                if let Some(last) = log.messages().last().filter(|m| m.sender == Sender::Ai) {
                    println!("AI: {}", last.text);
                }
            }
            Err(e) => {
                log.fail();
                eprintln!("Ошибка: {}", chat_error(e));
            }
        }
    }

    Ok(())
}

/// Chat failures use the widget's wording
fn chat_error(err: ClientError) -> anyhow::Error {
    match err {
        ClientError::Network(_) => anyhow::anyhow!(UNREACHABLE),
        other => other.into(),
    }
}

fn require_session(sessions: &SessionStore) -> anyhow::Result<Session> {
    sessions.load()?.ok_or_else(|| ClientError::NotLoggedIn.into())
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    print!("Пароль: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_account(session: &Session) {
    println!();
    println!("Добрый день, {}!", session.user.first_name());
    println!("  {}", session.user.email);
    println!("  Баланс: {} ₽", format_rubles(session.user.balance));
}

/// `2024-11-18T10:00:00Z` as `18.11.2024`
fn format_date(rfc3339: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|_| rfc3339.to_string())
}
