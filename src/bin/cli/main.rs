mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flipdeck", about = "Flashcard study client", version)]
struct Cli {
    /// Read provider settings from this TOML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        /// Full name stored with the account
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
        /// Accept the terms of service
        #[arg(long)]
        accept_terms: bool,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List your topics, newest first
    Topics,

    /// Create a topic
    NewTopic {
        name: String,
    },

    /// List the cards of a topic, newest first
    Cards {
        topic_id: String,
    },

    /// Add a card to a topic
    NewCard {
        topic_id: String,
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
    },

    /// Launch interactive TUI
    #[cfg(feature = "tui")]
    Tui {
        /// Start at this location (e.g. /dashboard or /topic/3)
        #[arg(long, default_value = "/")]
        path: String,
    },
}

/// Use the given password or read one line from stdin
fn resolve_password(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    if stdin_is_tty() {
        eprint!("Password: ");
    }
    let mut buf = String::new();
    std::io::stdin().read_line(&mut buf)?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}

/// Check if stdin is a terminal (not piped)
fn stdin_is_tty() -> bool {
    unsafe { libc_isatty(0) != 0 }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let config = cli.config.as_deref();

    #[cfg(feature = "tui")]
    let launches_tui = matches!(cli.command, None | Some(Command::Tui { .. }));
    #[cfg(not(feature = "tui"))]
    let launches_tui = false;

    if launches_tui {
        app::init_file_logging()?;
    } else {
        env_logger::init();
    }

    match cli.command {
        None => {
            // No subcommand → launch TUI
            #[cfg(feature = "tui")]
            {
                tui::run(config, "/")?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        Some(Command::Login { email, password }) => {
            let mut app = app::CliApp::new(config, "/login")?;
            let password = resolve_password(password)?;
            commands::login::run(&mut app, &email, &password, &cli.format, use_color)?;
        }
        Some(Command::Register {
            name,
            email,
            password,
            accept_terms,
        }) => {
            let mut app = app::CliApp::new(config, "/register")?;
            let password = resolve_password(password)?;
            let form = commands::register::Form {
                full_name: name,
                email,
                password,
                accept_terms,
            };
            commands::register::run(&mut app, form, &cli.format, use_color)?;
        }
        Some(Command::Logout) => {
            let mut app = app::CliApp::new(config, "/dashboard")?;
            commands::logout::run(&mut app, &cli.format)?;
        }
        Some(Command::Whoami) => {
            let app = app::CliApp::new(config, "/dashboard")?;
            commands::whoami::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Topics) => {
            let mut app = app::CliApp::new(config, "/dashboard")?;
            commands::topics::run(&mut app, &cli.format, use_color)?;
        }
        Some(Command::NewTopic { name }) => {
            let mut app = app::CliApp::new(config, "/dashboard")?;
            commands::new_topic::run(&mut app, &name, &cli.format)?;
        }
        Some(Command::Cards { topic_id }) => {
            let mut app = app::CliApp::new(config, &format!("/topic/{}", topic_id))?;
            commands::cards::run(&mut app, &cli.format, use_color)?;
        }
        Some(Command::NewCard {
            topic_id,
            question,
            answer,
        }) => {
            let mut app = app::CliApp::new(config, &format!("/topic/{}", topic_id))?;
            commands::new_card::run(&mut app, &question, &answer, &cli.format)?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Tui { path }) => {
            tui::run(config, &path)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
