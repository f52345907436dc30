//! `coolant-cli`: drive the console core from a terminal.
//!
//! The credential lives in `--state-dir`, so a `login` in one invocation is
//! picked up by the next one, like a browser tab reopening.
//!
//! ```text
//! coolant-cli login --email ada@example.com --password secret
//! coolant-cli whoami
//! coolant-cli menu
//! coolant-cli open /machines
//! coolant-cli get /readings
//! coolant-cli logout
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use coolant::prelude::*;
use coolant::transport::HttpTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error("not logged in; run `coolant-cli login` first")]
    NotLoggedIn,
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "coolant-cli", about = "Coolant Manager console from the command line")]
struct Cli {
    #[arg(long, env = "COOLANT_API_BASE_URL", default_value = coolant::DEFAULT_API_BASE_URL)]
    api_base_url: String,

    #[arg(long, env = "COOLANT_STATE_DIR", default_value = ".coolant")]
    state_dir: PathBuf,

    #[arg(long, env = "COOLANT_REQUEST_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the credential.
    Login {
        #[arg(long, env = "COOLANT_EMAIL")]
        email: String,
        #[arg(long, env = "COOLANT_PASSWORD")]
        password: String,
    },
    /// Show the signed-in user.
    Whoami,
    /// Forget the persisted credential.
    Logout,
    /// Request a password reset link.
    Forgot {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with a reset token.
    Reset {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
    },
    /// List the sidebar entries for the signed-in user.
    Menu,
    /// Open a view through the route guard.
    Open { path: String },
    /// Authorized GET against any API path, printing the JSON body.
    Get { path: String },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    coolant::telemetry::init();
    let cli = Cli::parse();

    let config = ConsoleConfig {
        api_base_url: cli.api_base_url,
        state_dir: Some(cli.state_dir),
        request_timeout: cli.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
    };
    let console = Console::builder().config(config).build()?;

    let result = run(&console, cli.command).await;
    print_notifications(&console);
    console.shutdown();
    result
}

async fn run(console: &Console<HttpTransport>, command: Command) -> Result<(), CliError> {
    let initial = match &command {
        Command::Open { path } => Route::parse(path),
        Command::Forgot { .. } => Route::ForgotPassword,
        Command::Reset { token, .. } => Route::ResetPassword {
            token: token.clone(),
        },
        _ => Route::Root,
    };
    let landing = console.start(initial).await?;
    tracing::debug!(route = %landing, "started");

    match command {
        Command::Login { email, password } => {
            // Failures are reported through the notification queue.
            if console.session().login(&email, &password).await.is_ok() {
                println!("now at {}", console.history().current());
            }
        }
        Command::Whoami => {
            let user = console.session().current_user().ok_or(CliError::NotLoggedIn)?;
            println!("{} <{}>", user.full_name, user.email);
            println!("  id:      {}", user.id);
            println!("  role:    {}", user.role);
            if let Some(company) = &user.company_name {
                println!("  company: {company}");
            }
        }
        Command::Logout => console.session().logout(),
        Command::Forgot { email } => {
            let _ = console.session().forgot_password(&email).await;
        }
        Command::Reset { token, password } => {
            let _ = console.session().reset_password(&token, &password).await;
        }
        Command::Menu => {
            if console.session().current_user().is_none() {
                return Err(CliError::NotLoggedIn);
            }
            for item in console.menu() {
                println!("{:<24} {}", item.label, item.route());
            }
        }
        Command::Open { .. } => println!("showing {landing}"),
        Command::Get { path } => {
            let response = console.api().get(&path).await?;
            let body: serde_json::Value = serde_json::from_slice(&response.body)?;
            println!("HTTP {}", response.status);
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}

fn print_notifications(console: &Console<HttpTransport>) {
    for note in console.notifications().drain() {
        println!("[{}] {}", note.level, note.message);
    }
}
