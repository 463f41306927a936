//! Account Service - command line front end for the account serializers.

use std::net::IpAddr;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use account_service_lib::auth::RequestContext;
use account_service_lib::config::AccountServiceConfig;
use account_service_lib::serializer::AccountSerializer;
use account_service_lib::AccountService;
use domain::{AccountPayload, Credentials};

#[derive(Parser)]
#[command(name = "account-service")]
#[command(about = "User account validation service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a password against the strength rules
    CheckPassword { password: String },
    /// Create an account and print its public representation
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Validate credentials against the seeded account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Client address recorded with the attempt
        #[arg(long)]
        remote_addr: Option<IpAddr>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AccountServiceConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let service = AccountService::from_config(&config).await?;

    match cli.command {
        Commands::CheckPassword { password } => {
            AccountSerializer::validate_password(&password)?;
            println!("ok");
        }
        Commands::Register {
            email,
            password,
            name,
        } => {
            let account = service
                .accounts
                .create(AccountPayload {
                    email,
                    password,
                    name,
                })
                .await?;
            let body = AccountSerializer::to_representation(&account);
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Commands::Login {
            email,
            password,
            remote_addr,
        } => {
            let mut context = RequestContext::generate();
            if let Some(addr) = remote_addr {
                context = context.with_remote_addr(addr);
            }

            let attempt = service
                .credentials
                .validate(Credentials { email, password }, &context)
                .await?;
            println!("authenticated {}", attempt.account.email);
        }
    }

    Ok(())
}
