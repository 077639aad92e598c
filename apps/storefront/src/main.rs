use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, ClientSettings, Storefront, SubmissionController};
use serde::Serialize;
use shared::protocol::{ContactMessageRequest, ResellerApplicationRequest, TrialSignupRequest};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storefront", about = "Storefront data-access client")]
struct Args {
    /// Overrides BACKEND_URL and storefront.toml.
    #[arg(long, global = true)]
    backend_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the composed page, falling back to built-in content.
    Page,
    Plans,
    Features,
    Settings,
    Health,
    /// Start a free trial.
    Trial {
        #[arg(long)]
        email: String,
    },
    TrialStatus {
        #[arg(long)]
        email: String,
    },
    /// Apply to the reseller programme.
    Reseller {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings: ClientSettings = load_settings();
    if let Some(url) = args.backend_url {
        settings.backend_url = Some(url);
    }
    let storefront = Storefront::from_settings(&settings)?;

    match args.command {
        Command::Page => print_json(&storefront.load_page().await)?,
        Command::Plans => print_json(&read(storefront.plans().refetch().await)?)?,
        Command::Features => print_json(&read(storefront.features().refetch().await)?)?,
        Command::Settings => print_json(&read(storefront.settings().refetch().await)?)?,
        Command::Health => print_json(&storefront.api().health().await?)?,
        Command::TrialStatus { email } => {
            print_json(&storefront.api().trial_status(&email).await?)?
        }
        Command::Trial { email } => {
            return submit(&storefront.trial_signup(), TrialSignupRequest { email }).await;
        }
        Command::Reseller {
            name,
            email,
            company,
            message,
        } => {
            let request = ResellerApplicationRequest {
                name,
                email,
                company,
                message,
            };
            return submit(&storefront.reseller_application(), request).await;
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let request = ContactMessageRequest {
                name,
                email,
                subject,
                message,
            };
            return submit(&storefront.contact_message(), request).await;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read<T>(state: client_core::FetchState<T>) -> Result<T> {
    match (state.data, state.error) {
        (Some(data), _) => Ok(data),
        (None, Some(error)) => Err(anyhow!(error)),
        (None, None) => Err(anyhow!("no data received")),
    }
}

async fn submit<P, R>(controller: &SubmissionController<P, R>, payload: P) -> Result<ExitCode>
where
    P: Send + 'static,
    R: Serialize + Send + 'static,
{
    match controller.submit(payload).await {
        Ok(response) => {
            print_json(&response)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => {
            let state = controller.state();
            eprintln!(
                "{} failed: {}",
                controller.name(),
                state.error.as_deref().unwrap_or(client_core::FALLBACK_ERROR_MESSAGE)
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
