use anyhow::Context;
use clap::{Parser, Subcommand};
use landwatch_core::model::{ContactRequest, GrievanceRequest};
use landwatch_core::{LandwatchConfig, Role, SessionContext, SessionCredentials};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod commands;
mod console;

use commands::Env;

#[derive(Parser, Debug)]
#[command(name = "landwatch", version, about = "Landwatch console")]
struct Cli {
    /// Config file (defaults to $LANDWATCH_CONFIG, then ./landwatch.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Token from a previous `landwatch login`
    #[arg(long, env = "LANDWATCH_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Role the token was issued for
    #[arg(long, env = "LANDWATCH_ROLE", global = true, default_value = "public")]
    session_role: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the backend is reachable
    Health,

    /// Log in and print the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "officer")]
        role: String,
    },

    /// Register an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Password confirmation (defaults to --password)
        #[arg(long)]
        confirm: Option<String>,
        #[arg(long, default_value = "public")]
        role: String,
    },

    /// Request a password reset link
    ForgotPassword {
        #[arg(long)]
        email: String,
    },

    /// Switch the interface language
    Language { code: String },

    /// Print the interface texts
    Translations {
        /// Language code (defaults to the server session's language)
        #[arg(long)]
        lang: Option<String>,
    },

    /// Show the two manually fetched thumbnails
    Images,

    /// Fetch imagery for a date range
    Fetch {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },

    /// Run change detection on the latest pair
    Detect,

    /// Wards ranked by encroachment risk
    Hotspots,

    /// Reports (list/generate)
    Reports {
        #[command(subcommand)]
        cmd: ReportsCommand,
    },

    /// Print the detections map layer
    Map,

    /// Dashboard counters
    Stats {
        /// Admin counters instead of the public ones
        #[arg(long, default_value_t = false)]
        admin: bool,
    },

    /// Alerts table
    Alerts {
        /// Reprint the table on push events until Ctrl-C
        #[arg(long, default_value_t = false)]
        follow: bool,

        /// Seconds between push events when following
        #[arg(long, default_value_t = 10)]
        interval: u64,
    },

    /// User management (list/add/edit/delete)
    Users {
        #[command(subcommand)]
        cmd: UsersCommand,
    },

    /// Grievances (submit/list/leaderboard)
    Grievance {
        #[command(subcommand)]
        cmd: GrievanceCommand,
    },

    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Subcommand, Debug)]
enum ReportsCommand {
    /// List reports, optionally filtered
    List {
        #[arg(long)]
        ward: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },

    /// Generate a report
    Generate {
        /// Report type, e.g. pdf or csv
        #[arg(long = "type")]
        kind: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    List,

    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "officer")]
        role: String,
    },

    /// Edit a user; without flags the new values are asked interactively
    Edit {
        email: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    Delete {
        email: String,
        /// Do not ask for confirmation
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum GrievanceCommand {
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        ward: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        description: String,
    },

    /// All submitted grievances (admin)
    List,

    Leaderboard,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    tracing::debug!(backend = %config.backend.base_url, "Configuration loaded");

    let session = SessionContext::new();
    if let Some(token) = &cli.token {
        let role: Role = cli
            .session_role
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        session.set(SessionCredentials::new(token.clone(), role));
    }
    let env = Env::new(config, session)?;

    match cli.cmd {
        Command::Health => {
            let status = env
                .client
                .health()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))
                .context("Backend health check failed")?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }

        Command::Login {
            email,
            password,
            role,
        } => commands::auth::login(&env, &email, &password, &role).await?,

        Command::Register {
            name,
            email,
            password,
            confirm,
            role,
        } => {
            commands::auth::register(&env, &name, &email, &password, confirm.as_deref(), &role)
                .await?
        }

        Command::ForgotPassword { email } => commands::auth::forgot_password(&env, &email).await?,

        Command::Language { code } => commands::auth::language(&env, &code).await?,

        Command::Translations { lang } => {
            commands::auth::translations(&env, lang.as_deref()).await?
        }

        Command::Images => commands::imagery::images(&env).await?,

        Command::Fetch { start, end } => commands::imagery::manual_fetch(&env, &start, &end).await?,

        Command::Detect => commands::imagery::detect(&env).await?,

        Command::Hotspots => commands::imagery::hotspots(&env).await?,

        Command::Reports { cmd } => match cmd {
            ReportsCommand::List { ward, date } => {
                commands::reports::list(&env, ward.as_deref(), date.as_deref()).await?
            }
            ReportsCommand::Generate { kind } => {
                commands::reports::generate(&env, kind.as_deref()).await?
            }
        },

        Command::Map => commands::imagery::map(&env).await?,

        Command::Stats { admin } => commands::imagery::stats(&env, admin).await?,

        Command::Alerts { follow, interval } => {
            commands::admin::alerts(&env, follow, Duration::from_secs(interval.max(1))).await?
        }

        Command::Users { cmd } => match cmd {
            UsersCommand::List => commands::admin::list_users(&env).await?,
            UsersCommand::Add {
                name,
                email,
                password,
                role,
            } => commands::admin::add_user(&env, &name, &email, &password, &role).await?,
            UsersCommand::Edit {
                email,
                name,
                role,
                password,
            } => commands::admin::edit_user(&env, &email, name, role, password).await?,
            UsersCommand::Delete { email, yes } => {
                commands::admin::delete_user(&env, &email, yes).await?
            }
        },

        Command::Grievance { cmd } => match cmd {
            GrievanceCommand::Submit {
                name,
                email,
                ward,
                location,
                description,
            } => {
                let grievance = GrievanceRequest {
                    name,
                    email,
                    ward,
                    location,
                    description,
                };
                commands::grievance::submit(&env, &grievance).await?
            }
            GrievanceCommand::List => commands::grievance::list(&env).await?,
            GrievanceCommand::Leaderboard => commands::grievance::leaderboard(&env).await?,
        },

        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let request = ContactRequest {
                name,
                email,
                subject,
                message,
            };
            commands::grievance::contact(&env, &request).await?
        }
    }

    Ok(())
}

/// Explicit `--config`, else the default lookup; `--backend-url` wins over both.
fn load_config(cli: &Cli) -> anyhow::Result<LandwatchConfig> {
    let mut config = match &cli.config {
        Some(path) => LandwatchConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => LandwatchConfig::load().context("Failed to load configuration")?,
    };

    if let Some(url) = &cli.backend_url {
        config.backend.base_url = url.clone();
        config.validate()?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_nested_commands() {
        let cli = Cli::parse_from(["landwatch", "users", "delete", "x@y.com", "-y"]);
        match cli.cmd {
            Command::Users {
                cmd: UsersCommand::Delete { email, yes },
            } => {
                assert_eq!(email, "x@y.com");
                assert!(yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::parse_from([
            "landwatch",
            "reports",
            "list",
            "--ward",
            "12",
            "--backend-url",
            "http://localhost:5000",
        ]);
        assert_eq!(cli.backend_url.as_deref(), Some("http://localhost:5000"));
        assert!(matches!(
            cli.cmd,
            Command::Reports {
                cmd: ReportsCommand::List { ward: Some(_), date: None }
            }
        ));
    }

    #[test]
    fn test_parse_supplementary_commands() {
        let cli = Cli::parse_from(["landwatch", "translations", "--lang", "hi"]);
        assert!(matches!(cli.cmd, Command::Translations { lang: Some(ref l) } if l == "hi"));

        let cli = Cli::parse_from(["landwatch", "grievance", "list"]);
        assert!(matches!(
            cli.cmd,
            Command::Grievance {
                cmd: GrievanceCommand::List
            }
        ));

        let cli = Cli::parse_from([
            "landwatch", "contact", "--name", "Asha", "--email", "a@b.org", "--message", "Hello",
        ]);
        match cli.cmd {
            Command::Contact { subject, message, .. } => {
                assert_eq!(subject, "");
                assert_eq!(message, "Hello");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
