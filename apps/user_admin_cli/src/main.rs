use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ClientConfig, UserCollection, UserCollectionClient, DEFAULT_BASE_URL};
use shared::{
    domain::{BackendLabel, DraftUser, User, UserId},
    validation::validate_draft,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Manage users of a REST user collection from the command line")]
struct Cli {
    #[arg(long, env = "USER_ADMIN_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,
    #[arg(long, env = "USER_ADMIN_BACKEND", default_value = BackendLabel::DEFAULT)]
    backend: String,
    /// Print records as JSON instead of one line per user.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List users, newest first.
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    Delete {
        id: i64,
    },
}

fn format_user(user: &User) -> String {
    format!("id={} name={} email={}", user.id, user.name, user.email)
}

fn print_users(users: &[User], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(users)?);
    } else {
        for user in users {
            println!("{}", format_user(user));
        }
    }
    Ok(())
}

fn newest_first(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|a, b| b.id.cmp(&a.id));
    users
}

fn checked_draft(name: String, email: String) -> Result<DraftUser> {
    let draft = DraftUser::new(name, email);
    if let Err(errors) = validate_draft(&draft) {
        let messages: Vec<&str> = [errors.name.as_deref(), errors.email.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        bail!("{}", messages.join("; "));
    }
    Ok(draft)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config = ClientConfig::new(&cli.api_url, BackendLabel::new(cli.backend.trim()))?;
    let client = UserCollectionClient::new(config)?;

    match cli.command {
        Command::List => {
            let users = client.list().await.context("Error fetching users")?;
            print_users(&newest_first(users), cli.json)?;
        }
        Command::Create { name, email } => {
            let draft = checked_draft(name, email)?;
            let user = client.create(&draft).await.context("Error creating user")?;
            print_users(std::slice::from_ref(&user), cli.json)?;
        }
        Command::Update { id, name, email } => {
            let patch = DraftUser::new(name, email);
            let user = client
                .update(UserId(id), &patch)
                .await
                .context("Error updating user")?;
            print_users(std::slice::from_ref(&user), cli.json)?;
        }
        Command::Delete { id } => {
            client
                .delete(UserId(id))
                .await
                .context("Error deleting user")?;
            if !cli.json {
                println!("deleted user_id={id}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_user_on_one_line() {
        let user = User {
            id: UserId(1),
            name: "Ada".to_string(),
            email: "ada@x.io".to_string(),
        };
        assert_eq!(format_user(&user), "id=1 name=Ada email=ada@x.io");
    }

    #[test]
    fn create_rejects_blank_fields_before_any_request() {
        let err = checked_draft(" ".to_string(), String::new()).expect_err("must fail");
        assert_eq!(err.to_string(), "Name is required; Email is required");
        assert!(checked_draft("Ada".to_string(), "ada@x.io".to_string()).is_ok());
    }

    #[test]
    fn parses_update_arguments() {
        let cli = Cli::try_parse_from([
            "user_admin_cli",
            "--backend",
            "rust",
            "update",
            "4",
            "--name",
            "Ada",
            "--email",
            "ada@x.io",
        ])
        .expect("parse");
        assert_eq!(cli.backend, "rust");
        assert!(matches!(cli.command, Command::Update { id: 4, .. }));
    }
}
