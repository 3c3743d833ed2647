use anyhow::{Context, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use rand::RngCore;
use tokengate_auth::key::MIN_SECRET_BYTES;
use tokengate_auth::roles::ADMIN_AUTHORITIES;
use tokengate_core::hash_password;
use tokengate_db::{NewUser, PgUserStore, StoreError, UserStore, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "tokengate-cli")]
#[command(about = "Tokengate CLI - Administrative tools for Tokengate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a random base64 secret suitable for JWT_SECRET
    GenerateSecret {
        /// Number of random bytes before encoding
        #[arg(short = 'b', long, default_value_t = MIN_SECRET_BYTES)]
        bytes: usize,
    },
    /// Create an administrator account in the PostgreSQL user store
    CreateAdmin {
        /// Login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Display name, defaults to the username
        #[arg(short = 'n', long)]
        nickname: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::GenerateSecret { bytes } => handle_generate_secret(bytes),
        Commands::CreateAdmin {
            username,
            password,
            nickname,
        } => handle_create_admin(username, password, nickname).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

fn handle_generate_secret(bytes: usize) -> anyhow::Result<()> {
    if bytes < MIN_SECRET_BYTES {
        bail!("HS512 needs at least {MIN_SECRET_BYTES} bytes of key material, got {bytes}");
    }

    let mut secret = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut secret);
    println!("{}", STANDARD.encode(&secret));

    Ok(())
}

async fn handle_create_admin(
    username: Option<String>,
    password: Option<String>,
    nickname: Option<String>,
) -> anyhow::Result<()> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let nickname = nickname.unwrap_or_else(|| username.clone());

    let pool = init_db_pool(&database_url, 1)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    let store = PgUserStore::new(pool);
    let new_user = NewUser {
        username: username.clone(),
        password_hash: hash_password(&password).map_err(|e| e.error)?,
        nickname,
        authorities: ADMIN_AUTHORITIES.iter().map(|r| r.to_string()).collect(),
    };

    match store.create(new_user).await {
        Ok(user) => {
            println!("\n✅ Admin created successfully!");
            println!("   Username: {}", user.username);
            println!("   Roles: {}", user.authorities.join(", "));
            Ok(())
        }
        Err(StoreError::Duplicate(_)) => bail!("user '{username}' already exists"),
        Err(e) => Err(e).context("Error creating admin"),
    }
}
