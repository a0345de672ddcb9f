use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use userhub_cli::admin::{self, AdminInput};
use userhub_cli::{open_repository, seeder};
use userhub_config::RegistrationConfig;
use userhub_db::{PgUserRepository, init_db_pool};

#[derive(Parser)]
#[command(name = "userhub-cli")]
#[command(about = "userhub CLI - Administrative tools for userhub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account with the configured admin permissions
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake basic users
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "50")]
        users: usize,
    },
    /// Delete every seeded user
    ClearSeed,
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, err);
    std::process::exit(1);
}

fn prompt(label: &str) -> String {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .unwrap_or_else(|e| fail(&format!("Failed to read {}", label.to_lowercase()), e))
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = init_db_pool()
        .await
        .unwrap_or_else(|e| fail("Failed to connect to database", e));

    let repo = open_repository(pool)
        .await
        .unwrap_or_else(|e| fail("Failed to run migrations", e));

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&repo, name, email, password).await,
        Commands::Seed { users } => handle_seed(&repo, users).await,
        Commands::ClearSeed => handle_clear_seed(&repo).await,
    }
}

async fn handle_create_admin(
    repo: &PgUserRepository,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let name = name.unwrap_or_else(|| prompt("Name"));
    let email = email.unwrap_or_else(|| prompt("Email address"));
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e))
    });

    let defaults = RegistrationConfig::from_env().role_defaults;

    match admin::create_admin(repo, AdminInput { name, email, password }, &defaults).await {
        Ok(user) => {
            println!("\n✅ Admin created successfully!");
            println!("   UUID: {}", user.uuid);
            println!("   Email: {}", user.email);
            println!("   Permissions: {}", user.permission_list().join(", "));
        }
        Err(e) => fail("Error creating admin", e),
    }
}

async fn handle_seed(repo: &PgUserRepository, users: usize) {
    match seeder::seed_users(repo, users).await {
        Ok(inserted) => println!("✅ Created {} users", inserted),
        Err(e) => fail("Error seeding users", e),
    }
}

async fn handle_clear_seed(repo: &PgUserRepository) {
    match seeder::clear_seed(repo).await {
        Ok(deleted) => println!("✅ Removed {} seeded users", deleted),
        Err(e) => fail("Error clearing seeded data", e),
    }
}
