use clap::{Args, Subcommand};
use uuid::Uuid;

use pasal_app::{
    auth::{
        AuthService, PgAuthService,
        models::{NewUser, Role},
        token::{generate_token, hash_token},
    },
    database::{self, Db},
};

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Provision a user with an API token.
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    /// User display name
    #[arg(long)]
    name: String,

    /// User email address
    #[arg(long)]
    email: String,

    /// Grant the admin role
    #[arg(long)]
    admin: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,

    /// Optional raw API token; generated when omitted
    #[arg(long)]
    token: Option<String>,
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create_user(args).await,
    }
}

async fn create_user(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(Db::new(pool));
    let user_uuid = args.user_uuid.unwrap_or_else(Uuid::now_v7);
    let raw_token = args.token.unwrap_or_else(generate_token);

    if raw_token.trim().is_empty() {
        return Err("token cannot be empty".to_string());
    }

    let role = if args.admin {
        Role::Admin
    } else {
        Role::Customer
    };

    let user = service
        .create_user(NewUser {
            uuid: user_uuid,
            name: args.name,
            email: args.email,
            role,
            token_hash: Some(hash_token(&raw_token)),
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);
    println!("user_role: {}", user.role.as_str());
    println!("api_token: {raw_token}");
    println!("store this token now; it is only shown once");

    Ok(())
}
