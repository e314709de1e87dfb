use clap::{Args, Subcommand};

use pasal_app::{
    database::{self, Db},
    domain::otp::{OtpService, PgOtpService},
};

#[derive(Debug, Args)]
pub(crate) struct OtpCommand {
    #[command(subcommand)]
    command: OtpSubcommand,
}

#[derive(Debug, Subcommand)]
enum OtpSubcommand {
    /// Issue a one-time code for a key, replacing any previous one.
    Issue(IssueArgs),
}

#[derive(Debug, Args)]
struct IssueArgs {
    /// Store key, e.g. `login:someone@example.com`
    #[arg(long)]
    key: String,

    /// Code lifetime in seconds
    #[arg(long, default_value_t = 300)]
    ttl_seconds: i64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

pub(crate) async fn run(command: OtpCommand) -> Result<(), String> {
    match command.command {
        OtpSubcommand::Issue(args) => issue(args).await,
    }
}

async fn issue(args: IssueArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgOtpService::new(Db::new(pool));

    let issued = service
        .issue(&args.key, args.ttl_seconds)
        .await
        .map_err(|error| format!("failed to issue code: {error}"))?;

    println!("code: {}", issued.code);
    println!("expires_at: {}", issued.expires_at);

    Ok(())
}
