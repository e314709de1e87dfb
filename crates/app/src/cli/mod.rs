use clap::{Parser, Subcommand};

mod db;
mod otp;
mod user;

#[derive(Debug, Parser)]
#[command(name = "pasal-app", about = "Pasal CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Otp(otp::OtpCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Otp(command) => otp::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
