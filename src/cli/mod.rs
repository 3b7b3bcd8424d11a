pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gratitudes-api")]
#[command(about = "Gratitude journal REST API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides GRATITUDES_API_PORT / PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Keep gratitudes in memory instead of Postgres")]
        memory: bool,
    },

    #[command(about = "Mint a bearer token signed with JWT_SECRET")]
    Token {
        #[arg(long, help = "User id the token resolves to")]
        user_id: i32,
        #[arg(long, default_value = "demo", help = "User name recorded in the token subject")]
        name: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, memory } => commands::serve::handle(port, memory).await,
        Commands::Token { user_id, name } => commands::token::handle(user_id, name),
    }
}
