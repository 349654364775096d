pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::NotesClient;

#[derive(Parser)]
#[command(name = "notes")]
#[command(about = "Notes CLI - command-line client for the notes API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "NOTES_API_URL", default_value = "http://localhost:3000", help = "Base URL of the notes API")]
    pub url: String,

    #[arg(long, global = true, env = "NOTES_TOKEN", hide_env_values = true, help = "Bearer token sent with protected requests")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List your notes, most recent first")]
    List,

    #[command(about = "Add a note")]
    Add {
        #[arg(help = "Note message")]
        message: String,
    },

    #[command(about = "Check server health from the /health endpoint")]
    Health,

    #[command(about = "Mint a development token signed with JWT_SECRET")]
    Token(commands::token::TokenArgs),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = NotesClient::new(cli.url, cli.token);

    match cli.command {
        Commands::List => commands::notes::list(&client, output_format).await,
        Commands::Add { message } => commands::notes::add(&client, &message, output_format).await,
        Commands::Health => commands::health::handle(&client, output_format).await,
        Commands::Token(args) => commands::token::handle(args, output_format),
    }
}
