use clap::Args;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;
use crate::config;

#[derive(Args)]
pub struct TokenArgs {
    #[arg(long, help = "Subject id the token is issued for")]
    pub sub: String,

    #[arg(long, help = "Display name claim")]
    pub name: Option<String>,

    #[arg(long, help = "Email claim")]
    pub email: Option<String>,
}

/// Signs with the same JWT_SECRET the server verifies against
pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;
    let claims = Claims {
        sub: args.sub,
        name: args.name,
        email: args.email,
    };

    let token = generate_jwt(claims, security)?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "token": token,
                "expires_in_hours": security.jwt_expiry_hours
            }))?
        ),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
