use anyhow::bail;

use crate::cli::client::NotesClient;
use crate::cli::OutputFormat;

pub async fn handle(client: &NotesClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let (status, body) = client.health().await?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&body)?),
        OutputFormat::Text => {
            let state = body.get("status").and_then(|v| v.as_str()).unwrap_or("unknown");
            let store = body.get("store").and_then(|v| v.as_str()).unwrap_or("unknown");
            println!("Status: {}", state);
            println!("Store: {}", store);
        }
    }

    if !status.is_success() {
        bail!("server is unhealthy ({})", status);
    }
    Ok(())
}
