use crate::cli::client::NotesClient;
use crate::cli::utils::{output_notes, output_success};
use crate::cli::OutputFormat;

pub async fn list(client: &NotesClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let notes = client.list().await?;
    output_notes(&output_format, &notes)
}

pub async fn add(client: &NotesClient, message: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    client.add(message).await?;
    output_success(&output_format, "Note added")
}
