use serde_json::json;

use crate::cli::OutputFormat;
use crate::database::NoteView;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "message": message
            });

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a list of notes in the appropriate format
pub fn output_notes(output_format: &OutputFormat, notes: &[NoteView]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(notes)?);
        }
        OutputFormat::Text => {
            if notes.is_empty() {
                println!("No notes yet");
            }
            for line in notes.iter().map(format_note) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn format_note(note: &NoteView) -> String {
    format!(
        "{}  {}: {}",
        note.created.format("%Y-%m-%d %H:%M:%S"),
        note.friendly_id.as_deref().unwrap_or("(unknown)"),
        note.message
    )
}
