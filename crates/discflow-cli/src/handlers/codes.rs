use crate::types::OutputFormat;
use anyhow::Result;
use discflow_types::EVENT_CODES;
use serde::Serialize;

#[derive(Serialize)]
struct CodeEntry {
    code: i64,
    name: &'static str,
    terminal: bool,
}

pub fn handle(format: OutputFormat) -> Result<()> {
    let mut entries: Vec<CodeEntry> = EVENT_CODES
        .iter()
        .map(|&(code, kind)| CodeEntry {
            code,
            name: kind.name(),
            terminal: kind.is_terminal(),
        })
        .collect();
    entries.sort_by_key(|entry| entry.code);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            for entry in &entries {
                let marker = if entry.terminal { "  (ends point)" } else { "" };
                println!("{:>3}  {}{}", entry.code, entry.name, marker);
            }
        }
    }
    Ok(())
}
