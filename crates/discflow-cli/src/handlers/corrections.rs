use crate::output::Palette;
use crate::types::OutputFormat;
use anyhow::Result;
use discflow_feed::{ClockCorrection, Correction};
use discflow_runtime::Config;
use serde::Serialize;

#[derive(Serialize)]
struct CorrectionListing<'a> {
    corrections: &'a [Correction],
    clock_corrections: &'a [ClockCorrection],
}

pub fn handle(config: &Config, format: OutputFormat) -> Result<()> {
    let table = config.correction_table();
    let clocks = config.clock_table();

    match format {
        OutputFormat::Json => {
            let listing = CorrectionListing {
                corrections: table.entries(),
                clock_corrections: clocks.entries(),
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        OutputFormat::Plain => {
            let palette = Palette::detect();
            println!("{}", palette.heading("Payload corrections"));
            if table.is_empty() {
                println!("  {}", palette.dim("none"));
            }
            for correction in table.entries() {
                println!(
                    "  {:<12} {}",
                    correction.name,
                    palette.dim(&correction.selector.to_string())
                );
            }
            println!("{}", palette.heading("Clock corrections"));
            for clock in clocks.entries() {
                println!("  {:>5} -> {}", clock.observed, clock.corrected);
            }
        }
    }
    Ok(())
}
