use std::io::{self, Write};

use ferroquote_core::QuoteRecord;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ErrorRecord<'a> {
    status: &'static str,
    message: &'a str,
}

pub fn render_quote(record: &QuoteRecord, format: OutputFormat) -> Result<(), CliError> {
    let payload = match format {
        OutputFormat::Json => serde_json::to_string_pretty(record)?,
        OutputFormat::Text => quote_text(record),
    };
    write_stdout(&payload)
}

pub fn render_error(message: &str, format: OutputFormat) -> Result<(), CliError> {
    let payload = match format {
        OutputFormat::Json => serde_json::to_string(&ErrorRecord {
            status: "error",
            message,
        })?,
        OutputFormat::Text => format!("status: error\nmessage: {message}"),
    };
    write_stdout(&payload)
}

fn write_stdout(payload: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{payload}")?;
    stdout.flush()?;
    Ok(())
}

fn quote_text(record: &QuoteRecord) -> String {
    let rows = [
        ("code", record.code.clone()),
        ("name", record.name.clone()),
        ("market", record.market.to_string()),
        ("current_price", record.current_price.to_string()),
        ("change", record.change.to_string()),
        ("change_percent", record.change_percent.to_string()),
        ("open", record.open.to_string()),
        ("high", record.high.to_string()),
        ("low", record.low.to_string()),
        ("prev_close", record.prev_close.to_string()),
        ("volume", record.volume.to_string()),
        ("amount", record.amount.to_string()),
        ("time", record.time.clone()),
        ("status", String::from("success")),
    ];

    rows.iter()
        .map(|(key, value)| format!("{key:<14}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
