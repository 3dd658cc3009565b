//! Output formatting utilities for the CLI
//!
//! Renders delete responses as simple text, a colored table, or JSON, and
//! prints the progress lines of a key-contains run.

use anyhow::Result;
use colored::*;
use kvstore_core::api::DeleteRangeResponse;
use kvstore_core::{KeyValue, KvError};
use tabled::{settings::Style, Table, Tabled};

use crate::del::DeleteReporter;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Table,
    Json,
}

impl OutputFormat {
    /// Config-file spelling of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }

    /// Parse the config-file spelling; unknown names fall back to simple.
    pub fn from_name(name: &str) -> Self {
        match name {
            "table" => OutputFormat::Table,
            "json" => OutputFormat::Json,
            _ => OutputFormat::Simple,
        }
    }
}

/// Format a delete response
pub fn format_delete(response: &DeleteRangeResponse, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Simple => {
            let mut lines = vec![response.deleted.to_string()];
            for kv in &response.prev_kvs {
                lines.push(kv.key_str().into_owned());
                lines.push(kv.value_str().into_owned());
            }
            Ok(lines.join("\n"))
        }
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct PrevKvRow {
                #[tabled(rename = "Key")]
                key: String,
                #[tabled(rename = "Value")]
                value: String,
                #[tabled(rename = "Mod Revision")]
                mod_revision: i64,
            }

            let mut output = format!(
                "{} {} (revision {})",
                "Deleted:".bold(),
                if response.deleted > 0 {
                    response.deleted.to_string().green()
                } else {
                    "0".dimmed()
                },
                response.header.revision.to_string().yellow()
            );

            if !response.prev_kvs.is_empty() {
                let rows: Vec<PrevKvRow> = response
                    .prev_kvs
                    .iter()
                    .map(|kv| PrevKvRow {
                        key: kv.key_str().cyan().to_string(),
                        value: kv.value_str().into_owned(),
                        mod_revision: kv.mod_revision,
                    })
                    .collect();
                let table = Table::new(rows).with(Style::rounded()).to_string();
                output.push('\n');
                output.push_str(&table);
            }

            Ok(output)
        }
    }
}

/// Line reported for a key matching the key-contains filter
pub fn format_found(kv: &KeyValue) -> String {
    format!("Found Key {}. Binary is: {}", kv.key_str(), kv.key_hex())
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}

/// Reporter that prints every event to stdout in the selected format
#[derive(Debug, Clone)]
pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl DeleteReporter for Printer {
    fn found(&mut self, kv: &KeyValue) {
        println!("{}", format_found(kv));
    }

    fn deleting(&mut self, _kv: &KeyValue) {
        println!("deleting key...");
    }

    fn deleted(&mut self, response: &DeleteRangeResponse) -> kvstore_core::Result<()> {
        let formatted = format_delete(response, &self.format)
            .map_err(|e| KvError::Output(format!("{:#}", e)))?;
        println!("{}", formatted);
        Ok(())
    }
}
