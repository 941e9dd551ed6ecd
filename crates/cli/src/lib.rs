//! `boq-export` command: load a bill file and export it.

pub mod cli;

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, bail};
use serde_json::{Value, json};
use tracing::info;

use boq_bill::{BillInput, ItemCollection};
use boq_export::{
    ExportError, ExportFormat, ExportOptions, ExportReceipt, FileSink, WriterSink, export_all,
    export_with,
};

pub use cli::Cli;

/// Read and validate a JSON bill file.
pub fn load_bill(path: &Path) -> anyhow::Result<ItemCollection> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read bill file {}", path.display()))?;
    let input: BillInput = serde_json::from_str(&raw)
        .with_context(|| format!("invalid bill file {}", path.display()))?;
    let bill = input
        .into_collection()
        .with_context(|| format!("invalid bill in {}", path.display()))?;
    info!(
        project = %bill.project().number,
        items = bill.len(),
        "bill loaded"
    );
    Ok(bill)
}

/// Run the exports described by `cli`.
pub fn run(cli: &Cli) -> anyhow::Result<Vec<ExportReceipt>> {
    let bill = load_bill(&cli.input)?;
    let formats = cli.formats()?;
    let detail = cli.detail();

    if cli.stdout {
        let [format] = formats.as_slice() else {
            bail!("--stdout takes exactly one format, got {}", formats.len());
        };
        let options = options(cli, *format);
        let receipt = export_with(&bill, &mut WriterSink::new(io::stdout().lock()), &options)?;
        return Ok(vec![receipt]);
    }

    if formats == ExportFormat::ALL {
        if cli.strict && bill.is_empty() {
            return Err(ExportError::EmptyCollection.into());
        }
        return export_all(&bill, &cli.out_dir, detail)
            .with_context(|| format!("failed to export into {}", cli.out_dir.display()));
    }

    let date = bill.project().created_at.date_naive();
    formats
        .into_iter()
        .map(|format| {
            let path = cli
                .out_dir
                .join(format.suggested_file_name(&bill.project().name, date));
            export_with(&bill, &mut FileSink::new(&path), &options(cli, format))
                .with_context(|| format!("failed to export {}", path.display()))
        })
        .collect()
}

fn options(cli: &Cli, format: ExportFormat) -> ExportOptions {
    ExportOptions::new(format)
        .with_detail(cli.detail())
        .with_strict(cli.strict)
}

/// Machine-readable summary printed after file exports.
pub fn receipts_json(receipts: &[ExportReceipt]) -> Value {
    let exports: Vec<Value> = receipts
        .iter()
        .map(|r| {
            json!({
                "format": r.format.token(),
                "destination": r.destination.to_string(),
                "bytes_written": r.bytes_written,
                "item_count": r.item_count,
                "total_amount": r.total_amount.to_string(),
            })
        })
        .collect();
    json!({ "exports": exports })
}
