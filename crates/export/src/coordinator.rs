//! Export orchestration: resolve the format, render into memory, commit.

use std::path::Path;
use std::thread;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use boq_bill::ItemCollection;

use crate::error::{ExportError, ExportResult};
use crate::format::ExportFormat;
use crate::layout::RenderContext;
use crate::options::{Detail, ExportOptions};
use crate::render::renderer_for;
use crate::sink::{Destination, FileSink, Sink};

/// Outcome of a committed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub format: ExportFormat,
    pub destination: Destination,
    pub bytes_written: usize,
    pub item_count: usize,
    pub total_amount: Decimal,
}

/// Export `collection` in the format named by `format` (`excel`, `csv`,
/// `xml` or `json`, case-insensitive).
pub fn export<S>(
    collection: &ItemCollection,
    sink: &mut S,
    format: &str,
    detail: Detail,
) -> ExportResult<ExportReceipt>
where
    S: Sink + ?Sized,
{
    let format: ExportFormat = format.parse().inspect_err(|_| {
        warn!(format, "rejected export: unsupported format");
    })?;
    let options = ExportOptions::new(format).with_detail(detail);
    export_with(collection, sink, &options)
}

/// Export with explicit options.
///
/// The document is rendered completely before the sink is touched; any
/// rendering error leaves the destination untouched.
pub fn export_with<S>(
    collection: &ItemCollection,
    sink: &mut S,
    options: &ExportOptions,
) -> ExportResult<ExportReceipt>
where
    S: Sink + ?Sized,
{
    let bytes = render_to_vec(collection, options)?;
    let destination = sink.commit(&bytes)?;

    let receipt = ExportReceipt {
        format: options.format,
        destination,
        bytes_written: bytes.len(),
        item_count: collection.len(),
        total_amount: collection.grand_total(),
    };
    info!(
        format = %receipt.format,
        destination = %receipt.destination,
        bytes = receipt.bytes_written,
        items = receipt.item_count,
        total = %receipt.total_amount,
        "export committed"
    );
    Ok(receipt)
}

/// Render into a fresh buffer without committing anywhere.
pub fn render_to_vec(collection: &ItemCollection, options: &ExportOptions) -> ExportResult<Vec<u8>> {
    if collection.is_empty() {
        if options.strict {
            warn!(project = %collection.project().number, "rejected export: bill has no items");
            return Err(ExportError::EmptyCollection);
        }
        warn!(project = %collection.project().number, "exporting empty bill");
    }

    let renderer = renderer_for(options.format);
    let ctx = RenderContext::new(collection, options);
    let mut buffer = Vec::new();
    renderer.render(&ctx, &mut buffer)?;
    debug!(format = %options.format, bytes = buffer.len(), "rendered");
    Ok(buffer)
}

/// Export every format into `dir` under the suggested file names, one thread
/// per format. Receipts follow [`ExportFormat::ALL`] order.
///
/// Every format is attempted; the first failure in that order is returned.
pub fn export_all(
    collection: &ItemCollection,
    dir: &Path,
    detail: Detail,
) -> ExportResult<Vec<ExportReceipt>> {
    let date = collection.project().created_at.date_naive();

    let results: Vec<ExportResult<ExportReceipt>> = thread::scope(|scope| {
        let handles: Vec<_> = ExportFormat::ALL
            .into_iter()
            .map(|format| {
                let path = dir.join(format.suggested_file_name(&collection.project().name, date));
                scope.spawn(move || {
                    let options = ExportOptions::new(format).with_detail(detail);
                    export_with(collection, &mut FileSink::new(path), &options)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    results.into_iter().collect()
}
