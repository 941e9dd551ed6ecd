//! Bill-of-quantities export engine.
//!
//! Renders an [`ItemCollection`](boq_bill::ItemCollection) as a SpreadsheetML
//! workbook, CSV, XML or JSON. Every document is rendered into memory first
//! and then committed to a [`Sink`] in one call.

pub mod coordinator;
pub mod error;
pub mod format;
pub mod layout;
pub mod options;
pub mod render;
pub mod sink;

mod xml;

pub use coordinator::{ExportReceipt, export, export_all, export_with, render_to_vec};
pub use error::{ExportError, ExportResult};
pub use format::ExportFormat;
pub use layout::{Column, RenderContext, Row};
pub use options::{Detail, ExportOptions, Generator};
pub use render::{Renderer, renderer_for};
pub use sink::{Destination, FileSink, MemorySink, Sink, WriterSink};
