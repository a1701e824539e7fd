//! HTML list to ADF importer module
//!
//! Converts rendered HTML lists into ADF list blocks:
//! - `<ul>` items become `bulletList` blocks, `<ol>` items `orderedList` blocks
//! - checkbox and `data-task` items become `taskList` blocks
//! - mixed lists are split into consecutive same-kind blocks

mod converter;
mod error;
mod list;
mod options;
mod paragraph;
mod report;

pub use converter::{HtmlImporter, ImportResult};
pub use error::ImportError;
pub use list::{classify, ItemKind, ListConverter, ListStats, FALLBACK_TASK_TEXT, TASK_ATTRIBUTE};
pub use options::ImportOptions;
pub use paragraph::{InlineParagraphConverter, ParagraphConverter};
pub use report::{ConversionReport, ConversionStatistics, ImportWarning, WarningKind};
