//! HTML to ADF importer
//!
//! Parses rendered HTML with html5ever, converts every outermost list with
//! [`ListConverter`] and wraps the resulting blocks in an ADF `doc`.

use super::error::ImportError;
use super::list::{ListConverter, ListStats};
use super::options::ImportOptions;
use super::paragraph::{InlineParagraphConverter, ParagraphConverter};
use super::report::{ConversionReport, ImportWarning, WarningKind};
use crate::adf::{AdfBuilder, AdfNode};
use crate::html::parse_fragment;
use std::time::Instant;

/// Result of HTML import
#[derive(Debug)]
pub struct ImportResult {
    /// Converted ADF document
    pub doc: AdfNode,
    /// The document rendered as JSON
    pub json: String,
    /// Conversion report
    pub report: ConversionReport,
}

/// HTML list to ADF importer
pub struct HtmlImporter<P: ParagraphConverter = InlineParagraphConverter> {
    options: ImportOptions,
    paragraphs: P,
}

impl HtmlImporter {
    /// Create a new importer using the built-in paragraph converter
    pub fn new(options: ImportOptions) -> Self {
        Self::with_paragraph_converter(options, InlineParagraphConverter)
    }
}

impl<P: ParagraphConverter> HtmlImporter<P> {
    pub fn with_paragraph_converter(options: ImportOptions, paragraphs: P) -> Self {
        Self {
            options,
            paragraphs,
        }
    }

    /// Import every list of `html` into a single ADF document
    pub fn import(
        &self,
        html: &str,
        input_path: &str,
        output_path: &str,
    ) -> Result<ImportResult, ImportError> {
        let start_time = Instant::now();
        let file_context = self.options.file_context.as_deref().unwrap_or(input_path);
        let mut report = ConversionReport::new(input_path, output_path);

        let body = parse_fragment(html);
        let lists = body.lists();
        log::info!("{}: found {} top-level list(s)", input_path, lists.len());
        if lists.is_empty() {
            report.add_warning(ImportWarning {
                kind: WarningKind::NoListsFound,
                feature: "list".to_string(),
                message: "No <ul> or <ol> element found; produced an empty document".to_string(),
            });
        }

        let converter = ListConverter::new(&self.paragraphs).with_inline(self.options.inline);
        let mut builder = AdfBuilder::new();
        let mut stats = ListStats::default();
        for list in lists {
            let blocks = converter.convert_tracked(list, file_context, &mut stats)?;
            if blocks.len() > 1 {
                report.add_warning(ImportWarning {
                    kind: WarningKind::MixedList,
                    feature: "list".to_string(),
                    message: format!(
                        "<{}> mixes task and plain items; split into {} blocks",
                        list.name,
                        blocks.len()
                    ),
                });
            }
            for block in blocks {
                builder.add_item(block);
            }
        }

        for text in &stats.fallback_items {
            report.add_warning(ImportWarning {
                kind: WarningKind::FallbackContent,
                feature: "taskItem".to_string(),
                message: format!("Task without inline content rendered as {:?}", text),
            });
        }

        let doc = AdfBuilder::doc(builder.build());
        report.statistics.lists = stats.lists;
        report.statistics.fallback_tasks = stats.fallback_items.len();
        report.statistics.record_tree(&doc);

        let json = if self.options.pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };

        report.duration_ms = start_time.elapsed().as_millis() as u64;

        Ok(ImportResult { doc, json, report })
    }
}
