//! Conversion report types for HTML list import

use crate::adf::AdfNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type of warning during import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// The document did not contain any list
    NoListsFound,
    /// A source list was split into several blocks
    MixedList,
    /// Task content was replaced by extracted text
    FallbackContent,
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningKind::NoListsFound => write!(f, "no_lists_found"),
            WarningKind::MixedList => write!(f, "mixed_list"),
            WarningKind::FallbackContent => write!(f, "fallback_content"),
        }
    }
}

/// A warning generated during import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportWarning {
    pub kind: WarningKind,
    /// Feature that caused the warning
    pub feature: String,
    /// Human-readable message
    pub message: String,
}

impl std::fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Statistics about the conversion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStatistics {
    /// Source lists converted, nested ones included
    pub lists: usize,
    /// Task items checked in the output
    pub checked_tasks: usize,
    /// Task items whose content fell back to extracted text
    pub fallback_tasks: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Count of each produced ADF node type
    pub feature_counts: BTreeMap<String, usize>,
}

impl ConversionStatistics {
    /// Increment the count for a feature type
    pub fn increment_feature(&mut self, feature: &str) {
        *self.feature_counts.entry(feature.to_string()).or_insert(0) += 1;
    }

    /// Counts list blocks and items found in `node` and below it.
    pub fn record_tree(&mut self, node: &AdfNode) {
        match node {
            AdfNode::BulletList { .. } => self.increment_feature("bulletList"),
            AdfNode::OrderedList { .. } => self.increment_feature("orderedList"),
            AdfNode::TaskList { .. } => self.increment_feature("taskList"),
            AdfNode::ListItem { .. } => self.increment_feature("listItem"),
            AdfNode::TaskItem { .. } => {
                self.increment_feature("taskItem");
                if node.is_checked() == Some(true) {
                    self.checked_tasks += 1;
                }
            }
            _ => {}
        }
        for child in node.content() {
            self.record_tree(child);
        }
    }

    pub fn feature(&self, feature: &str) -> usize {
        self.feature_counts.get(feature).copied().unwrap_or(0)
    }
}

/// Complete conversion report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Input file path
    pub input_file: String,
    /// Output file path
    pub output_file: String,
    /// Timestamp of conversion
    pub timestamp: String,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Conversion statistics
    pub statistics: ConversionStatistics,
    /// All warnings generated
    pub warnings: Vec<ImportWarning>,
}

impl ConversionReport {
    /// Create a new empty report
    pub fn new(input: &str, output: &str) -> Self {
        Self {
            input_file: input.to_string(),
            output_file: output.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            duration_ms: 0,
            statistics: ConversionStatistics::default(),
            warnings: Vec::new(),
        }
    }

    /// Add a warning to the report
    pub fn add_warning(&mut self, warning: ImportWarning) {
        self.statistics.warning_count += 1;
        self.warnings.push(warning);
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to human-readable text format
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("HTML List Import Report\n");
        output.push_str("=======================\n");
        output.push_str(&format!("Input:  {}\n", self.input_file));
        output.push_str(&format!("Output: {}\n", self.output_file));
        output.push_str(&format!("Date:   {}\n", self.timestamp));
        output.push_str(&format!("Time:   {}ms\n\n", self.duration_ms));

        output.push_str("Statistics\n");
        output.push_str("----------\n");
        output.push_str(&format!("Lists:           {}\n", self.statistics.lists));
        output.push_str(&format!(
            "Tasks checked:   {}/{}\n",
            self.statistics.checked_tasks,
            self.statistics.feature("taskItem")
        ));
        output.push_str(&format!(
            "Fallback tasks:  {}\n",
            self.statistics.fallback_tasks
        ));
        output.push_str(&format!(
            "Warnings:        {}\n\n",
            self.statistics.warning_count
        ));

        if !self.statistics.feature_counts.is_empty() {
            output.push_str("Nodes\n");
            output.push_str("-----\n");
            let mut features: Vec<_> = self.statistics.feature_counts.iter().collect();
            features.sort_by(|a, b| b.1.cmp(a.1));
            for (feature, count) in features {
                output.push_str(&format!("✓ {}: {}\n", feature, count));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("Warnings\n");
            output.push_str("--------\n");
            for warning in &self.warnings {
                output.push_str(&format!("⚠ {}\n", warning));
            }
            output.push('\n');
        }

        output.push_str("Result\n");
        output.push_str("------\n");
        if self.statistics.warning_count > 0 {
            output.push_str("✓ Conversion completed with warnings\n");
        } else {
            output.push_str("✓ Conversion completed successfully\n");
        }
        output.push_str(&format!("✓ Output written to {}\n", self.output_file));

        output
    }
}
