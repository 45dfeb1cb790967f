//! Analysis report and derived metrics.

use serde::{Deserialize, Serialize};

use crate::document::{DocumentSource, TextOrigin};
use crate::error::Result;
use crate::rfp::rules::{ClarificationNote, DatedEvent, PresenceEntry};

/// Marker rendered for a phrase found in the document.
pub const FOUND_MARKER: &str = "✓";

/// Marker rendered for a phrase missing from the document.
pub const MISSING_MARKER: &str = "✗";

/// Complete result of analyzing one document.
///
/// Reports carry no timestamps or run identifiers, so analyzing the same
/// bytes twice serializes to the same output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Where the document came from.
    pub source: DocumentSource,

    /// Which extraction path produced the text.
    pub origin: TextOrigin,

    /// Key dates found, in vocabulary order. Labels without a match are absent.
    pub key_dates: Vec<DatedEvent>,

    /// One row per compliance phrase, in vocabulary order.
    pub compliance: Vec<PresenceEntry>,

    /// One row per deliverable phrase, in vocabulary order.
    pub deliverables: Vec<PresenceEntry>,

    /// Questions for compliance items mentioned without specifics.
    pub clarifications: Vec<ClarificationNote>,
}

/// Headline numbers for a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceMetrics {
    pub items_checked: usize,
    pub items_found: usize,
    pub items_missing: usize,
    /// Found / checked * 100, or 0 when nothing is checked.
    pub compliance_percent: f64,
    pub key_dates_found: usize,
}

impl ComplianceMetrics {
    /// Compute metrics from a compliance matrix and the number of key dates.
    pub fn from_rows(compliance: &[PresenceEntry], key_dates_found: usize) -> Self {
        let items_checked = compliance.len();
        let items_found = compliance.iter().filter(|row| row.found).count();
        let compliance_percent = if items_checked == 0 {
            0.0
        } else {
            items_found as f64 / items_checked as f64 * 100.0
        };

        Self {
            items_checked,
            items_found,
            items_missing: items_checked - items_found,
            compliance_percent,
            key_dates_found,
        }
    }

    /// Percentage rounded to the nearest integer, e.g. "91%".
    pub fn compliance_percent_label(&self) -> String {
        format!("{}%", self.compliance_percent.round() as i64)
    }
}

/// A tabular view of a report that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// Requirement / Found.
    Compliance,
    /// Deliverable / Found.
    Deliverables,
    /// Event / Date.
    KeyDates,
}

impl AnalysisReport {
    /// Derived headline metrics.
    pub fn metrics(&self) -> ComplianceMetrics {
        ComplianceMetrics::from_rows(&self.compliance, self.key_dates.len())
    }

    /// Compliance items that were not found.
    pub fn missing_compliance(&self) -> impl Iterator<Item = &PresenceEntry> {
        self.compliance.iter().filter(|row| !row.found)
    }

    /// Render one table as CSV with a header row.
    pub fn to_csv(&self, table: Table) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        match table {
            Table::Compliance => {
                wtr.write_record(["Requirement", "Found"])?;
                for row in &self.compliance {
                    wtr.write_record([row.phrase.as_str(), row.marker()])?;
                }
            }
            Table::Deliverables => {
                wtr.write_record(["Deliverable", "Found"])?;
                for row in &self.deliverables {
                    wtr.write_record([row.phrase.as_str(), row.marker()])?;
                }
            }
            Table::KeyDates => {
                wtr.write_record(["Event", "Date"])?;
                for event in &self.key_dates {
                    wtr.write_record([event.label.as_str(), event.value.as_str()])?;
                }
            }
        }

        let data = wtr
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        String::from_utf8(data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    }
}
