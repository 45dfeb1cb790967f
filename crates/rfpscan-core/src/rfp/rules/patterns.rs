//! Common regex patterns for solicitation text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Quantitative anchors that make a compliance mention specific
    pub static ref ANCHOR_DATE: Regex = Regex::new(
        r"\b\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}\b"
    ).unwrap();

    pub static ref ANCHOR_YEAR: Regex = Regex::new(
        r"\b\d{4}\b"
    ).unwrap();

    pub static ref ANCHOR_PERCENT: Regex = Regex::new(
        r"%"
    ).unwrap();

    pub static ref ANCHOR_DIGIT: Regex = Regex::new(
        r"\d"
    ).unwrap();

    // Date values: "March 5, 2025", "Mar. 5th 2025"
    pub static ref DATE_MONTH_DAY_YEAR: Regex = Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b"
    ).unwrap();

    // "5 March 2025", "5th of March, 2025"
    pub static ref DATE_DAY_MONTH_YEAR: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(\d{4})\b"
    ).unwrap();

    // 2025-03-05
    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b"
    ).unwrap();

    // 03/05/2025 (month first)
    pub static ref DATE_US_NUMERIC: Regex = Regex::new(
        r"\b(\d{1,2})[/\-](\d{1,2})[/\-](\d{4}|\d{2})\b"
    ).unwrap();
}
