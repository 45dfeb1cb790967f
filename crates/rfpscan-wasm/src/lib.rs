//! WASM bindings for RFP analysis.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use rfpscan_core::models::report::{AnalysisReport, ComplianceMetrics, Table};
use rfpscan_core::{Document, DocumentAnalyzer, RfpAnalyzer, RfpConfig};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Serialize)]
struct ReportJs<'a> {
    #[serde(flatten)]
    report: &'a AnalysisReport,
    metrics: ComplianceMetrics,
    compliance_percent_label: String,
}

fn to_js(report: &AnalysisReport) -> Result<JsValue, JsValue> {
    let metrics = report.metrics();
    let output = ReportJs {
        report,
        compliance_percent_label: metrics.compliance_percent_label(),
        metrics,
    };

    serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Analyze already extracted text with the built-in vocabulary.
#[wasm_bindgen]
pub fn analyze_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&RfpAnalyzer::new().analyze_text(text))
}

/// Analyze an uploaded file (PDF or plain text) with the built-in vocabulary.
#[wasm_bindgen]
pub fn analyze_file(name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
    let document = Document::uploaded(name, bytes.to_vec());
    let report = RfpAnalyzer::new()
        .analyze(&document)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&report)
}

/// Analyzer class for browser use, with optional JSON configuration.
#[wasm_bindgen]
pub struct RfpScanner {
    analyzer: RfpAnalyzer,
}

#[wasm_bindgen]
impl RfpScanner {
    /// Create a scanner with the built-in vocabulary.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            analyzer: RfpAnalyzer::new(),
        }
    }

    /// Create a scanner from a JSON configuration string.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config_json: &str) -> Result<RfpScanner, JsValue> {
        let config: RfpConfig =
            serde_json::from_str(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let analyzer =
            RfpAnalyzer::from_config(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { analyzer })
    }

    /// Analyze a file.
    #[wasm_bindgen]
    pub fn analyze(&self, name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let report = self
            .analyzer
            .analyze(&Document::uploaded(name, bytes.to_vec()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&report)
    }

    /// Compliance matrix of a file as CSV, for download.
    #[wasm_bindgen(js_name = complianceCsv)]
    pub fn compliance_csv(&self, name: &str, bytes: &[u8]) -> Result<String, JsValue> {
        self.analyzer
            .analyze(&Document::uploaded(name, bytes.to_vec()))
            .and_then(|report| report.to_csv(Table::Compliance))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Analyze the bundled sample RFP.
    #[wasm_bindgen]
    pub fn sample(&self) -> Result<JsValue, JsValue> {
        let report = self
            .analyzer
            .analyze(&Document::sample())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&report)
    }
}

impl Default for RfpScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_compliance_csv() {
        let scanner = RfpScanner::new();
        let csv = scanner.compliance_csv("rfp.txt", b"Bid Bond: 5%").unwrap();
        assert!(csv.starts_with("Requirement,Found\n"));
        assert!(csv.contains("Bid Bond,✓"));
    }

    #[wasm_bindgen_test]
    fn test_from_config_rejects_bad_json() {
        assert!(RfpScanner::from_config("{ nope").is_err());
    }

    #[wasm_bindgen_test]
    fn test_analyze_text() {
        assert!(analyze_text("ISO 9001").is_ok());
    }
}
