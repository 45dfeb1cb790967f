//! Bundled sample solicitation for demos and smoke tests.

/// Sample oil & gas RFP shipped with the binary.
pub static SAMPLE_RFP: &str = include_str!("../../samples/sample_rfp_oilgas.txt");

/// File name used when the sample is written to disk.
pub const SAMPLE_RFP_NAME: &str = "sample_rfp_oilgas.txt";
