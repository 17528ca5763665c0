//! Wire shapes for the three operations.

use serde::{Deserialize, Serialize};

use coast_core::{MonitoringPoint, ReportEntry};

/// Body of an analyze request. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    pub future_year: u32,
    pub show_transects: bool,
    /// Client viewport `[south, west, north, east]`. Logged only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeMetrics {
    /// Vegetation share of the rendered masks, percent, two decimals.
    pub vegetation_coverage: f64,
    /// Risk points × 10.
    pub erosion_risk_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub metrics: AnalyzeMetrics,
    pub year_offset: u32,
    /// `data:image/png;base64,…`
    pub mask_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub timeline_data: Vec<ReportEntry>,
    pub ai_recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub classification: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub visit_points: Vec<MonitoringPoint>,
    pub graph_data: Vec<f64>,
    pub gis_image: String,
    pub summary: Summary,
}
