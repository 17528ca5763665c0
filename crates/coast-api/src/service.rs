//! Request handlers. Each call builds its own generator and allocations, so
//! one `CoastService` can be shared freely between threads.

use std::fmt;
use std::str::FromStr;

use coast_core::metrics::round2;
use coast_core::predictor::{predict, SUMMARY_CLASSIFICATION, SUMMARY_DESCRIPTION};
use coast_core::report::build_report;
use coast_core::{CoastGenerator, CoastParams};

use crate::config::ServiceConfig;
use crate::encode::png_data_uri;
use crate::error::{ApiError, ErrorPayload};
use crate::payload::{
    AnalyzeMetrics, AnalyzeRequest, AnalyzeResponse, PredictResponse, ReportResponse, Summary,
};

/// Index points awarded per landward transect.
pub const RISK_INDEX_PER_POINT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Analyze,
    Report,
    Predict,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Analyze, Operation::Report, Operation::Predict];

    pub fn route(&self) -> &'static str {
        match self {
            Operation::Analyze => "analyze-coast",
            Operation::Report  => "generate-report",
            Operation::Predict => "ai-predictor",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

impl FromStr for Operation {
    type Err = ApiError;

    /// Accepts the route name or its short form (`analyze`, `report`, `predict`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('/');
        match name {
            "analyze-coast" | "analyze"  => Ok(Operation::Analyze),
            "generate-report" | "report" => Ok(Operation::Report),
            "ai-predictor" | "predict"   => Ok(Operation::Predict),
            _ => Err(ApiError::UnknownOperation(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoastService {
    config: ServiceConfig,
}

impl CoastService {
    pub fn new(config: ServiceConfig) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Render the coastline for one year, optionally with transects.
    pub fn analyze(&self, req: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiError> {
        let _span = tracing::info_span!(
            "analyze",
            future_year = req.future_year,
            show_transects = req.show_transects
        )
        .entered();
        if let Some(bbox) = req.bbox {
            tracing::info!(?bbox, "viewport received");
        }

        let params = CoastParams {
            width: self.config.width,
            height: self.config.height,
            future_year: req.future_year,
            show_transects: req.show_transects,
        };
        let mut rng = self.config.rng();
        let scene = CoastGenerator::new().generate(&params, &mut rng)?;

        let metrics = AnalyzeMetrics {
            vegetation_coverage: round2(scene.vegetation_percent()),
            erosion_risk_index: scene.risk_points as f64 * RISK_INDEX_PER_POINT,
        };
        tracing::info!(
            vegetation_coverage = metrics.vegetation_coverage,
            risk_points = scene.risk_points,
            "coast analysed"
        );

        Ok(AnalyzeResponse {
            metrics,
            year_offset: req.future_year,
            mask_image: png_data_uri(&scene.raster)?,
        })
    }

    /// Multi-year strategic report.
    pub fn report(&self) -> Result<ReportResponse, ApiError> {
        let _span = tracing::info_span!("report").entered();

        let mut rng = self.config.rng();
        let report = build_report(self.config.width, self.config.height, &mut rng)?;
        tracing::info!(recommendation = ?report.recommendation, "report generated");

        Ok(ReportResponse {
            timeline_data: report.entries,
            ai_recommendation: report.recommendation.message().to_string(),
        })
    }

    /// Optimistic restoration forecast.
    pub fn predict(&self) -> Result<PredictResponse, ApiError> {
        let _span = tracing::info_span!("predict").entered();

        let mut rng = self.config.rng();
        let prediction = predict(self.config.width, self.config.height, &mut rng)?;
        tracing::info!(points = prediction.points.len(), "forecast sampled");

        Ok(PredictResponse {
            visit_points: prediction.points,
            graph_data: prediction.graph_data,
            gis_image: png_data_uri(&prediction.raster)?,
            summary: Summary {
                classification: SUMMARY_CLASSIFICATION.to_string(),
                description: SUMMARY_DESCRIPTION.to_string(),
            },
        })
    }

    /// Run `op` against a raw JSON body. An empty body counts as `{}`.
    /// Report and predict take no input and ignore the body.
    pub fn dispatch(&self, op: Operation, body: &str) -> Result<serde_json::Value, ApiError> {
        let value = match op {
            Operation::Analyze => {
                let req: AnalyzeRequest = if body.trim().is_empty() {
                    AnalyzeRequest::default()
                } else {
                    serde_json::from_str(body).map_err(ApiError::InvalidRequest)?
                };
                serde_json::to_value(self.analyze(&req)?)
            }
            Operation::Report => serde_json::to_value(self.report()?),
            Operation::Predict => serde_json::to_value(self.predict()?),
        };
        value.map_err(ApiError::Serialize)
    }

    /// Boundary entry point: every failure becomes an [`ErrorPayload`].
    pub fn handle(&self, op: &str, body: &str) -> Result<serde_json::Value, ErrorPayload> {
        op.parse::<Operation>()
            .and_then(|op| self.dispatch(op, body))
            .map_err(|err| {
                tracing::error!(operation = op, error = %err, "request failed");
                ErrorPayload::from(err)
            })
    }
}
