//! Browser bindings for the coastal simulator.
//!
//! Results come back as plain JS objects with the same shape as the JSON
//! payloads; failures reject with the uniform `{ error }` payload.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use coast_api::{AnalyzeRequest, CoastService, ErrorPayload, ServiceConfig};

// `getrandom` is only here for its `js` feature, which lets `StdRng::from_entropy`
// reach `crypto.getRandomValues` on wasm32.
use getrandom as _;

/// A configured simulator instance.
#[wasm_bindgen]
pub struct CoastEngine {
    service: CoastService,
}

#[wasm_bindgen]
impl CoastEngine {
    /// `config_json` is an optional `{ width, height, seed }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<CoastEngine, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => ServiceConfig::from_json(json).map_err(reject)?,
            _ => ServiceConfig::default(),
        };
        let service = CoastService::new(config).map_err(reject)?;
        Ok(CoastEngine { service })
    }

    /// Render one year's zone map. `request_json` may be empty.
    pub fn analyze(&self, request_json: &str) -> Result<JsValue, JsValue> {
        let req: AnalyzeRequest = if request_json.trim().is_empty() {
            AnalyzeRequest::default()
        } else {
            serde_json::from_str(request_json)
                .map_err(|e| reject(coast_api::ApiError::InvalidRequest(e)))?
        };
        to_js(&self.service.analyze(&req).map_err(reject)?)
    }

    pub fn report(&self) -> Result<JsValue, JsValue> {
        to_js(&self.service.report().map_err(reject)?)
    }

    pub fn predict(&self) -> Result<JsValue, JsValue> {
        to_js(&self.service.predict().map_err(reject)?)
    }

    /// Dispatch by operation name (`analyze-coast`, `generate-report`,
    /// `ai-predictor`).
    pub fn handle(&self, operation: &str, body: &str) -> Result<JsValue, JsValue> {
        match self.service.handle(operation, body) {
            Ok(value) => to_js(&value),
            Err(payload) => Err(payload_to_js(&payload)),
        }
    }
}

fn reject(err: coast_api::ApiError) -> JsValue {
    payload_to_js(&ErrorPayload::from(err))
}

fn payload_to_js(payload: &ErrorPayload) -> JsValue {
    serde_wasm_bindgen::to_value(payload).unwrap_or_else(|_| JsValue::from_str(&payload.error))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects instead of ES Maps for nested JSON values.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| payload_to_js(&ErrorPayload { error: e.to_string() }))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn seeded_engine_reports_five_years() {
        let engine = CoastEngine::new(Some(r#"{"width": 32, "height": 32, "seed": 1}"#.into())).unwrap();
        let value = engine.handle("generate-report", "").unwrap();
        let report: coast_api::ReportResponse = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(report.timeline_data.len(), 5);
    }

    #[wasm_bindgen_test]
    fn bad_request_rejects() {
        let engine = CoastEngine::new(None).unwrap();
        assert!(engine.analyze(r#"{"future_year": -1}"#).is_err());
    }
}
