use axum::Json;
use serde_json::Value;
use tracing::warn;

use crate::report::models::{RawCreditReport, TransformedReport};
use crate::report::transform::transform_credit_report_data;

/// POST /api/v1/reports/transform
/// Normalizes a raw three-bureau payload into comparable rows. A payload
/// that does not decode degrades to an all-empty report so the calling UI
/// never sees an error mid-render.
pub async fn handle_transform(Json(body): Json<Value>) -> Json<TransformedReport> {
    let raw = match serde_json::from_value::<RawCreditReport>(body) {
        Ok(raw) => Some(raw),
        Err(e) => {
            warn!("undecodable credit report payload: {e}");
            None
        }
    };
    Json(transform_credit_report_data(raw))
}
