//! Request decoding and response shaping for trade evaluation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pogo_catalog::CatalogError;
use pogo_engine::{verdict_label, EngineError, Valuator};
use pogo_models::{Catalog, Locale, Outcome, SideValuation, TradeProposal, TradeVerdict};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request body does not describe a trade proposal.
    #[error("Invalid trade request: {0}")]
    Validation(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Engine(_) | ApiError::Catalog(_) | ApiError::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message sent to the client.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Catalog(e) if e.is_not_found() => {
                "Catalog not found. Run: pogo-sync".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, "Request rejected");
        }
        let body = serde_json::json!({ "error": self.public_message() });
        (status, Json(body)).into_response()
    }
}

/// Decode a raw request body into a proposal.
///
/// An empty body is an empty trade. Anything else must be a JSON object whose
/// `left` / `right` members (if present) are arrays of trade items.
pub fn decode_proposal(body: &[u8]) -> Result<TradeProposal, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TradeProposal::default());
    }

    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::Validation(format!("body is not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(ApiError::Validation(
            "body must be a JSON object with `left` and `right` arrays".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| ApiError::Validation(e.to_string()))
}

/// Response body of the trade evaluation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuationResponse {
    pub left: SideValuation,
    pub right: SideValuation,
    pub delta: i64,
    pub ratio: f64,
    pub outcome: Outcome,
    /// Localized label for `outcome`.
    pub verdict: String,
    pub reason: String,
}

impl ValuationResponse {
    pub fn from_verdict(verdict: TradeVerdict, locale: Locale) -> Self {
        Self {
            verdict: verdict_label(verdict.outcome, locale).to_string(),
            left: verdict.left,
            right: verdict.right,
            delta: verdict.delta,
            ratio: verdict.ratio,
            outcome: verdict.outcome,
            reason: verdict.explanation,
        }
    }
}

/// Decode, score and shape in one step. The body is validated before the
/// catalog is consulted.
pub fn evaluate_body(
    body: &[u8],
    catalog: &Catalog,
    valuator: &Valuator,
) -> Result<ValuationResponse, ApiError> {
    let proposal = decode_proposal(body)?;
    let verdict = valuator.valuate(&proposal, catalog)?;
    Ok(ValuationResponse::from_verdict(verdict, valuator.locale()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pogo_engine::test_support::{catalog_with, defense_only, standard_catalog};
    use pogo_models::{RarityTier, TradeOptions, VariantFlag};

    #[test]
    fn empty_body_is_empty_trade() {
        assert_eq!(decode_proposal(b"").unwrap(), TradeProposal::default());
        assert_eq!(decode_proposal(b" \n").unwrap(), TradeProposal::default());
    }

    #[test]
    fn coerces_string_ids() {
        let proposal =
            decode_proposal(br#"{"left": [{"pokemonId": "25", "options": {"shiny": true}}]}"#)
                .unwrap();
        assert_eq!(proposal.left[0].creature_id, 25);
        assert!(proposal.left[0].flags.contains(VariantFlag::Shiny));
        assert!(proposal.right.is_empty());
    }

    #[test]
    fn rejects_non_object_bodies() {
        for body in [&b"[]"[..], b"42", b"\"left\"", b"null", b"[[], []]"] {
            let err = decode_proposal(body).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{body:?}");
        }
    }

    #[test]
    fn rejects_malformed_shapes() {
        for body in [
            &br#"{"left": {"pokemonId": 1}}"#[..],
            br#"{"left": [{"pokemonId": "abc"}]}"#,
            br#"{"right": [{"options": {"shiny": true}}]}"#,
            br#"{"right": [17]}"#,
            br#"{"left": [{"pokemonId": 1, "options": "shiny"}]}"#,
            b"{not json",
        ] {
            assert!(
                matches!(decode_proposal(body), Err(ApiError::Validation(_))),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn unresolvable_ids_are_skipped_not_rejected() {
        let body = br#"{"left": [
            {"pokemonId": -1},
            {"pokemonId": "-3"},
            {"pokemonId": 4294967296},
            {"pokemonId": 25}
        ]}"#;
        let response = evaluate_body(body, &standard_catalog(), &Valuator::default()).unwrap();

        assert_eq!(response.left.items.len(), 1);
        assert_eq!(response.left.items[0].creature_id, 25);
        assert_eq!(response.left.skipped, vec![-1, -3, 4_294_967_296]);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["left"]["skipped"], serde_json::json!([-1, -3, 4294967296_i64]));
    }

    #[test]
    fn response_carries_label_and_reason() {
        let catalog = catalog_with(
            vec![
                defense_only(1, 100.0, RarityTier::Common),
                defense_only(2, 120.0, RarityTier::Common),
            ],
            TradeOptions::standard(),
        );
        let body = br#"{"left": [{"pokemonId": 1}], "right": [{"pokemonId": 2}]}"#;
        let response = evaluate_body(body, &catalog, &Valuator::default()).unwrap();

        assert_eq!(response.delta, -20);
        assert_eq!(response.outcome, Outcome::FavorsLeft);
        assert_eq!(response.verdict, "unfavorable to left side");
        assert!(response.reason.contains("16.7%"));
    }

    #[test]
    fn hebrew_locale_labels() {
        let body = br#"{"left": [], "right": []}"#;
        let response =
            evaluate_body(body, &standard_catalog(), &Valuator::new(Locale::He)).unwrap();
        assert_eq!(response.outcome, Outcome::Fair);
        assert_eq!(response.verdict, "שווה");
    }

    #[test]
    fn validation_precedes_configuration_check() {
        let catalog = catalog_with(vec![], TradeOptions::default());
        let err = evaluate_body(b"[1]", &catalog, &Valuator::default()).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = evaluate_body(b"{}", &catalog, &Valuator::default()).unwrap_err();
        assert!(matches!(err, ApiError::Engine(EngineError::Configuration(_))));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_json_shape() {
        let body = br#"{"left": [{"pokemonId": 150, "options": {"shadow": true}}]}"#;
        let response = evaluate_body(body, &standard_catalog(), &Valuator::default()).unwrap();
        let value = serde_json::to_value(&response).unwrap();

        for key in ["left", "right", "delta", "ratio", "outcome", "verdict", "reason"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["left"]["items"][0]["appliedFlags"], serde_json::json!(["shadow"]));
        assert_eq!(value["verdict"], "unfavorable to right side");
    }
}
