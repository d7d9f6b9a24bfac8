//! Recommendation form: GET renders it, POST runs the model

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::Html;
use axum::Form;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::{AppState, PredictError};
use crate::api::render::{self, FormEcho};
use crate::types::{FeatureRow, Prediction};

/// GET / - empty form with default values
pub async fn index_page() -> Html<String> {
    Html(render::page(&FormEcho::defaults(), None))
}

/// POST / - run a recommendation and render it into the page
///
/// Always answers 200: parse and model failures are shown in the page's
/// error box with the submitted values still in the form.
pub async fn submit_form(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Html<String> {
    let (echo, outcome) = match form {
        Ok(Form(fields)) => (FormEcho::from_fields(&fields), recommend(&state, &fields)),
        Err(rejection) => (
            FormEcho::defaults(),
            Err(PredictError::Request(rejection.body_text())),
        ),
    };

    match &outcome {
        Ok(prediction) => debug!(
            crop = %prediction.crop,
            alternatives = prediction.ranked.as_ref().map_or(0, Vec::len),
            "Recommendation served"
        ),
        Err(e) => warn!(error = %e, "Recommendation failed"),
    }

    Html(render::page(&echo, Some(&outcome)))
}

/// Parse the submitted fields and run them through the pipeline.
pub fn recommend(
    state: &AppState,
    fields: &HashMap<String, String>,
) -> Result<Prediction, PredictError> {
    let row = FeatureRow::from_form(fields)?;
    Ok(state.store.pipeline().predict(&row, &state.ranking)?)
}
