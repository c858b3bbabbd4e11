use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use crate::{error::AppError, state::AppState, utils::normalize_submission};

/// Raw `POST /submit` body. `serde(default)` turns absent fields into empty
/// strings so the presence check in `normalize_submission` covers both.
#[derive(Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub name1: String,
    #[serde(default)]
    pub name2: String,
    #[serde(default)]
    pub mode: String,
}

pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SubmitForm>,
) -> Result<impl IntoResponse, AppError> {
    let record = normalize_submission(form)?;

    state.store.append(record).await?;

    Ok(StatusCode::OK)
}

pub async fn root_handler() -> Redirect {
    Redirect::temporary("/flame")
}
