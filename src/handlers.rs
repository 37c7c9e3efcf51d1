use crate::errors::AppError;
use crate::models::{CountResponse, IncrementRequest, IncrementResponse};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use chrono::Utc;
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let count = state.data.lock().await.count;
    Html(render_index(count, state.external_form_url.as_deref()))
}

pub async fn get_count(State(state): State<AppState>) -> Json<CountResponse> {
    let data = state.data.lock().await;
    Json(CountResponse {
        count: data.count,
        updated_at: data.updated_at,
    })
}

/// The body is optional; only its presence is logged.
pub async fn increment_count(
    State(state): State<AppState>,
    payload: Option<Json<IncrementRequest>>,
) -> Result<Json<IncrementResponse>, AppError> {
    match &payload {
        Some(Json(request)) => {
            debug!(email_present = !request.email.is_empty(), "increment request")
        }
        None => debug!("increment request without body"),
    }

    let new_count = apply_increment(&state).await?;
    info!(new_count, "counter incremented");

    Ok(Json(IncrementResponse {
        success: true,
        new_count,
    }))
}

/// The in-memory count only moves once the new value is on disk.
async fn apply_increment(state: &AppState) -> Result<u64, AppError> {
    let mut data = state.data.lock().await;
    let mut updated = data.clone();
    updated.count = updated.count.saturating_add(1);
    updated.updated_at = Some(Utc::now());

    persist_data(&state.data_path, &updated).await?;

    *data = updated;
    Ok(data.count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CounterData;

    fn state_in(dir: &tempfile::TempDir) -> AppState {
        AppState::new(dir.path().join("counter.json"), CounterData::default())
    }

    #[tokio::test]
    async fn increments_are_sequential_and_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);

        assert_eq!(apply_increment(&state).await.unwrap(), 1);
        assert_eq!(apply_increment(&state).await.unwrap(), 2);

        let on_disk = crate::storage::load_data(&state.data_path).await;
        assert_eq!(on_disk.count, 2);
        assert!(on_disk.updated_at.is_some());
    }

    #[tokio::test]
    async fn failed_persist_leaves_count_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(
            dir.path().join("missing").join("counter.json"),
            CounterData {
                count: 5,
                updated_at: None,
            },
        );

        assert!(apply_increment(&state).await.is_err());
        assert_eq!(state.data.lock().await.count, 5);
    }

    #[tokio::test]
    async fn count_saturates() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(
            dir.path().join("counter.json"),
            CounterData {
                count: u64::MAX,
                updated_at: None,
            },
        );
        assert_eq!(apply_increment(&state).await.unwrap(), u64::MAX);
    }
}
