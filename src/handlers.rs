use crate::db::persist_data;
use crate::errors::AppError;
use crate::models::{BLOCK_COUNT, MessageResponse, SaveWeekRequest, WeekDataResponse, WeekRecord};
use crate::state::AppState;
use crate::stats::{WeekStats, week_stats};
use crate::ui::render_index;
use crate::week::{current_week_key, sort_week_keys};
use axum::{
    Json,
    extract::{Path, State},
    response::Html,
};
use tracing::info;

const SAVED_MESSAGE: &str = "Data saved successfully!";

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&current_week_key(), state.storage_mode))
}

pub async fn list_weeks(State(state): State<AppState>) -> Json<Vec<String>> {
    let data = state.data.lock().await;
    let mut weeks: Vec<String> = data.weeks.keys().cloned().collect();
    sort_week_keys(&mut weeks);
    Json(weeks)
}

pub async fn get_week(
    State(state): State<AppState>,
    Path(week_key): Path<String>,
) -> Result<Json<WeekDataResponse>, AppError> {
    let data = state.data.lock().await;
    let record = data
        .weeks
        .get(&week_key)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("no data for week '{week_key}'")))?;
    Ok(Json(record))
}

pub async fn save_week(
    State(state): State<AppState>,
    Path(week_key): Path<String>,
    Json(payload): Json<SaveWeekRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if week_key.trim().is_empty() {
        return Err(AppError::bad_request("week key must not be empty"));
    }
    if payload.blocks.len() != BLOCK_COUNT {
        return Err(AppError::bad_request(format!(
            "expected {BLOCK_COUNT} blocks, got {}",
            payload.blocks.len()
        )));
    }

    let mut record = WeekRecord::from(payload);
    record.assign_ids();

    let mut data = state.data.lock().await;
    let previous = data.weeks.insert(week_key.clone(), record);
    if let Err(err) = persist_data(&state.data_path, &data).await {
        // Memory must not get ahead of the file.
        match previous {
            Some(previous) => data.weeks.insert(week_key, previous),
            None => data.weeks.remove(&week_key),
        };
        return Err(err);
    }

    info!(week_key = %week_key, weeks = data.weeks.len(), "saved week");
    Ok(Json(MessageResponse {
        message: SAVED_MESSAGE.to_string(),
    }))
}

pub async fn get_week_stats(
    State(state): State<AppState>,
    Path(week_key): Path<String>,
) -> Result<Json<WeekStats>, AppError> {
    let data = state.data.lock().await;
    let record = data
        .weeks
        .get(&week_key)
        .ok_or_else(|| AppError::not_found(format!("no data for week '{week_key}'")))?;
    Ok(Json(week_stats(record)))
}
