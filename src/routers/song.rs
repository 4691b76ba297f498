// Song routes
use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};

use crate::{
    controllers::{
        SongController,
        song::{json_body, song_id},
    },
    error::AppResult,
    models::song::{CreateSongRequest, Song, UpdateSongRequest},
    state::AppState,
};

pub async fn list_songs_route(State(state): State<AppState>) -> AppResult<Json<Vec<Song>>> {
    SongController::list(&state).await
}

pub async fn get_song_route(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Song>> {
    SongController::get(&state, song_id(id)?).await
}

pub async fn create_song_route(
    State(state): State<AppState>,
    body: Result<Json<CreateSongRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Song>)> {
    SongController::create(&state, json_body(body)?).await
}

pub async fn update_song_route(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateSongRequest>, JsonRejection>,
) -> AppResult<Json<Song>> {
    SongController::update(&state, song_id(id)?, json_body(body)?).await
}

pub async fn delete_song_route(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    SongController::delete(&state, song_id(id)?).await
}

pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/songs", get(list_songs_route).post(create_song_route))
        .route(
            "/songs/{id}",
            get(get_song_route)
                .put(update_song_route)
                .delete(delete_song_route),
        )
}
