use axum::{
    Json,
    extract::{
        Path,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::song::{CreateSongRequest, Song, UpdateSongRequest},
    state::AppState,
};

/// Translates song requests into single store calls. Holds no state of its own.
pub struct SongController;

impl SongController {
    pub async fn list(state: &AppState) -> AppResult<Json<Vec<Song>>> {
        let songs = state.songs.list().await?;
        info!("Retrieved {} songs", songs.len());
        Ok(Json(songs))
    }

    pub async fn get(state: &AppState, id: i64) -> AppResult<Json<Song>> {
        Ok(Json(state.songs.get(id).await?))
    }

    pub async fn create(
        state: &AppState,
        payload: CreateSongRequest,
    ) -> AppResult<(StatusCode, Json<Song>)> {
        let song = state.songs.insert(&payload.title, &payload.lyrics).await?;
        info!("Created song {} ({:?})", song.id, song.title);
        Ok((StatusCode::CREATED, Json(song)))
    }

    pub async fn update(
        state: &AppState,
        id: i64,
        payload: UpdateSongRequest,
    ) -> AppResult<Json<Song>> {
        let song = state
            .songs
            .update(id, payload.title.as_deref(), payload.lyrics.as_deref())
            .await?;
        info!("Updated song {}", song.id);
        Ok(Json(song))
    }

    pub async fn delete(state: &AppState, id: i64) -> AppResult<StatusCode> {
        state.songs.delete(id).await?;
        info!("Deleted song {}", id);
        Ok(StatusCode::NO_CONTENT)
    }
}

/// Unwraps a JSON body, turning every extractor rejection into a 400.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

pub fn song_id(id: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    id.map(|Path(id)| id)
        .map_err(|_| AppError::BadRequest("Song id must be an integer".to_string()))
}
