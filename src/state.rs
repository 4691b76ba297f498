use std::sync::Arc;

use crate::db::SongStore;

#[derive(Clone)]
pub struct AppState {
    pub songs: Arc<dyn SongStore>,
}

impl AppState {
    pub fn new(songs: Arc<dyn SongStore>) -> Self {
        Self { songs }
    }
}
