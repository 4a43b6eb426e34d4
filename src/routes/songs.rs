use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    handlers::songs::{
        delete_song, download_cover, download_song, get_song, list_songs, update_song, upload_song,
    },
    utils::state::AppState,
};

pub fn song_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_songs).post(upload_song))
        .route("/{id}", get(get_song).patch(update_song).delete(delete_song))
        .route("/{id}/file", get(download_song))
        .route("/{id}/cover", get(download_cover))
}
