use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    Json,
};
use http::StatusCode;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    models::{
        error::Error,
        song::{Song, SongChanges, SongRow, DEFAULT_CATEGORY, SONG_COLUMNS},
    },
    utils::{
        db,
        form::{FormData, UploadedFile},
        media::{allowed_extension, content_type_for, AUDIO_EXTENSIONS, COVER_EXTENSIONS},
        state::AppState,
    },
};

const SONG_NOT_FOUND: &str = "Song not found";

fn check_audio(file: &UploadedFile) -> Result<&'static str, Error> {
    allowed_extension(&file.file_name, AUDIO_EXTENSIONS)
        .ok_or_else(|| Error::bad_request("Only MP3 files are allowed"))
}

fn check_cover(file: &UploadedFile) -> Result<&'static str, Error> {
    allowed_extension(&file.file_name, COVER_EXTENSIONS)
        .ok_or_else(|| Error::bad_request("Cover must be JPG or PNG"))
}

async fn fetch_song_row(state: &AppState, id: &str) -> Result<Option<SongRow>, Error> {
    if Uuid::parse_str(id).is_err() {
        return Ok(None);
    }
    let row = db::fetch_one(
        state
            .supabase
            .from("songs")
            .select("*")
            .eq("id", id),
    )
    .await?;
    Ok(row)
}

async fn require_song_row(state: &AppState, id: &str) -> Result<SongRow, Error> {
    fetch_song_row(state, id)
        .await?
        .ok_or_else(|| Error::not_found(SONG_NOT_FOUND))
}

/// Uploads `file` to `bucket` and returns its public URL.
async fn store(
    state: &AppState,
    bucket: &str,
    path: &str,
    file: UploadedFile,
    extension: &str,
    what: &str,
) -> Result<String, Error> {
    let size = file.bytes.len();
    state
        .storage
        .upload(bucket, path, file.bytes, content_type_for(extension), false)
        .await
        .map_err(|e| Error::internal(&format!("Error uploading {}: {}", what, e)))?;
    info!(bucket, path, size, "Stored {}", what);
    Ok(state.storage.public_url(bucket, path))
}

pub async fn upload_song(
    State(state): State<Arc<AppState>>,
    mut form: FormData,
) -> Result<impl IntoResponse, Error> {
    let title = form.required("title")?;
    let file = form.require_file("file")?;
    let audio_ext = check_audio(&file)?;
    let cover = form.take_file("cover");
    let cover_ext = cover.as_ref().map(check_cover).transpose()?;
    let description = form.text("description");
    let category = form
        .text("category")
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let song_id = Uuid::new_v4().to_string();
    let config = &state.config;

    let audio_path = format!("{}.{}", song_id, audio_ext);
    let audio_url = store(&state, &config.audio_bucket, &audio_path, file, audio_ext, "audio").await?;

    let (cover_path, cover_url) = match (cover, cover_ext) {
        (Some(cover), Some(ext)) => {
            let path = format!("{}.{}", song_id, ext);
            let url = store(&state, &config.cover_bucket, &path, cover, ext, "cover").await?;
            (Some(path), Some(url))
        }
        _ => (None, None),
    };

    let row = SongRow {
        id: song_id,
        title,
        audio_path: Some(audio_path),
        cover_path,
        audio_url,
        cover_url,
        description,
        category: Some(category),
    };

    let body = serde_json::to_string(&row)
        .map_err(|e| Error::internal(&format!("Failed to encode song: {}", e)))?;
    db::execute(state.supabase.from("songs").insert(body)).await?;
    info!(song_id = %row.id, "Song created");

    Ok((StatusCode::CREATED, Json(Song::from(row))))
}

pub async fn list_songs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Song>>, Error> {
    let songs = db::fetch_all(
        state
            .supabase
            .from("songs")
            .select(SONG_COLUMNS)
            .order("created_at.desc"),
    )
    .await?;
    Ok(Json(songs))
}

pub async fn get_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Song>, Error> {
    let row = require_song_row(&state, &id).await?;
    Ok(Json(row.into()))
}

pub async fn download_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, Error> {
    let row = require_song_row(&state, &id).await?;
    Ok(Redirect::temporary(&row.audio_url))
}

pub async fn download_cover(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, Error> {
    fetch_song_row(&state, &id)
        .await?
        .and_then(|row| row.cover_url)
        .map(|url| Redirect::temporary(&url))
        .ok_or_else(|| Error::not_found("Cover not found"))
}

pub async fn update_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    mut form: FormData,
) -> Result<Json<Song>, Error> {
    let row = require_song_row(&state, &id).await?;

    let file = form.take_file("file");
    let audio_ext = file.as_ref().map(check_audio).transpose()?;
    let cover = form.take_file("cover");
    let cover_ext = cover.as_ref().map(check_cover).transpose()?;

    let mut changes = SongChanges {
        title: form.text("title"),
        description: form.text("description"),
        category: form.text("category"),
        ..Default::default()
    };
    let config = &state.config;

    if let (Some(file), Some(ext)) = (file, audio_ext) {
        if let Some(old) = row.audio_path.clone() {
            state.storage.remove(&config.audio_bucket, &[old]).await?;
        }
        let path = format!("{}.{}", row.id, ext);
        let url = store(&state, &config.audio_bucket, &path, file, ext, "audio").await?;
        changes.audio_path = Some(path);
        changes.audio_url = Some(url);
    }

    if let (Some(cover), Some(ext)) = (cover, cover_ext) {
        if let Some(old) = row.cover_path.clone() {
            state.storage.remove(&config.cover_bucket, &[old]).await?;
        }
        let path = format!("{}.{}", row.id, ext);
        let url = store(&state, &config.cover_bucket, &path, cover, ext, "cover").await?;
        changes.cover_path = Some(path);
        changes.cover_url = Some(url);
    }

    if !changes.is_empty() {
        let body = serde_json::to_string(&changes)
            .map_err(|e| Error::internal(&format!("Failed to encode song changes: {}", e)))?;
        db::execute(state.supabase.from("songs").eq("id", &row.id).update(body)).await?;
        info!(song_id = %row.id, "Song updated");
    }

    let updated = require_song_row(&state, &row.id).await?;
    Ok(Json(updated.into()))
}

pub async fn delete_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let row = require_song_row(&state, &id).await?;

    db::execute(state.supabase.from("songs").eq("id", &row.id).delete()).await?;

    let config = &state.config;
    let objects = [
        (&config.audio_bucket, row.audio_path),
        (&config.cover_bucket, row.cover_path),
    ];
    for (bucket, path) in objects {
        let Some(path) = path else { continue };
        if let Err(e) = state.storage.remove(bucket, &[path.clone()]).await {
            warn!(bucket = %bucket, path = %path, "Failed to remove stored object: {}", e);
        }
    }
    info!(song_id = %row.id, "Song deleted");

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Song deleted successfully"})),
    ))
}
