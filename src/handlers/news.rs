use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    models::{
        error::Error,
        news::{NewsPost, NewsPostChanges, NewsQuery},
    },
    utils::{
        db,
        form::{parse_bool, parse_tags, FormData, UploadedFile},
        media::{allowed_extension, content_type_for, NEWS_IMAGE_EXTENSIONS},
        state::AppState,
        time::parse_timestamp,
    },
};

const POST_NOT_FOUND: &str = "News post not found";

fn check_image(file: &UploadedFile) -> Result<&'static str, Error> {
    allowed_extension(&file.file_name, NEWS_IMAGE_EXTENSIONS)
        .ok_or_else(|| Error::bad_request("Image must be JPG, PNG, or WebP"))
}

fn parse_published_date(raw: &str) -> Result<DateTime<Utc>, Error> {
    parse_timestamp(raw).ok_or_else(|| Error::bad_request("Invalid date format. Use ISO format."))
}

async fn fetch_post(state: &AppState, id: &str) -> Result<Option<NewsPost>, Error> {
    if Uuid::parse_str(id).is_err() {
        return Ok(None);
    }
    let post = db::fetch_one(
        state
            .supabase
            .from("news_posts")
            .select("*")
            .eq("id", id),
    )
    .await?;
    Ok(post)
}

async fn require_post(state: &AppState, id: &str) -> Result<NewsPost, Error> {
    fetch_post(state, id)
        .await?
        .ok_or_else(|| Error::not_found(POST_NOT_FOUND))
}

/// Uploads a post image to `news/{post_id}.{ext}`, overwriting any object
/// already at that path.
async fn store_image(
    state: &AppState,
    post_id: &str,
    image: UploadedFile,
    extension: &str,
) -> Result<String, Error> {
    let bucket = &state.config.news_image_bucket;
    let path = format!("news/{}.{}", post_id, extension);
    state
        .storage
        .upload(bucket, &path, image.bytes, content_type_for(extension), true)
        .await
        .map_err(|e| Error::internal(&format!("Error uploading image: {}", e)))?;
    info!(bucket = %bucket, path = %path, "Stored news image");
    Ok(state.storage.public_url(bucket, &path))
}

/// Removes the object behind `image_url` when it lives in the news bucket.
/// Failures are logged only.
async fn discard_image(state: &AppState, image_url: &str, keep: Option<&str>) {
    let bucket = &state.config.news_image_bucket;
    let Some(path) = state.storage.object_path(bucket, image_url) else {
        return;
    };
    if Some(path.as_str()) == keep {
        return;
    }
    if let Err(e) = state.storage.remove(bucket, &[path.clone()]).await {
        warn!(bucket = %bucket, path = %path, "Failed to remove news image: {}", e);
    }
}

pub async fn create_news_post(
    State(state): State<Arc<AppState>>,
    mut form: FormData,
) -> Result<impl IntoResponse, Error> {
    let title = form.required("title")?;
    let content = form.required("content")?;
    let category = form.required("category")?;
    let published_date = form.required("published_date")?;
    let is_featured = form.flag("is_featured")?.unwrap_or(false);
    let tags = form.text("tags").map(|raw| parse_tags(&raw)).unwrap_or_default();
    let image = form.take_file("image");
    let image_ext = image.as_ref().map(check_image).transpose()?;
    let published_date = parse_published_date(&published_date)?;

    let post_id = Uuid::new_v4().to_string();

    let image_url = match (image, image_ext) {
        (Some(image), Some(ext)) => Some(store_image(&state, &post_id, image, ext).await?),
        _ => None,
    };

    let now = Utc::now();
    let post = NewsPost {
        id: post_id,
        title,
        content,
        excerpt: form.text("excerpt"),
        category,
        source_url: form.text("source_url"),
        source_name: form.text("source_name"),
        author: form.text("author"),
        image_url,
        published_date,
        is_featured,
        tags,
        created_at: Some(now),
        updated_at: Some(now),
    };

    let body = serde_json::to_string(&post)
        .map_err(|e| Error::internal(&format!("Failed to encode news post: {}", e)))?;
    db::execute(state.supabase.from("news_posts").insert(body)).await?;
    info!(post_id = %post.id, "News post created");

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn list_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsQuery>,
) -> Result<Json<Vec<NewsPost>>, Error> {
    let featured = params
        .featured
        .as_deref()
        .map(|raw| parse_bool("featured", raw))
        .transpose()?
        .unwrap_or(false);

    let mut query = state.supabase.from("news_posts").select("*");
    if featured {
        query = query.eq("is_featured", "true");
    } else if let Some(category) = params.category.filter(|c| !c.is_empty()) {
        query = query.eq("category", category);
    }

    let posts = db::fetch_all(query.order("published_date.desc")).await?;
    Ok(Json(posts))
}

pub async fn get_news_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<NewsPost>, Error> {
    Ok(Json(require_post(&state, &id).await?))
}

pub async fn update_news_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    mut form: FormData,
) -> Result<Json<NewsPost>, Error> {
    let post = require_post(&state, &id).await?;

    let image = form.take_file("image");
    let image_ext = image.as_ref().map(check_image).transpose()?;
    let published_date = form
        .text("published_date")
        .map(|raw| parse_published_date(&raw))
        .transpose()?;

    let mut changes = NewsPostChanges {
        title: form.text("title"),
        content: form.text("content"),
        excerpt: form.text("excerpt"),
        category: form.text("category"),
        source_url: form.text("source_url"),
        source_name: form.text("source_name"),
        author: form.text("author"),
        published_date,
        is_featured: form.flag("is_featured")?,
        tags: form.text("tags").map(|raw| parse_tags(&raw)),
        updated_at: Utc::now(),
        ..Default::default()
    };

    if let (Some(image), Some(ext)) = (image, image_ext) {
        let url = store_image(&state, &post.id, image, ext).await?;
        if let Some(old_url) = post.image_url.as_deref() {
            let new_path = format!("news/{}.{}", post.id, ext);
            discard_image(&state, old_url, Some(new_path.as_str())).await;
        }
        changes.image_url = Some(url);
    }

    let body = serde_json::to_string(&changes)
        .map_err(|e| Error::internal(&format!("Failed to encode news post changes: {}", e)))?;
    db::execute(state.supabase.from("news_posts").eq("id", &post.id).update(body)).await?;
    info!(post_id = %post.id, "News post updated");

    Ok(Json(require_post(&state, &post.id).await?))
}

pub async fn delete_news_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let post = require_post(&state, &id).await?;

    db::execute(state.supabase.from("news_posts").eq("id", &post.id).delete()).await?;
    if let Some(image_url) = post.image_url.as_deref() {
        discard_image(&state, image_url, None).await;
    }
    info!(post_id = %post.id, "News post deleted");

    Ok((
        StatusCode::OK,
        Json(json!({"message": "News post deleted successfully"})),
    ))
}
