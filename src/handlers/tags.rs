use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use http::StatusCode;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    models::{error::Error, news::NewsTag},
    utils::{db, form::FormData, state::AppState},
};

pub async fn list_tags(State(state): State<Arc<AppState>>) -> Result<Json<Vec<NewsTag>>, Error> {
    let tags = db::fetch_all(
        state
            .supabase
            .from("news_tags")
            .select("*")
            .order("name.asc"),
    )
    .await?;
    Ok(Json(tags))
}

pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    form: FormData,
) -> Result<impl IntoResponse, Error> {
    let name = form.required("name")?;
    let body = json!({
        "id": Uuid::new_v4().to_string(),
        "name": name,
        "color": form.text("color"),
        "created_at": Utc::now(),
    });

    let tag: NewsTag = db::insert_one(state.supabase.from("news_tags").insert(body.to_string())).await?;
    info!(tag = %tag.name, "News tag created");

    Ok((StatusCode::CREATED, Json(tag)))
}
