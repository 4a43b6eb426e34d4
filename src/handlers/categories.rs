use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use http::StatusCode;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    models::{error::Error, news::NewsCategory},
    utils::{db, form::FormData, state::AppState},
};

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NewsCategory>>, Error> {
    let categories = db::fetch_all(
        state
            .supabase
            .from("news_categories")
            .select("*")
            .order("name.asc"),
    )
    .await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    form: FormData,
) -> Result<impl IntoResponse, Error> {
    let name = form.required("name")?;
    let body = json!({
        "id": Uuid::new_v4().to_string(),
        "name": name,
        "description": form.text("description"),
        "color": form.text("color"),
        "icon": form.text("icon"),
        "created_at": Utc::now(),
    });

    let category: NewsCategory =
        db::insert_one(state.supabase.from("news_categories").insert(body.to_string())).await?;
    info!(category = %category.name, "News category created");

    Ok((StatusCode::CREATED, Json(category)))
}
