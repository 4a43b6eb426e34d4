use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    handlers::{
        categories::{create_category, list_categories},
        news::{create_news_post, delete_news_post, get_news_post, list_news, update_news_post},
        tags::{create_tag, list_tags},
    },
    utils::state::AppState,
};

pub fn news_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_news).post(create_news_post))
        .route("/categories", get(list_categories).post(create_category))
        .route("/tags", get(list_tags).post(create_tag))
        .route(
            "/{id}",
            get(get_news_post)
                .patch(update_news_post)
                .delete(delete_news_post),
        )
}
