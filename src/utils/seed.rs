//! Seed data for the news tables.
//!
//! A seed document lists categories, tags and posts without ids or
//! timestamps; [`SeedDocument::into_rows`] assigns both before insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    models::news::{NewsCategory, NewsPost, NewsTag},
    utils::{db, state::AppState, time::parse_timestamp},
};

pub const BUNDLED_SEED: &str = include_str!("../../data/news_seed.json");

#[derive(Debug, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub tags: Vec<SeedTag>,
    #[serde(default)]
    pub posts: Vec<SeedPost>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedTag {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedPost {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: String,
    pub source_url: Option<String>,
    pub source_name: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub published_date: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub struct SeedRows {
    pub categories: Vec<NewsCategory>,
    pub tags: Vec<NewsTag>,
    pub posts: Vec<NewsPost>,
}

#[derive(Debug, Default, PartialEq)]
pub struct SeedReport {
    pub inserted: usize,
    pub failed: usize,
}

impl SeedDocument {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn into_rows(self, now: DateTime<Utc>) -> Result<SeedRows, String> {
        let categories = self
            .categories
            .into_iter()
            .map(|c| NewsCategory {
                id: Uuid::new_v4().to_string(),
                name: c.name,
                description: c.description,
                color: c.color,
                icon: c.icon,
                created_at: Some(now),
            })
            .collect();

        let tags = self
            .tags
            .into_iter()
            .map(|t| NewsTag {
                id: Uuid::new_v4().to_string(),
                name: t.name,
                color: t.color,
                created_at: Some(now),
            })
            .collect();

        let posts = self
            .posts
            .into_iter()
            .map(|p| {
                let published_date = parse_timestamp(&p.published_date).ok_or_else(|| {
                    format!("post '{}' has invalid published_date {}", p.title, p.published_date)
                })?;
                Ok(NewsPost {
                    id: Uuid::new_v4().to_string(),
                    title: p.title,
                    content: p.content,
                    excerpt: p.excerpt,
                    category: p.category,
                    source_url: p.source_url,
                    source_name: p.source_name,
                    author: p.author,
                    image_url: p.image_url,
                    published_date,
                    is_featured: p.is_featured,
                    tags: p.tags,
                    created_at: Some(now),
                    updated_at: Some(now),
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(SeedRows {
            categories,
            tags,
            posts,
        })
    }
}

async fn insert_all<T: Serialize>(
    state: &AppState,
    table: &str,
    rows: &[T],
    label: impl Fn(&T) -> &str,
) -> SeedReport {
    let mut report = SeedReport::default();
    for row in rows {
        let outcome = match serde_json::to_string(row) {
            Ok(body) => db::execute(state.supabase.from(table).insert(body))
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match outcome {
            Ok(()) => {
                info!(table, "Created {}", label(row));
                report.inserted += 1;
            }
            Err(e) => {
                warn!(table, "Failed to create {}: {}", label(row), e);
                report.failed += 1;
            }
        }
    }
    report
}

/// Inserts every row, continuing past failures.
pub async fn populate(state: &AppState, rows: &SeedRows) -> SeedReport {
    let mut total = SeedReport::default();
    for report in [
        insert_all(state, "news_categories", &rows.categories, |c| c.name.as_str()).await,
        insert_all(state, "news_tags", &rows.tags, |t| t.name.as_str()).await,
        insert_all(state, "news_posts", &rows.posts, |p| p.title.as_str()).await,
    ] {
        total.inserted += report.inserted;
        total.failed += report.failed;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_seed_is_valid() {
        let document = SeedDocument::parse(BUNDLED_SEED).unwrap();
        let rows = document.into_rows(Utc::now()).unwrap();

        assert_eq!(rows.categories.len(), 5);
        assert_eq!(rows.tags.len(), 9);
        assert_eq!(rows.posts.len(), 6);
        assert!(rows.posts.iter().any(|p| p.is_featured));
    }

    #[test]
    fn rows_get_fresh_ids_and_timestamps() {
        let document = SeedDocument::parse(
            r##"{
                "tags": [{"name": "Vocaloid", "color": "#ef4444"}, {"name": "One Piece"}],
                "posts": [{
                    "title": "Tour",
                    "content": "Dates announced",
                    "category": "Concerts & Tours",
                    "published_date": "2025-06-15T00:00:00Z",
                    "tags": ["World Tour"]
                }]
            }"##,
        )
        .unwrap();
        let now = Utc::now();
        let rows = document.into_rows(now).unwrap();

        assert!(rows.categories.is_empty());
        assert_ne!(rows.tags[0].id, rows.tags[1].id);
        assert_eq!(rows.tags[1].created_at, Some(now));
        assert_eq!(rows.posts[0].updated_at, Some(now));
        assert!(!rows.posts[0].is_featured);
    }

    #[test]
    fn invalid_published_date_is_reported() {
        let document = SeedDocument::parse(
            r#"{"posts": [{
                "title": "Broken",
                "content": "x",
                "category": "c",
                "published_date": "sometime"
            }]}"#,
        )
        .unwrap();

        let err = document.into_rows(Utc::now()).err().unwrap();
        assert!(err.contains("Broken"));
    }
}
