use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsPost {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub category: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "time::deserialize")]
    pub published_date: DateTime<Utc>,
    #[serde(default, deserialize_with = "time::null_as_default")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "time::null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "time::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "time::deserialize_option")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize)]
pub struct NewsPostChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub category: Option<String>,
    pub featured: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "time::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsTag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "time::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_rows_with_nulls_and_naive_timestamps() {
        let post: NewsPost = serde_json::from_value(json!({
            "id": "p-1",
            "title": "Tour dates",
            "content": "Toronto, Newark, Honolulu",
            "excerpt": null,
            "category": "Concerts & Tours",
            "source_url": null,
            "source_name": null,
            "author": null,
            "image_url": null,
            "published_date": "2025-06-15T00:00:00+00:00",
            "is_featured": null,
            "tags": null,
            "created_at": "2025-06-15T10:11:12.345678",
            "updated_at": null
        }))
        .unwrap();

        assert!(!post.is_featured);
        assert!(post.tags.is_empty());
        assert!(post.created_at.is_some());
        assert!(post.updated_at.is_none());
    }

    #[test]
    fn changes_always_carry_updated_at() {
        let changes = NewsPostChanges {
            is_featured: Some(true),
            updated_at: Utc::now(),
            ..Default::default()
        };
        let value = serde_json::to_value(&changes).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["is_featured"], json!(true));
        assert!(object.contains_key("updated_at"));
    }
}
