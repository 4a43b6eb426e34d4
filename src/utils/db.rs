//! Thin helpers over the PostgREST query builder.
//!
//! Every call returns the raw response body so rows can be decoded into the
//! caller's model. Non-2xx responses are surfaced as [`DbError::Status`],
//! except for single-row reads where `406 Not Acceptable` means "no row".

use postgrest::Builder;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected row shape: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("backend returned no rows")]
    Empty,
}

const NO_SINGLE_ROW: u16 = 406;

async fn send(query: Builder) -> Result<(u16, String), DbError> {
    let response = query
        .execute()
        .await
        .map_err(|e| DbError::Request(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| DbError::Request(e.to_string()))?;
    Ok((status, body))
}

fn check(status: u16, body: String) -> Result<String, DbError> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(DbError::Status { status, body })
    }
}

/// Runs a select and decodes every returned row.
pub async fn fetch_all<T: DeserializeOwned>(query: Builder) -> Result<Vec<T>, DbError> {
    let (status, body) = send(query).await?;
    let body = check(status, body)?;
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&body)?)
}

/// Runs a select with single-object semantics. `None` when no row matched.
pub async fn fetch_one<T: DeserializeOwned>(query: Builder) -> Result<Option<T>, DbError> {
    let (status, body) = send(query.single()).await?;
    if status == NO_SINGLE_ROW {
        return Ok(None);
    }
    let body = check(status, body)?;
    Ok(Some(serde_json::from_str(&body)?))
}

/// Runs an insert and returns the first row the backend hands back.
pub async fn insert_one<T: DeserializeOwned>(query: Builder) -> Result<T, DbError> {
    let rows: Vec<T> = fetch_all(query).await?;
    rows.into_iter().next().ok_or(DbError::Empty)
}

/// Runs a write whose returned representation is not needed.
pub async fn execute(query: Builder) -> Result<(), DbError> {
    let (status, body) = send(query).await?;
    check(status, body).map(|_| ())
}
