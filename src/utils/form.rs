use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};

use crate::models::error::Error;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Form body split into text fields and file parts. Accepts both
/// `multipart/form-data` and `application/x-www-form-urlencoded`.
///
/// Empty text values and file parts without a filename are dropped, so both
/// read as "not provided".
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| Error::new(e.status(), &e.body_text()))?;
            return FormData::from_multipart(multipart).await;
        }

        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|e| Error::new(e.status(), &e.body_text()))?;
        Ok(FormData {
            fields: fields.into_iter().filter(|(_, v)| !v.is_empty()).collect(),
            files: HashMap::new(),
        })
    }
}

impl FormData {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, Error> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match field.file_name().map(str::to_owned) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    if !file_name.is_empty() {
                        form.files.insert(name, UploadedFile { file_name, bytes });
                    }
                }
                None => {
                    let text = field.text().await?;
                    if !text.is_empty() {
                        form.fields.insert(name, text);
                    }
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    pub fn required(&self, name: &str) -> Result<String, Error> {
        self.text(name)
            .ok_or_else(|| Error::unprocessable(&format!("Field '{}' is required", name)))
    }

    pub fn flag(&self, name: &str) -> Result<Option<bool>, Error> {
        self.fields.get(name).map(|raw| parse_bool(name, raw)).transpose()
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    pub fn require_file(&mut self, name: &str) -> Result<UploadedFile, Error> {
        self.take_file(name)
            .ok_or_else(|| Error::unprocessable(&format!("Field '{}' is required", name)))
    }
}

pub fn parse_bool(name: &str, raw: &str) -> Result<bool, Error> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::unprocessable(&format!(
            "Field '{}' must be a boolean",
            name
        ))),
    }
}

/// Splits a comma separated tag list, trimming entries and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}
