// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Attached images (before/after photos).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// A photo attached to a report or drive.
///
/// Either a `data:image/...;base64,` URL produced by the device file picker
/// or a plain http(s) URL. Size and format beyond that are not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageRef(String);

impl ImageRef {
    pub fn parse(raw: &str) -> Result<Self, ImageError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ImageError::Empty);
        }

        if let Some(rest) = raw.strip_prefix("data:") {
            let (header, payload) = rest.split_once(',').ok_or(ImageError::MalformedDataUrl)?;
            let media_type = header
                .strip_suffix(";base64")
                .ok_or(ImageError::MalformedDataUrl)?;
            if !media_type.starts_with("image/") {
                return Err(ImageError::NotAnImage(media_type.to_string()));
            }
            STANDARD
                .decode(payload)
                .map_err(|_| ImageError::MalformedDataUrl)?;
            return Ok(Self(raw.to_string()));
        }

        if raw.starts_with("https://") || raw.starts_with("http://") {
            return Ok(Self(raw.to_string()));
        }

        Err(ImageError::UnsupportedScheme)
    }

    /// Wrap a URL known to be valid (seed data).
    pub(crate) fn unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl TryFrom<String> for ImageRef {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        value.0
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ImageError {
    #[error("Image is empty")]
    Empty,

    #[error("Malformed data URL")]
    MalformedDataUrl,

    #[error("Data URL is not an image: {0}")]
    NotAnImage(String),

    #[error("Image must be a data URL or http(s) URL")]
    UnsupportedScheme,
}
