use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{ Deserialize, Serialize };

use crate::errors::{ MathError, MathResult };

/// A reference to an image the model can look at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageRef {
    /// Remotely fetchable absolute http(s) URL
    Url {
        url: String,
    },
    /// Inline payload, already base64 encoded
    Inline { media_type: String, data: String },
}

impl ImageRef {
    /// Parse a URL or a `data:<mime>;base64,<payload>` URI
    pub fn parse(source: &str) -> MathResult<Self> {
        let source = source.trim();
        if source.is_empty() {
            return Err(MathError::InputValidation("image reference is empty".to_string()));
        }

        if let Some(rest) = source.strip_prefix("data:") {
            return Self::parse_data_uri(rest);
        }

        let url = reqwest::Url
            ::parse(source)
            .map_err(|e| MathError::InputValidation(format!("invalid image URL: {}", e)))?;
        match url.scheme() {
            "http" | "https" if url.host_str().is_some() => Ok(ImageRef::Url { url: source.to_string() }),
            scheme =>
                Err(
                    MathError::InputValidation(
                        format!("unsupported image URL scheme '{}', expected http or https", scheme)
                    )
                ),
        }
    }

    fn parse_data_uri(rest: &str) -> MathResult<Self> {
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| MathError::InputValidation("data URI has no payload".to_string()))?;

        let media_type = header
            .strip_suffix(";base64")
            .ok_or_else(||
                MathError::InputValidation("data URI must be base64 encoded".to_string())
            )?;

        if !media_type.starts_with("image/") {
            return Err(
                MathError::InputValidation(format!("unsupported media type '{}'", media_type))
            );
        }

        if payload.is_empty() {
            return Err(MathError::InputValidation("data URI payload is empty".to_string()));
        }

        BASE64.decode(payload).map_err(|e|
            MathError::InputValidation(format!("data URI payload is not valid base64: {}", e))
        )?;

        Ok(ImageRef::Inline {
            media_type: media_type.to_string(),
            data: payload.to_string(),
        })
    }

    /// Build an inline reference from raw bytes with a known media type
    pub fn from_bytes(bytes: &[u8], media_type: &str) -> MathResult<Self> {
        if bytes.is_empty() {
            return Err(MathError::InputValidation("image file is empty".to_string()));
        }
        Ok(ImageRef::Inline {
            media_type: media_type.to_string(),
            data: BASE64.encode(bytes),
        })
    }

    /// Read an image file, deriving the media type from its extension
    pub fn from_file(path: &Path) -> MathResult<Self> {
        let media_type = media_type_for(path)?;
        let bytes = std::fs
            ::read(path)
            .map_err(|e|
                MathError::InputValidation(format!("failed to read {}: {}", path.display(), e))
            )?;
        Self::from_bytes(&bytes, media_type)
    }

    /// The string form accepted by the model API's `image_url` field
    pub fn to_model_url(&self) -> String {
        match self {
            ImageRef::Url { url } => url.clone(),
            ImageRef::Inline { media_type, data } => format!("data:{};base64,{}", media_type, data),
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::Url { url } => write!(f, "{}", url),
            ImageRef::Inline { media_type, data } =>
                write!(f, "inline {} image ({} base64 chars)", media_type, data.len()),
        }
    }
}

/// Map a file extension to a media type
pub fn media_type_for(path: &Path) -> MathResult<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        "" =>
            Err(
                MathError::InputValidation(
                    format!("cannot determine image type of {}", path.display())
                )
            ),
        other => Err(MathError::InputValidation(format!("unsupported image extension '{}'", other))),
    }
}
