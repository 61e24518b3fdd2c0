//! Image loading for providers that need inline data
//!
//! Providers that embed images inline resolve every [`ImageInput`] to base64
//! before the chat request is sent. Any failure here aborts the whole call.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::LlmError;
use crate::types::ImageInput;
use crate::utils::mime::guess_mime;

/// Image bytes ready to embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub media_type: String,
    /// Base64 (standard alphabet, padded)
    pub data: String,
}

/// Split a `data:<mime>[;base64],<payload>` URL into media type and base64.
pub fn parse_data_url(data_url: &str) -> Option<(String, String)> {
    let rest = data_url.strip_prefix("data:")?;
    let (header, data) = rest.split_once(',')?;
    let mime_type = header.split(';').next().unwrap_or_default().to_string();
    if !header.split(';').any(|p| p == "base64") {
        // plain payloads are percent-encoded octets
        let bytes = urlencoding::decode_binary(data.as_bytes());
        return Some((mime_type, STANDARD.encode(&bytes)));
    }
    Some((mime_type, data.to_string()))
}

/// Resolve an image to inline base64.
///
/// - `data:` URLs are used as is
/// - `http(s)` URLs are fetched with GET; a non-success status is an error
/// - anything else is read from the local filesystem (`file://` prefix allowed)
pub async fn fetch_image(
    client: &reqwest::Client,
    image: &ImageInput,
) -> Result<EncodedImage, LlmError> {
    if image.is_data_url() {
        let (media_type, data) = parse_data_url(&image.url)
            .ok_or_else(|| LlmError::InvalidInput(format!("Malformed data URL: {}", image.url)))?;
        let media_type = if image.media_type.is_empty() {
            media_type
        } else {
            image.media_type.clone()
        };
        return Ok(EncodedImage { media_type, data });
    }

    let bytes = if image.is_remote() {
        tracing::debug!(url = %image.url, "fetching image");
        let response = client
            .get(&image.url)
            .send()
            .await
            .map_err(|e| LlmError::provider("image", format!("Failed to fetch image {}: {e}", image.url)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::from_status(
                "image",
                status.as_u16(),
                format!("Failed to fetch image {}", image.url),
            ));
        }
        response
            .bytes()
            .await
            .map_err(|e| LlmError::provider("image", format!("Failed to read image body: {e}")))?
            .to_vec()
    } else {
        let path = image.url.strip_prefix("file://").unwrap_or(&image.url);
        tokio::fs::read(path)
            .await
            .map_err(|e| LlmError::provider("image", format!("Failed to read image {path}: {e}")))?
    };

    let media_type = if image.media_type.is_empty() {
        guess_mime(Some(&bytes), Some(&image.url))
    } else {
        image.media_type.clone()
    };

    Ok(EncodedImage {
        media_type,
        data: STANDARD.encode(&bytes),
    })
}

/// Resolve every image of one message, in order.
pub async fn fetch_images(
    client: &reqwest::Client,
    images: &[ImageInput],
) -> Result<Vec<EncodedImage>, LlmError> {
    let mut out = Vec::with_capacity(images.len());
    for image in images {
        out.push(fetch_image(client, image).await?);
    }
    Ok(out)
}
