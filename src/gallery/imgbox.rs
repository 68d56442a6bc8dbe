use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use regex::Regex;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use super::traits::Gallery;
use super::types::{GalleryOptions, ImageUrls, Submission};
use crate::app::ServiceConfig;
use crate::constants::{SUPPORTED_IMAGE_TYPES, THUMBNAIL_WIDTHS};
use crate::utils::ImgboxError;
use crate::validate::check_file;

/// Gallery hosted on imgbox.com
pub struct ImgboxGallery {
    client: Client,
    base_url: String,
    options: GalleryOptions,
    session: Option<UploadSession>,
}

/// Credentials handed out by the host when a gallery is created
#[derive(Debug, Clone)]
struct UploadSession {
    csrf_token: String,
    token_id: String,
    token_secret: String,
    gallery_id: String,
    gallery_secret: String,
    url: String,
    edit_url: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token_id: Identifier,
    token_secret: String,
    gallery_id: Identifier,
    gallery_secret: String,
}

/// The host sends some IDs as numbers and some as strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Identifier {
    Number(u64),
    Text(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    files: Vec<UploadedFile>,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    original_url: String,
    thumbnail_url: String,
    url: String,
}

impl ImgboxGallery {
    pub fn new(options: GalleryOptions, service: &ServiceConfig) -> Result<Self, ImgboxError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(service.timeout_secs))
            .user_agent(concat!("imgbox/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: service.base_url.trim_end_matches('/').to_string(),
            options,
            session: None,
        })
    }

    async fn ensure_session(&mut self) -> Result<&UploadSession, ImgboxError> {
        if self.session.is_none() {
            let session = self.open_session().await?;
            tracing::info!("Created gallery {}", session.url);
            self.session = Some(session);
        }
        self.session
            .as_ref()
            .ok_or_else(|| ImgboxError::Protocol("Gallery session missing".to_string()))
    }

    async fn open_session(&self) -> Result<UploadSession, ImgboxError> {
        tracing::debug!("Fetching CSRF token from {}", self.base_url);
        let html = self
            .client
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let csrf_token = extract_csrf_token(&html)
            .ok_or_else(|| ImgboxError::Protocol("Could not find CSRF token".to_string()))?;

        let form = [
            ("gallery", "true".to_string()),
            (
                "gallery_title",
                self.options.title.clone().unwrap_or_default(),
            ),
            ("comments_enabled", flag(self.options.comments_enabled)),
        ];

        tracing::debug!("Requesting upload token");
        let tokens: TokenResponse = self
            .client
            .post(format!("{}/ajax/token/generate", self.base_url))
            .header("X-CSRF-Token", &csrf_token)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let token_id = tokens.token_id.to_string();
        let gallery_id = tokens.gallery_id.to_string();
        Ok(UploadSession {
            url: format!("{}/g/{}", self.base_url, gallery_id),
            edit_url: format!(
                "{}/upload/edit/{}/{}",
                self.base_url, token_id, tokens.token_secret
            ),
            csrf_token,
            token_id,
            token_secret: tokens.token_secret,
            gallery_id,
            gallery_secret: tokens.gallery_secret,
        })
    }

    async fn upload(&mut self, path: &str) -> Submission {
        let session = match self.ensure_session().await {
            Ok(session) => session.clone(),
            Err(e) => return Submission::failed(path, e.to_string()),
        };

        match self.send_file(&session, path).await {
            Ok(urls) => {
                tracing::debug!("Uploaded {} to {}", path, urls.image_url);
                Submission::uploaded(path, urls)
            }
            Err(e) => {
                tracing::debug!("Failed to upload {}: {}", path, e);
                Submission::failed(path, e.to_string())
            }
        }
    }

    async fn send_file(&self, session: &UploadSession, path: &str) -> Result<ImageUrls, ImgboxError> {
        check_file(path).map_err(|problem| ImgboxError::Input(problem.to_string()))?;
        let mime = mime_type(path)
            .ok_or_else(|| ImgboxError::Input("Unsupported file type".to_string()))?;

        let data = tokio::fs::read(path).await?;
        let filename = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());
        let part = Part::bytes(data).file_name(filename).mime_str(mime)?;

        let form = Form::new()
            .text("token_id", session.token_id.clone())
            .text("token_secret", session.token_secret.clone())
            .text("content_type", flag(self.options.adult))
            .text(
                "thumbnail_size",
                thumbnail_size(self.options.thumb_width, self.options.square_thumbs),
            )
            .text("gallery_id", session.gallery_id.clone())
            .text("gallery_secret", session.gallery_secret.clone())
            .text("comments_enabled", flag(self.options.comments_enabled))
            .part("files[]", part);

        let response: UploadResponse = self
            .client
            .post(format!("{}/upload/process", self.base_url))
            .header("X-CSRF-Token", &session.csrf_token)
            .header("X-Requested-With", "XMLHttpRequest")
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let file = response
            .files
            .into_iter()
            .next()
            .ok_or_else(|| ImgboxError::Protocol("No file in upload response".to_string()))?;

        Ok(ImageUrls {
            image_url: file.original_url,
            thumbnail_url: file.thumbnail_url,
            web_url: file.url,
            gallery_url: session.url.clone(),
            edit_url: session.edit_url.clone(),
        })
    }
}

#[async_trait]
impl Gallery for ImgboxGallery {
    async fn create(&mut self) -> Result<(), ImgboxError> {
        self.ensure_session().await.map(|_| ())
    }

    fn url(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.url.as_str())
    }

    fn edit_url(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.edit_url.as_str())
    }

    fn add<'a>(&'a mut self, paths: &'a [String]) -> BoxStream<'a, Submission> {
        stream::unfold((self, paths.iter()), |(gallery, mut remaining)| async move {
            let path = remaining.next()?;
            let submission = gallery.upload(path).await;
            Some((submission, (gallery, remaining)))
        })
        .boxed()
    }

    async fn close(&mut self) -> Result<(), ImgboxError> {
        if let Some(session) = self.session.take() {
            tracing::debug!("Closing gallery session {}", session.url);
        }
        Ok(())
    }
}

fn flag(value: bool) -> String {
    let flag = if value { "1" } else { "0" };
    flag.to_string()
}

fn extract_csrf_token(html: &str) -> Option<String> {
    let re = Regex::new(r#"<meta\s+(?:name="csrf-token"\s+content="([^"]+)"|content="([^"]+)"\s+name="csrf-token")"#)
        .ok()?;
    let caps = re.captures(html)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Snap to the closest width the host offers
fn nearest_thumbnail_width(width: u32) -> u32 {
    THUMBNAIL_WIDTHS
        .iter()
        .copied()
        .min_by_key(|w| w.abs_diff(width))
        .unwrap_or(width)
}

/// `c` crops to a square, `r` keeps the aspect ratio
fn thumbnail_size(width: u32, square: bool) -> String {
    let mode = if square { 'c' } else { 'r' };
    format!("{}{}", nearest_thumbnail_width(width), mode)
}

fn mime_type(path: &str) -> Option<&'static str> {
    let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
    SUPPORTED_IMAGE_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}
