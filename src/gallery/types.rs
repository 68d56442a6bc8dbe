use serde::{Serialize, Serializer};
use std::path::Path;

/// Options the gallery is created with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryOptions {
    pub title: Option<String>,
    pub adult: bool,
    pub thumb_width: u32,
    pub square_thumbs: bool,
    pub comments_enabled: bool,
}

/// URLs of one successfully uploaded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    pub image_url: String,
    pub thumbnail_url: String,
    pub web_url: String,
    pub gallery_url: String,
    pub edit_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Uploaded(ImageUrls),
    Failed { error: String },
}

/// Result of uploading a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    filepath: String,
    filename: String,
    outcome: Outcome,
}

impl Submission {
    pub fn uploaded(filepath: impl Into<String>, urls: ImageUrls) -> Self {
        Self::new(filepath.into(), Outcome::Uploaded(urls))
    }

    pub fn failed(filepath: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(
            filepath.into(),
            Outcome::Failed {
                error: error.into(),
            },
        )
    }

    fn new(filepath: String, outcome: Outcome) -> Self {
        let filename = display_filename(&filepath);
        Self {
            filepath,
            filename,
            outcome,
        }
    }

    pub fn filepath(&self) -> &str {
        &self.filepath
    }

    /// Last component of the file path
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn success(&self) -> bool {
        matches!(self.outcome, Outcome::Uploaded(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed { error } => Some(error.as_str()),
            Outcome::Uploaded(_) => None,
        }
    }

    pub fn urls(&self) -> Option<&ImageUrls> {
        match &self.outcome {
            Outcome::Uploaded(urls) => Some(urls),
            Outcome::Failed { .. } => None,
        }
    }
}

fn display_filename(filepath: &str) -> String {
    Path::new(filepath)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| filepath.to_string())
}

/// Flat record written to the JSON document
#[derive(Serialize)]
struct SubmissionRecord<'a> {
    filename: &'a str,
    filepath: &'a str,
    success: bool,
    error: Option<&'a str>,
    image_url: Option<&'a str>,
    thumbnail_url: Option<&'a str>,
    web_url: Option<&'a str>,
    gallery_url: Option<&'a str>,
    edit_url: Option<&'a str>,
}

impl Serialize for Submission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let urls = self.urls();
        SubmissionRecord {
            filename: &self.filename,
            filepath: &self.filepath,
            success: self.success(),
            error: self.error(),
            image_url: urls.map(|u| u.image_url.as_str()),
            thumbnail_url: urls.map(|u| u.thumbnail_url.as_str()),
            web_url: urls.map(|u| u.web_url.as_str()),
            gallery_url: urls.map(|u| u.gallery_url.as_str()),
            edit_url: urls.map(|u| u.edit_url.as_str()),
        }
        .serialize(serializer)
    }
}
