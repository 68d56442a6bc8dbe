use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

use super::traits::Gallery;
use super::types::{ImageUrls, Submission};
use crate::utils::ImgboxError;

/// Calls made on a `FakeGallery`, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create,
    Add(Vec<String>),
    Close,
}

/// Scripted gallery for tests
pub struct FakeGallery {
    pub calls: Vec<Call>,
    pub submissions: Vec<Submission>,
    pub create_error: Option<ImgboxError>,
    pub panic_on_add: bool,
    created: bool,
}

impl FakeGallery {
    pub fn new(submissions: Vec<Submission>) -> Self {
        Self {
            calls: Vec::new(),
            submissions,
            create_error: None,
            panic_on_add: false,
            created: false,
        }
    }

    pub fn failing_create(error: ImgboxError) -> Self {
        Self {
            create_error: Some(error),
            ..Self::new(Vec::new())
        }
    }
}

#[async_trait]
impl Gallery for FakeGallery {
    async fn create(&mut self) -> Result<(), ImgboxError> {
        self.calls.push(Call::Create);
        if let Some(error) = self.create_error.take() {
            return Err(error);
        }
        self.created = true;
        Ok(())
    }

    fn url(&self) -> Option<&str> {
        self.created.then_some("<Gallery URL>")
    }

    fn edit_url(&self) -> Option<&str> {
        self.created.then_some("<Edit URL>")
    }

    fn add<'a>(&'a mut self, paths: &'a [String]) -> BoxStream<'a, Submission> {
        if self.panic_on_add {
            panic!("Gallery exploded");
        }
        self.calls.push(Call::Add(paths.to_vec()));
        stream::iter(std::mem::take(&mut self.submissions)).boxed()
    }

    async fn close(&mut self) -> Result<(), ImgboxError> {
        self.calls.push(Call::Close);
        Ok(())
    }
}

pub fn urls(name: &str) -> ImageUrls {
    ImageUrls {
        image_url: format!("img/{}", name),
        thumbnail_url: format!("thumb/{}", name),
        web_url: format!("web/{}", name),
        gallery_url: format!("gallery/{}", name),
        edit_url: format!("edit/{}", name),
    }
}

/// foo and baz succeed, bar fails with "Oops"
pub fn mixed_submissions() -> Vec<Submission> {
    vec![
        Submission::uploaded("path/to/foo.jpg", urls("foo")),
        Submission::failed("path/to/bar.jpg", "Oops"),
        Submission::uploaded("path/to/baz.jpg", urls("baz")),
    ]
}
