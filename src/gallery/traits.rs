use async_trait::async_trait;
use futures::stream::BoxStream;

use super::types::Submission;
use crate::utils::ImgboxError;

/// Remote collection of uploaded images
///
/// Implementations own whatever session state the host needs. The
/// orchestrator calls `close` exactly once when it is done with the gallery.
#[async_trait]
pub trait Gallery: Send {
    /// Create the gallery on the host; does nothing if it already exists
    async fn create(&mut self) -> Result<(), ImgboxError>;

    /// Public viewing URL, known once the gallery was created
    fn url(&self) -> Option<&str>;

    /// Private editing URL, known once the gallery was created
    fn edit_url(&self) -> Option<&str>;

    /// Upload `paths` one by one
    ///
    /// Yields exactly one `Submission` per path, in the order of `paths`.
    /// Creates the gallery first if that hasn't happened yet. Failures are
    /// reported as failed submissions and don't end the stream.
    fn add<'a>(&'a mut self, paths: &'a [String]) -> BoxStream<'a, Submission>;

    /// Release the session
    async fn close(&mut self) -> Result<(), ImgboxError>;
}
