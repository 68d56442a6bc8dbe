// Gateway module for gallery - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod imgbox;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod fake;

// Public re-exports - the ONLY way to access gallery functionality
pub use imgbox::ImgboxGallery;
pub use traits::Gallery;
pub use types::{GalleryOptions, ImageUrls, Outcome, Submission};
