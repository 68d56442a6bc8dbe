pub mod app;
pub mod cli;
pub mod constants;
pub mod gallery;
pub mod input;
pub mod output;
pub mod runtime;
pub mod utils;
pub mod validate;

pub use app::{load_config, Config};
pub use gallery::{Gallery, GalleryOptions, ImgboxGallery, Submission};
pub use utils::ImgboxError;
