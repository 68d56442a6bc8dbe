/// Constants module to avoid magic numbers in the codebase

// Program identity
pub const COMMAND_NAME: &str = "imgbox";
pub const BUGTRACKER_URL: &str = "https://github.com/plotski/imgbox-cli/issues";

// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_UNEXPECTED: i32 = 100;

// Network Configuration
pub const DEFAULT_IMGBOX_URL: &str = "https://imgbox.com";

// Timeouts
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 300; // Large uploads on slow links

// Upload limits
pub const MAX_FILE_SIZE: u64 = 10 * 1_048_576;
pub const DEFAULT_THUMB_WIDTH: u32 = 100;

// Thumbnail widths offered by the host
pub const THUMBNAIL_WIDTHS: &[u32] = &[100, 150, 200, 250, 300, 350, 500, 800];

// Accepted image types (extension, MIME type)
pub const SUPPORTED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
];
