//! Global constants for the pixlift client

/// Endpoint the raw file bytes are POSTed to
pub const UPLOAD_ENDPOINT: &str = "/api/upload";

/// Path prefix under which the server exposes stored images
pub const IMAGES_PATH: &str = "/images";

/// localStorage key holding the serialized gallery cache
pub const STORAGE_KEY: &str = "pixlift-images";

/// Display width assumed when the server reports no original width
pub const DEFAULT_NATIVE_WIDTH: u32 = 1000;

/// Viewport-relative sizing hint applied to every gallery image
pub const SIZES_HINT: &str = "24vw";

/// Delay before the status line falls back to the idle message
pub const STATUS_RESET_DELAY_MS: i32 = 2000;

/// Divisor for rendering byte counts as megabytes
pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// Element id of the gallery container
pub const GALLERY_ELEMENT_ID: &str = "gallery";

/// Element id of the status text span
pub const STATUS_ELEMENT_ID: &str = "statusSpan";

/// Element id of the file-picker input
pub const FILE_INPUT_ELEMENT_ID: &str = "fileInput";
