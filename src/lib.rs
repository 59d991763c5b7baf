//! pixlift - upload client and responsive gallery for an image asset server
//!
//! A browser (wasm) client that uploads a single image with transfer
//! progress, caches the server's metadata record in localStorage, and
//! renders a gallery of `<img>` elements with responsive source sets built
//! from that metadata. The core (data model, cache, status machine, markup
//! rendering) is target-independent; browser glue lives behind the wasm
//! gate.

mod constants;
mod error;
mod gallery;
mod model;
mod status;
mod store;

pub use constants::{
    DEFAULT_NATIVE_WIDTH, FILE_INPUT_ELEMENT_ID, GALLERY_ELEMENT_ID, SIZES_HINT,
    STATUS_ELEMENT_ID, STATUS_RESET_DELAY_MS, STORAGE_KEY, UPLOAD_ENDPOINT,
};
pub use error::{StoreError, UploadError};
pub use gallery::{native_width, original_url, render, srcset};
pub use model::{ImageVariant, UploadedImage, decode_upload_response};
pub use status::{StatusLine, UploadSlot, UploadStatus};
pub use store::{GalleryStore, MemoryBackend, StorageBackend};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::start;
