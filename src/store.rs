//! Persistent gallery cache.
//!
//! The cache is an ordered, append-only sequence of [`UploadedImage`]
//! records mirrored to a key-value backend as one JSON array under a fixed
//! key. The backend is injected so the browser build can use localStorage
//! while tests run against an in-memory double.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::StoreError;
use crate::model::UploadedImage;

/// A key-value backend holding the serialized gallery cache.
///
/// Implementations cover exactly one fixed slot; the store never touches
/// other keys.
pub trait StorageBackend {
    /// Read the serialized cache, or `None` if nothing was persisted yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Overwrite the serialized cache.
    fn write(&self, value: &str) -> Result<(), StoreError>;
}

/// In-memory backend. Clones share the same slot, so a test can keep a
/// handle to inspect what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    value: Rc<RefCell<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with pre-existing persisted content.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Rc::new(RefCell::new(Some(value.to_string()))),
        }
    }

    /// The currently persisted content, if any.
    pub fn persisted(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.borrow().clone())
    }

    fn write(&self, value: &str) -> Result<(), StoreError> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }
}

/// The gallery cache: an in-memory record list plus its persisted mirror.
///
/// Records are appended one per successful upload and never reordered or
/// removed within a session. Each append rewrites the full serialized
/// sequence. Concurrent tabs sharing the same backend key are not
/// coordinated; the last writer wins.
#[derive(Debug)]
pub struct GalleryStore<B: StorageBackend> {
    backend: B,
    images: Vec<UploadedImage>,
}

impl<B: StorageBackend> GalleryStore<B> {
    /// Load the cache from the backend.
    ///
    /// An absent key, an unreadable backend, or persisted JSON that no
    /// longer matches the record shape all degrade to an empty sequence.
    /// There is no schema versioning, so a server-side schema change can
    /// invalidate old entries; that case is logged, not surfaced.
    pub fn load(backend: B) -> Self {
        let images = match backend.read() {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(images) => images,
                Err(e) => {
                    log::warn!("Ignoring malformed gallery cache: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to read gallery cache: {}", e);
                Vec::new()
            }
        };

        Self { backend, images }
    }

    /// Append one record and rewrite the persisted sequence.
    ///
    /// The in-memory list keeps the record even if persistence fails, so
    /// the current session still renders it.
    pub fn append(&mut self, record: UploadedImage) -> Result<(), StoreError> {
        self.images.push(record);
        let json = serde_json::to_string(&self.images)?;
        self.backend.write(&json)
    }

    /// All cached records, oldest upload first.
    pub fn images(&self) -> &[UploadedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageVariant;

    fn sample_record(hash: &str) -> UploadedImage {
        UploadedImage {
            hash: hash.to_string(),
            filename: "pic".to_string(),
            original: ImageVariant {
                width: 500,
                height: 400,
                formats: vec!["webp".to_string()],
            },
            variants: Vec::new(),
        }
    }

    #[test]
    fn test_load_empty_backend() {
        let store = GalleryStore::load(MemoryBackend::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_malformed_json_degrades_to_empty() {
        let store = GalleryStore::load(MemoryBackend::with_value("not json at all"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_degrades_to_empty() {
        // Valid JSON, but not an array of records
        let store = GalleryStore::load(MemoryBackend::with_value(r#"{"hash":"abc"}"#));
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_grows_by_one_and_persists() {
        let backend = MemoryBackend::new();
        let mut store = GalleryStore::load(backend.clone());

        store.append(sample_record("abc")).expect("append");
        assert_eq!(store.len(), 1);
        assert_eq!(store.images()[0], sample_record("abc"));

        // The full sequence was rewritten to the backend
        let persisted = backend.persisted().expect("persisted value");
        let loaded: Vec<UploadedImage> = serde_json::from_str(&persisted).expect("parse");
        assert_eq!(loaded, vec![sample_record("abc")]);
    }

    #[test]
    fn test_append_preserves_order() {
        let backend = MemoryBackend::new();
        let mut store = GalleryStore::load(backend.clone());

        store.append(sample_record("first")).expect("append");
        store.append(sample_record("second")).expect("append");

        assert_eq!(store.images()[0].hash, "first");
        assert_eq!(store.images()[1].hash, "second");
    }

    #[test]
    fn test_successful_response_appends_verbatim() {
        let body = r#"{"hash":"abc","filename":"pic","original":{"width":500,"formats":["webp"]},"variants":[]}"#;
        let record = crate::model::decode_upload_response(body).expect("decode");
        let expected = record.clone();

        let mut store = GalleryStore::load(MemoryBackend::new());
        store.append(record).expect("append");

        assert_eq!(store.len(), 1);
        assert_eq!(*store.images().last().expect("last"), expected);
    }

    #[test]
    fn test_reload_roundtrip() {
        let backend = MemoryBackend::new();
        let mut store = GalleryStore::load(backend.clone());
        store.append(sample_record("abc")).expect("append");
        drop(store);

        let reloaded = GalleryStore::load(backend);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.images()[0].hash, "abc");
    }
}
