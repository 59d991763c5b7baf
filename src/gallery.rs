//! Gallery markup rendering.
//!
//! Rendering is a pure function of the cached record sequence: the full
//! markup is rebuilt on every call (no diffing), so rendering the same
//! sequence twice yields identical output. The browser glue assigns the
//! result to the gallery container wholesale.

use crate::constants::{DEFAULT_NATIVE_WIDTH, IMAGES_PATH, SIZES_HINT};
use crate::model::UploadedImage;

/// Placeholder shown when nothing has been uploaded yet.
const EMPTY_GALLERY_HTML: &str = "<p>No images were uploaded yet.</p>";

/// URL of the unmodified upload: `/images/{hash}/{filename}.{format}`.
pub fn original_url(image: &UploadedImage) -> String {
    format!(
        "{}/{}/{}.{}",
        IMAGES_PATH,
        image.hash,
        image.filename,
        image.original.preferred_format()
    )
}

/// Native display width used for layout, falling back to
/// [`DEFAULT_NATIVE_WIDTH`] when the server reported no original width.
pub fn native_width(image: &UploadedImage) -> u32 {
    if image.original.width == 0 {
        DEFAULT_NATIVE_WIDTH
    } else {
        image.original.width
    }
}

/// Responsive source set: one width-annotated candidate URL per variant,
/// in variant order, comma-separated. Empty when there are no variants.
pub fn srcset(image: &UploadedImage) -> String {
    image
        .variants
        .iter()
        .map(|v| {
            format!(
                "{}/{}/{}x{}/{}.{} {}w",
                IMAGES_PATH,
                image.hash,
                v.width,
                v.height,
                image.filename,
                v.preferred_format(),
                v.width
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the full gallery markup from the cached sequence, oldest first.
///
/// The hash, filename and format fields come from the server but pass
/// through persisted JSON, so the URL-bearing attributes are entity-escaped
/// rather than trusted to be quote-free.
pub fn render(images: &[UploadedImage]) -> String {
    if images.is_empty() {
        return EMPTY_GALLERY_HTML.to_string();
    }

    let mut html = String::new();
    for image in images {
        html.push_str(&format!(
            "<img src=\"{}\" style=\"--native-size: {}px\" srcset=\"{}\" sizes=\"{}\">",
            escape_attribute(&original_url(image)),
            native_width(image),
            escape_attribute(&srcset(image)),
            SIZES_HINT
        ));
    }
    html
}

/// Escape a value for interpolation into a double-quoted HTML attribute.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
