//! The document renderer: a pure function from (validated CV record,
//! optional photo image) to a paginated PDF byte stream.
//!
//! Pipeline: crop the photo to a circular avatar → build the story from the
//! template → paginate through the flow engine → serialize with the PDF
//! writer. No side effects, no file I/O — callers decide what to do with
//! the bytes.

pub mod flow;
pub mod geometry;
pub mod metrics;
pub mod pdf;
pub mod photo;
pub mod style;
pub mod template;

use anyhow::Result;
use image::DynamicImage;

use crate::models::cv::CvRecord;

pub use geometry::{default_page_geometry, PageGeometry};

/// Renders a validated record to PDF bytes. Deterministic: identical record
/// and photo produce byte-identical output.
pub fn render_cv(
    record: &CvRecord,
    photo: Option<&DynamicImage>,
    geom: &PageGeometry,
) -> Result<Vec<u8>> {
    let avatar = photo.map(|img| photo::crop_to_circle(img, geom.photo_resolution));
    let story = template::build_story(record, avatar.is_some());
    let pages = flow::Composer::new(geom).paginate(&story);
    pdf::write_document(&pages, avatar.as_ref(), record, geom)
}
