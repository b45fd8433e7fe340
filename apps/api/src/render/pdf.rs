//! PDF assembly: per-page draw commands into a `lopdf` document.
//!
//! Uses the base-14 Helvetica faces with WinAnsi encoding (no font files
//! embedded) and embeds the circular photo as a DeviceRGB image XObject
//! whose alpha channel travels in a DeviceGray `SMask`. The output carries
//! no timestamps — identical input produces byte-identical bytes.

use anyhow::{Context, Result};
use image::RgbaImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::models::cv::CvRecord;
use crate::render::flow::DrawCmd;
use crate::render::geometry::PageGeometry;
use crate::render::metrics::Face;
use crate::render::style::Rgb;

const PRODUCER: &str = "cvforge";

fn font_resource(face: Face) -> &'static str {
    match face {
        Face::Regular => "F1",
        Face::Bold => "F2",
        Face::Oblique => "F3",
    }
}

/// Serializes paginated draw commands into PDF bytes.
pub fn write_document(
    pages: &[Vec<DrawCmd>],
    photo: Option<&RgbaImage>,
    record: &CvRecord,
    geom: &PageGeometry,
) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut resources = dictionary! {
        "Font" => dictionary! {
            "F1" => dictionary! {
                "Type" => "Font", "Subtype" => "Type1",
                "BaseFont" => "Helvetica", "Encoding" => "WinAnsiEncoding",
            },
            "F2" => dictionary! {
                "Type" => "Font", "Subtype" => "Type1",
                "BaseFont" => "Helvetica-Bold", "Encoding" => "WinAnsiEncoding",
            },
            "F3" => dictionary! {
                "Type" => "Font", "Subtype" => "Type1",
                "BaseFont" => "Helvetica-Oblique", "Encoding" => "WinAnsiEncoding",
            },
        },
    };
    if let Some(img) = photo {
        let xobject_id = embed_photo(&mut doc, img);
        resources.set("XObject", dictionary! { "Im0" => xobject_id });
    }
    let resources_id = doc.add_object(resources);

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for cmds in pages {
        let content = page_content(cmds, geom);
        let encoded = content.encode().context("failed to encode content stream")?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(), 0.into(),
                geom.page_width.into(), geom.page_height.into(),
            ],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    // No CreationDate on purpose — output stays deterministic.
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(record.document_title()), StringFormat::Literal),
        "Author" => Object::String(encode_win_ansi(&record.header.name), StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Info", info_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).context("failed to serialize PDF")?;
    Ok(out)
}

/// Embeds the circular photo: raw RGB samples plus the alpha channel as a
/// DeviceGray soft mask.
fn embed_photo(doc: &mut Document, img: &RgbaImage) -> ObjectId {
    let (w, h) = img.dimensions();
    let mut rgb = Vec::with_capacity((w * h * 3) as usize);
    let mut alpha = Vec::with_capacity((w * h) as usize);
    for pixel in img.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel.0[3]);
    }

    let smask_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => w as i64,
            "Height" => h as i64,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        },
        alpha,
    ));

    doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => w as i64,
            "Height" => h as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "SMask" => smask_id,
        },
        rgb,
    ))
}

/// Compiles one page of draw commands. Flow coordinates run downward from
/// the page top; PDF device space runs upward from the bottom-left.
fn page_content(cmds: &[DrawCmd], geom: &PageGeometry) -> Content {
    let page_h = geom.page_height;
    let mut ops: Vec<Operation> = Vec::new();

    for cmd in cmds {
        match cmd {
            DrawCmd::Rect { x, y, w, h, color } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("rg", rgb_operands(color)));
                ops.push(Operation::new(
                    "re",
                    vec![(*x).into(), (page_h - y - h).into(), (*w).into(), (*h).into()],
                ));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawCmd::Line {
                x1,
                x2,
                y,
                width,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("RG", rgb_operands(color)));
                ops.push(Operation::new("m", vec![(*x1).into(), (page_h - y).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), (page_h - y).into()]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawCmd::Text {
                x,
                y,
                size,
                face,
                color,
                text,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![font_resource(*face).into(), (*size).into()],
                ));
                ops.push(Operation::new("rg", rgb_operands(color)));
                ops.push(Operation::new("Td", vec![(*x).into(), (page_h - y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawCmd::Photo { x, y, size } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        (*size).into(),
                        0.into(),
                        0.into(),
                        (*size).into(),
                        (*x).into(),
                        (page_h - y - size).into(),
                    ],
                ));
                ops.push(Operation::new("Do", vec!["Im0".into()]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }

    Content { operations: ops }
}

fn rgb_operands(c: &Rgb) -> Vec<Object> {
    vec![c.r.into(), c.g.into(), c.b.into()]
}

/// Maps text to WinAnsi bytes. ASCII and Latin-1 pass through; the CP1252
/// punctuation block is mapped explicitly; anything else degrades to `?`.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            match c {
                _ if (0x20..=0x7E).contains(&code) || (0xA0..=0xFF).contains(&code) => code as u8,
                '\u{20AC}' => 0x80, // €
                '\u{2026}' => 0x85, // …
                '\u{2020}' => 0x86, // †
                '\u{2021}' => 0x87, // ‡
                '\u{2018}' => 0x91, // '
                '\u{2019}' => 0x92, // '
                '\u{201C}' => 0x93, // "
                '\u{201D}' => 0x94, // "
                '\u{2022}' => 0x95, // •
                '\u{2013}' => 0x96, // –
                '\u{2014}' => 0x97, // —
                '\u{2122}' => 0x99, // ™
                _ => b'?',
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii_passes_through() {
        assert_eq!(encode_win_ansi("Jane Doe"), b"Jane Doe".to_vec());
    }

    #[test]
    fn test_encode_latin1_passes_through() {
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("\u{00B7}"), vec![0xB7]); // ·
        assert_eq!(encode_win_ansi("\u{00BB}"), vec![0xBB]); // »
    }

    #[test]
    fn test_encode_cp1252_punctuation() {
        assert_eq!(encode_win_ansi("\u{2022}"), vec![0x95]); // •
        assert_eq!(encode_win_ansi("\u{2013}"), vec![0x96]); // –
        assert_eq!(encode_win_ansi("\u{2019}"), vec![0x92]);
    }

    #[test]
    fn test_encode_unmappable_degrades_to_question_mark() {
        assert_eq!(encode_win_ansi("語"), vec![b'?']);
    }

    #[test]
    fn test_parentheses_survive_literal_string_encoding() {
        // lopdf escapes these when writing the literal string.
        assert_eq!(encode_win_ansi("(ok)"), b"(ok)".to_vec());
    }
}
