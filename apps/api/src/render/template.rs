//! The CV visual template: maps a [`CvRecord`] onto a story of flowables.
//!
//! Layout mirrors the canned design — light header band with optional
//! circular photo, rule-separated sections, accent-colored markers. Empty
//! sections produce no heading at all.

use crate::models::cv::{CvRecord, EducationEntry, ExperienceEntry};
use crate::render::flow::{Banner, Columns, Flowable, HorizontalRule, Paragraph, Span};
use crate::render::geometry::MM;
use crate::render::style::{styles, TextStyle, ACCENT, LIGHT, RULE};

/// Marker prefix for experience bullets (WinAnsi-safe).
pub const BULLET_MARKER: char = '\u{2022}'; // •
/// Marker prefix for the per-job highlight line.
pub const HIGHLIGHT_MARKER: char = '\u{00BB}'; // »

/// Builds the full story for a record. `has_photo` controls the banner
/// layout only — the photo pixels travel to the PDF writer separately.
pub fn build_story(record: &CvRecord, has_photo: bool) -> Vec<Flowable> {
    let mut story = Vec::new();

    story.push(Flowable::Banner(banner(record, has_photo)));
    story.push(Flowable::Spacer(8.0));

    if !record.profile.trim().is_empty() {
        story.extend(section_header("Profile"));
        story.push(Flowable::Paragraph(Paragraph::plain(
            record.profile.trim(),
            styles::about(),
        )));
        story.push(Flowable::Spacer(7.0));
    }

    if !record.experience.is_empty() {
        story.extend(section_header("Experience"));
        for job in &record.experience {
            story.push(job_block(job));
        }
    }

    if !record.skills.is_empty() {
        story.extend(section_header("Technical Skills"));
        for entry in &record.skills {
            story.push(Flowable::Columns(Columns {
                cells: vec![
                    (0.22, Paragraph::plain(&entry.label, styles::skill_label())),
                    (0.78, Paragraph::plain(&entry.value, styles::skill())),
                ],
                space_after: 4.0,
            }));
        }
        story.push(Flowable::Spacer(7.0));
    }

    if !record.education.is_empty() {
        story.extend(section_header("Education"));
        for entry in &record.education {
            story.extend(education_block(entry));
        }
    }

    story
}

// ────────────────────────────────────────────────────────────────────────────
// Building blocks
// ────────────────────────────────────────────────────────────────────────────

fn banner(record: &CvRecord, has_photo: bool) -> Banner {
    let hdr = &record.header;
    let mut text = Vec::new();

    text.push(Paragraph::plain(
        &hdr.name,
        TextStyle {
            space_after: 3.0,
            ..styles::name()
        },
    ));
    text.push(Paragraph::plain(
        &hdr.role,
        TextStyle {
            space_after: 7.0,
            ..styles::role()
        },
    ));
    if !hdr.contact_line1.trim().is_empty() {
        text.push(Paragraph::plain(hdr.contact_line1.trim(), styles::contact()));
    }
    if let Some(line2) = hdr.contact_line2.as_deref() {
        if !line2.trim().is_empty() {
            text.push(Paragraph::plain(line2.trim(), styles::contact()));
        }
    }

    Banner {
        photo: has_photo,
        text,
        background: LIGHT,
        pad_v: 10.0,
        pad_h: 12.0,
        photo_pad_left: 4.0 * MM,
        photo_gap: 4.0 * MM,
    }
}

fn section_header(title: &str) -> Vec<Flowable> {
    vec![
        Flowable::Paragraph(Paragraph::plain(title.to_uppercase(), styles::section())),
        Flowable::Rule(HorizontalRule {
            thickness: 0.5,
            color: RULE,
            space_before: 1.0,
            space_after: 4.0,
        }),
    ]
}

/// One experience entry, kept together across page breaks when possible:
/// company/period row, optional highlight, bullets, trailing gap.
fn job_block(job: &ExperienceEntry) -> Flowable {
    let mut items = Vec::new();

    items.push(Flowable::Columns(Columns {
        cells: vec![
            (0.72, Paragraph::plain(&job.company, styles::company())),
            (0.28, Paragraph::plain(&job.period, styles::date())),
        ],
        space_after: 2.0,
    }));

    // `highlight: None` omits the decoration entirely; an empty string still
    // renders the marker.
    if let Some(highlight) = job.highlight.as_deref() {
        items.push(marker_paragraph(
            HIGHLIGHT_MARKER,
            highlight,
            styles::highlight(),
        ));
    }

    for bullet in &job.bullets {
        items.push(marker_paragraph(BULLET_MARKER, bullet, styles::bullet()));
    }

    items.push(Flowable::Spacer(5.0));
    Flowable::KeepTogether(items)
}

fn education_block(entry: &EducationEntry) -> Vec<Flowable> {
    let style = styles::edu();
    let mut out = vec![Flowable::Paragraph(Paragraph::from_spans(
        vec![
            Span {
                text: entry.degree.clone(),
                face: crate::render::metrics::Face::Bold,
                color: style.color,
            },
            Span {
                text: format!("\u{00B7} {}", entry.institution),
                face: style.face,
                color: style.color,
            },
        ],
        style,
    ))];
    if let Some(detail) = entry.detail.as_deref() {
        out.push(Flowable::Paragraph(Paragraph::plain(
            detail,
            styles::edu_sub(),
        )));
    }
    out
}

fn marker_paragraph(marker: char, text: &str, style: TextStyle) -> Flowable {
    Flowable::Paragraph(Paragraph::from_spans(
        vec![
            Span {
                text: marker.to_string(),
                face: style.face,
                color: ACCENT,
            },
            Span {
                text: text.to_string(),
                face: style.face,
                color: style.color,
            },
        ],
        style,
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
