//! Flow-layout engine: flowables in, per-page draw commands out.
//!
//! The template builds a story (a flat list of [`Flowable`]s) and hands it to
//! [`Composer::paginate`]. Pagination is automatic — a paragraph that does
//! not fit splits at a line boundary and continues on the next page, a
//! keep-together group moves to a fresh page when it fits there, and the
//! template never does page-break arithmetic itself.
//!
//! Coordinates in [`DrawCmd`] are measured from the top-left of the page in
//! points; the PDF writer flips them into PDF device space.

use crate::render::geometry::PageGeometry;
use crate::render::metrics::{metrics, Face};
use crate::render::style::{Align, Rgb, TextStyle};

// ────────────────────────────────────────────────────────────────────────────
// Flowables
// ────────────────────────────────────────────────────────────────────────────

/// A run of text with one face and color inside a paragraph.
#[derive(Debug, Clone)]
pub struct Span {
    pub text: String,
    pub face: Face,
    pub color: Rgb,
}

/// A word-wrapped block of styled spans.
#[derive(Debug, Clone)]
pub struct Paragraph {
    pub spans: Vec<Span>,
    pub style: TextStyle,
}

impl Paragraph {
    /// Single-span paragraph in the style's own face and color.
    pub fn plain(text: impl Into<String>, style: TextStyle) -> Paragraph {
        Paragraph {
            spans: vec![Span {
                text: text.into(),
                face: style.face,
                color: style.color,
            }],
            style,
        }
    }

    pub fn from_spans(spans: Vec<Span>, style: TextStyle) -> Paragraph {
        Paragraph { spans, style }
    }
}

/// Full-width horizontal rule.
#[derive(Debug, Clone)]
pub struct HorizontalRule {
    pub thickness: f32,
    pub color: Rgb,
    pub space_before: f32,
    pub space_after: f32,
}

/// One row of side-by-side cells. Cell widths are fractions of the content
/// width; the row's height is its tallest cell. Rows never split.
#[derive(Debug, Clone)]
pub struct Columns {
    pub cells: Vec<(f32, Paragraph)>,
    pub space_after: f32,
}

/// The header band: background fill, optional circular photo on the left,
/// text block centered in the remaining width. Never splits.
#[derive(Debug, Clone)]
pub struct Banner {
    pub photo: bool,
    pub text: Vec<Paragraph>,
    pub background: Rgb,
    pub pad_v: f32,
    pub pad_h: f32,
    pub photo_pad_left: f32,
    pub photo_gap: f32,
}

#[derive(Debug, Clone)]
pub enum Flowable {
    Paragraph(Paragraph),
    Spacer(f32),
    Rule(HorizontalRule),
    Columns(Columns),
    /// Moves as one block to the next page when it would otherwise straddle
    /// a break and fits on a page by itself; taller groups flow normally.
    KeepTogether(Vec<Flowable>),
    Banner(Banner),
}

// ────────────────────────────────────────────────────────────────────────────
// Draw commands
// ────────────────────────────────────────────────────────────────────────────

/// Resolved drawing primitives for one page. `y` runs downward from the
/// page top; text `y` is the baseline, rect/photo `y` is the top edge.
#[derive(Debug, Clone)]
pub enum DrawCmd {
    Text {
        x: f32,
        y: f32,
        size: f32,
        face: Face,
        color: Rgb,
        text: String,
    },
    Line {
        x1: f32,
        x2: f32,
        y: f32,
        width: f32,
        color: Rgb,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgb,
    },
    /// The circular photo, drawn in a square region.
    Photo { x: f32, y: f32, size: f32 },
}

// ────────────────────────────────────────────────────────────────────────────
// Word wrap
// ────────────────────────────────────────────────────────────────────────────

/// A positioned run inside a wrapped line. `x` is the offset from the line
/// start; consecutive words sharing face and color merge into one run.
#[derive(Debug, Clone)]
pub(crate) struct Run {
    pub x: f32,
    pub text: String,
    pub face: Face,
    pub color: Rgb,
}

#[derive(Debug, Clone)]
pub(crate) struct WrappedLine {
    pub runs: Vec<Run>,
    pub width: f32,
}

/// Greedy word-wrap over a span list. A single word wider than `max_width`
/// is placed on its own line rather than broken mid-word.
pub(crate) fn wrap_spans(spans: &[Span], size: f32, max_width: f32) -> Vec<WrappedLine> {
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut cur = WrappedLine {
        runs: Vec::new(),
        width: 0.0,
    };

    for span in spans {
        let m = metrics(span.face);
        for word in span.text.split_whitespace() {
            let word_w = m.text_width(word, size);
            let space_w = if cur.runs.is_empty() {
                0.0
            } else {
                m.space_width * size
            };

            if !cur.runs.is_empty() && cur.width + space_w + word_w > max_width {
                lines.push(std::mem::replace(
                    &mut cur,
                    WrappedLine {
                        runs: Vec::new(),
                        width: 0.0,
                    },
                ));
                cur.runs.push(Run {
                    x: 0.0,
                    text: word.to_string(),
                    face: span.face,
                    color: span.color,
                });
                cur.width = word_w;
            } else {
                match cur.runs.last_mut() {
                    Some(last) if last.face == span.face && last.color == span.color => {
                        last.text.push(' ');
                        last.text.push_str(word);
                    }
                    _ => cur.runs.push(Run {
                        x: cur.width + space_w,
                        text: word.to_string(),
                        face: span.face,
                        color: span.color,
                    }),
                }
                cur.width += space_w + word_w;
            }
        }
    }

    if !cur.runs.is_empty() {
        lines.push(cur);
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Composer
// ────────────────────────────────────────────────────────────────────────────

pub struct Composer<'a> {
    geom: &'a PageGeometry,
}

impl<'a> Composer<'a> {
    pub fn new(geom: &'a PageGeometry) -> Self {
        Composer { geom }
    }

    /// Lays the story out into pages of draw commands. Always produces at
    /// least one page.
    pub fn paginate(&self, story: &[Flowable]) -> Vec<Vec<DrawCmd>> {
        let mut pages: Vec<Vec<DrawCmd>> = Vec::new();
        let mut page: Vec<DrawCmd> = Vec::new();
        let mut cursor = self.geom.margin_top;

        for flowable in story {
            self.place(flowable, &mut pages, &mut page, &mut cursor);
        }

        pages.push(page);
        pages
    }

    fn break_page(&self, pages: &mut Vec<Vec<DrawCmd>>, page: &mut Vec<DrawCmd>, cursor: &mut f32) {
        pages.push(std::mem::take(page));
        *cursor = self.geom.margin_top;
    }

    fn place(
        &self,
        flowable: &Flowable,
        pages: &mut Vec<Vec<DrawCmd>>,
        page: &mut Vec<DrawCmd>,
        cursor: &mut f32,
    ) {
        match flowable {
            Flowable::Spacer(h) => {
                // An overflowing spacer is dropped at the break, not carried.
                if *cursor + h > self.geom.bottom_limit() {
                    self.break_page(pages, page, cursor);
                } else {
                    *cursor += h;
                }
            }
            Flowable::Rule(rule) => {
                let h = rule.space_before + rule.thickness + rule.space_after;
                if *cursor + h > self.geom.bottom_limit() && !page.is_empty() {
                    self.break_page(pages, page, cursor);
                }
                page.push(DrawCmd::Line {
                    x1: self.geom.margin_left,
                    x2: self.geom.margin_left + self.geom.content_width(),
                    y: *cursor + rule.space_before + rule.thickness / 2.0,
                    width: rule.thickness,
                    color: rule.color,
                });
                *cursor += h;
            }
            Flowable::Paragraph(para) => self.place_paragraph(para, pages, page, cursor),
            Flowable::Columns(cols) => self.place_columns(cols, pages, page, cursor),
            Flowable::KeepTogether(children) => {
                let h: f32 = children.iter().map(|f| self.measure(f)).sum();
                let fits_here = *cursor + h <= self.geom.bottom_limit();
                if !fits_here && h <= self.geom.content_height() && !page.is_empty() {
                    self.break_page(pages, page, cursor);
                }
                // Either it fits now, or it is taller than a page and the
                // children flow (and split) individually.
                for child in children {
                    self.place(child, pages, page, cursor);
                }
            }
            Flowable::Banner(banner) => self.place_banner(banner, pages, page, cursor),
        }
    }

    /// Total height a flowable wants at the current content width. Used for
    /// keep-together decisions only; placement recomputes exact positions.
    fn measure(&self, flowable: &Flowable) -> f32 {
        match flowable {
            Flowable::Spacer(h) => *h,
            Flowable::Rule(r) => r.space_before + r.thickness + r.space_after,
            Flowable::Paragraph(p) => self.paragraph_height(p, self.geom.content_width()),
            Flowable::Columns(c) => self.columns_height(c),
            Flowable::KeepTogether(children) => children.iter().map(|f| self.measure(f)).sum(),
            Flowable::Banner(b) => self.banner_height(b),
        }
    }

    fn paragraph_height(&self, para: &Paragraph, avail_w: f32) -> f32 {
        let lines = wrap_spans(
            &para.spans,
            para.style.size,
            avail_w - para.style.left_indent,
        );
        if lines.is_empty() {
            return 0.0;
        }
        para.style.space_before + lines.len() as f32 * para.style.leading + para.style.space_after
    }

    fn columns_height(&self, cols: &Columns) -> f32 {
        let row_h = cols
            .cells
            .iter()
            .map(|(frac, para)| self.paragraph_height(para, frac * self.geom.content_width()))
            .fold(0.0_f32, f32::max);
        row_h + cols.space_after
    }

    fn banner_height(&self, banner: &Banner) -> f32 {
        let text_w = self.banner_text_width(banner);
        let text_h: f32 = banner
            .text
            .iter()
            .map(|p| self.paragraph_height(p, text_w))
            .sum();
        let content_h = if banner.photo {
            text_h.max(self.geom.photo_size)
        } else {
            text_h
        };
        content_h + 2.0 * banner.pad_v
    }

    fn banner_text_width(&self, banner: &Banner) -> f32 {
        let inner_w = self.geom.content_width() - 2.0 * banner.pad_h;
        if banner.photo {
            inner_w - (banner.photo_pad_left + self.geom.photo_size + banner.photo_gap)
        } else {
            inner_w
        }
    }

    // ── Paragraph placement (splits at line boundaries) ─────────────────────

    fn place_paragraph(
        &self,
        para: &Paragraph,
        pages: &mut Vec<Vec<DrawCmd>>,
        page: &mut Vec<DrawCmd>,
        cursor: &mut f32,
    ) {
        let style = &para.style;
        let x_left = self.geom.margin_left + style.left_indent;
        let avail = self.geom.content_width() - style.left_indent;
        let lines = wrap_spans(&para.spans, style.size, avail);
        if lines.is_empty() {
            return;
        }

        let mut y = *cursor + style.space_before;
        let mut idx = 0;
        while idx < lines.len() {
            let room = self.geom.bottom_limit() - y;
            let mut fit = (room / style.leading).floor() as usize;
            if fit == 0 {
                if page.is_empty() {
                    // Page shorter than one line: draw anyway, never loop.
                    fit = 1;
                } else {
                    self.break_page(pages, page, cursor);
                    y = self.geom.margin_top;
                    continue;
                }
            }
            let take = fit.min(lines.len() - idx);
            for line in &lines[idx..idx + take] {
                self.draw_line(line, style, x_left, avail, y, page);
                y += style.leading;
            }
            idx += take;
            if idx < lines.len() {
                self.break_page(pages, page, cursor);
                y = self.geom.margin_top;
            }
        }
        *cursor = y + style.space_after;
    }

    fn draw_line(
        &self,
        line: &WrappedLine,
        style: &TextStyle,
        x_left: f32,
        avail: f32,
        y_top: f32,
        page: &mut Vec<DrawCmd>,
    ) {
        let x = match style.align {
            Align::Left => x_left,
            Align::Center => x_left + ((avail - line.width) / 2.0).max(0.0),
            Align::Right => x_left + (avail - line.width).max(0.0),
        };
        let baseline = y_top + style.size;
        for run in &line.runs {
            page.push(DrawCmd::Text {
                x: x + run.x,
                y: baseline,
                size: style.size,
                face: run.face,
                color: run.color,
                text: run.text.clone(),
            });
        }
    }

    // ── Columns ─────────────────────────────────────────────────────────────

    fn place_columns(
        &self,
        cols: &Columns,
        pages: &mut Vec<Vec<DrawCmd>>,
        page: &mut Vec<DrawCmd>,
        cursor: &mut f32,
    ) {
        let h = self.columns_height(cols);
        if *cursor + h > self.geom.bottom_limit() && !page.is_empty() {
            self.break_page(pages, page, cursor);
        }

        let mut x = self.geom.margin_left;
        for (frac, para) in &cols.cells {
            let cell_w = frac * self.geom.content_width();
            let style = &para.style;
            let x_left = x + style.left_indent;
            let avail = cell_w - style.left_indent;
            let mut y = *cursor + style.space_before;
            for line in wrap_spans(&para.spans, style.size, avail) {
                self.draw_line(&line, style, x_left, avail, y, page);
                y += style.leading;
            }
            x += cell_w;
        }
        *cursor += h;
    }

    // ── Banner ──────────────────────────────────────────────────────────────

    fn place_banner(
        &self,
        banner: &Banner,
        pages: &mut Vec<Vec<DrawCmd>>,
        page: &mut Vec<DrawCmd>,
        cursor: &mut f32,
    ) {
        let h = self.banner_height(banner);
        if *cursor + h > self.geom.bottom_limit() && !page.is_empty() {
            self.break_page(pages, page, cursor);
        }

        page.push(DrawCmd::Rect {
            x: self.geom.margin_left,
            y: *cursor,
            w: self.geom.content_width(),
            h,
            color: banner.background,
        });

        let content_h = h - 2.0 * banner.pad_v;
        let mut text_x = self.geom.margin_left + banner.pad_h;
        if banner.photo {
            let photo_y = *cursor + banner.pad_v + (content_h - self.geom.photo_size) / 2.0;
            page.push(DrawCmd::Photo {
                x: text_x + banner.photo_pad_left,
                y: photo_y,
                size: self.geom.photo_size,
            });
            text_x += banner.photo_pad_left + self.geom.photo_size + banner.photo_gap;
        }

        let text_w = self.banner_text_width(banner);
        let text_h: f32 = banner
            .text
            .iter()
            .map(|p| self.paragraph_height(p, text_w))
            .sum();

        // Photo and text block are vertically centered against each other.
        let mut y = *cursor + banner.pad_v + (content_h - text_h).max(0.0) / 2.0;
        for para in &banner.text {
            let style = &para.style;
            let x_left = text_x + style.left_indent;
            let avail = text_w - style.left_indent;
            let lines = wrap_spans(&para.spans, style.size, avail);
            if lines.is_empty() {
                continue;
            }
            y += style.space_before;
            for line in &lines {
                self.draw_line(line, style, x_left, avail, y, page);
                y += style.leading;
            }
            y += style.space_after;
        }

        *cursor += h;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
