//! Minimal PDF 1.4 writer: A4 pages, filled shapes, lines and text in the
//! two standard Helvetica faces.
//!
//! Callers position everything in millimetres from the top-left corner of the
//! page. The canvas converts to PDF user space (points, origin bottom-left).

use super::fonts::{self, Font};
use super::ReportError;
use std::fmt::Write as _;
use std::io::Write as _;

pub(crate) const PAGE_WIDTH_MM: f64 = 210.0;
pub(crate) const PAGE_HEIGHT_MM: f64 = 297.0;

const PT_PER_MM: f64 = 72.0 / 25.4;
// cubic bezier control distance for a quarter circle
const KAPPA: f64 = 0.552_284_75;

pub(crate) fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}

pub(crate) fn pt_to_mm(pt: f64) -> f64 {
    pt / PT_PER_MM
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub(crate) const WHITE: Self = Self(255, 255, 255);
    pub(crate) const BLACK: Self = Self(0, 0, 0);

    pub(crate) const fn gray(level: u8) -> Self {
        Self(level, level, level)
    }

    fn components(self) -> (f64, f64, f64) {
        (
            f64::from(self.0) / 255.0,
            f64::from(self.1) / 255.0,
            f64::from(self.2) / 255.0,
        )
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self(r, g, b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle {
    pub font: Font,
    pub size: f64,
    pub color: Rgb,
}

impl TextStyle {
    pub(crate) const fn new(font: Font, size: f64, color: Rgb) -> Self {
        Self { font, size, color }
    }

    /// Baseline-to-baseline distance in millimetres.
    pub(crate) fn line_height_mm(&self) -> f64 {
        pt_to_mm(self.size * 1.15)
    }

    pub(crate) fn width_mm(&self, text: &str) -> f64 {
        pt_to_mm(fonts::text_width_pt(text, self.font, self.size))
    }

    pub(crate) fn wrap(&self, text: &str, max_width_mm: f64) -> Vec<String> {
        fonts::wrap(text, self.font, self.size, mm_to_pt(max_width_mm))
    }
}

/// Document metadata written to the trailer's `/Info` dictionary.
#[derive(Debug, Clone)]
pub(crate) struct DocumentInfo {
    pub title: String,
    pub author: String,
    /// `D:YYYYMMDD` style date.
    pub creation_date: String,
}

#[derive(Debug, Default)]
pub(crate) struct Canvas {
    pages: Vec<String>,
}

impl Canvas {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_page(&mut self) {
        self.pages.push(String::new());
    }

    pub(crate) fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current(&mut self) -> Result<&mut String, ReportError> {
        self.pages.last_mut().ok_or(ReportError::NoPage)
    }

    pub(crate) fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
    ) -> Result<(), ReportError> {
        let (r, g, b) = color.components();
        let page = self.current()?;
        writeln!(
            page,
            "{r:.3} {g:.3} {b:.3} rg {:.2} {:.2} {:.2} {:.2} re f",
            mm_to_pt(x),
            mm_to_pt(PAGE_HEIGHT_MM - y - height),
            mm_to_pt(width),
            mm_to_pt(height)
        )?;
        Ok(())
    }

    pub(crate) fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        color: Rgb,
    ) -> Result<(), ReportError> {
        let radius = radius.clamp(0.0, width.min(height) / 2.0);
        if radius == 0.0 {
            return self.fill_rect(x, y, width, height, color);
        }

        let left = mm_to_pt(x);
        let right = mm_to_pt(x + width);
        let top = mm_to_pt(PAGE_HEIGHT_MM - y);
        let bottom = mm_to_pt(PAGE_HEIGHT_MM - y - height);
        let r = mm_to_pt(radius);
        let c = r * KAPPA;
        let (red, green, blue) = color.components();

        let page = self.current()?;
        writeln!(page, "{red:.3} {green:.3} {blue:.3} rg")?;
        writeln!(page, "{:.2} {:.2} m", left + r, bottom)?;
        writeln!(page, "{:.2} {:.2} l", right - r, bottom)?;
        writeln!(
            page,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            right - r + c,
            bottom,
            right,
            bottom + r - c,
            right,
            bottom + r
        )?;
        writeln!(page, "{:.2} {:.2} l", right, top - r)?;
        writeln!(
            page,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            right,
            top - r + c,
            right - r + c,
            top,
            right - r,
            top
        )?;
        writeln!(page, "{:.2} {:.2} l", left + r, top)?;
        writeln!(
            page,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            left + r - c,
            top,
            left,
            top - r + c,
            left,
            top - r
        )?;
        writeln!(page, "{:.2} {:.2} l", left, bottom + r)?;
        writeln!(
            page,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            left,
            bottom + r - c,
            left + r - c,
            bottom,
            left + r,
            bottom
        )?;
        writeln!(page, "f")?;
        Ok(())
    }

    pub(crate) fn stroke_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
        line_width: f64,
    ) -> Result<(), ReportError> {
        let (r, g, b) = color.components();
        let page = self.current()?;
        writeln!(
            page,
            "{r:.3} {g:.3} {b:.3} RG {:.2} w {:.2} {:.2} {:.2} {:.2} re S",
            mm_to_pt(line_width),
            mm_to_pt(x),
            mm_to_pt(PAGE_HEIGHT_MM - y - height),
            mm_to_pt(width),
            mm_to_pt(height)
        )?;
        Ok(())
    }

    pub(crate) fn line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        color: Rgb,
        line_width: f64,
    ) -> Result<(), ReportError> {
        let (r, g, b) = color.components();
        let page = self.current()?;
        writeln!(
            page,
            "{r:.3} {g:.3} {b:.3} RG {:.2} w {:.2} {:.2} m {:.2} {:.2} l S",
            mm_to_pt(line_width),
            mm_to_pt(from.0),
            mm_to_pt(PAGE_HEIGHT_MM - from.1),
            mm_to_pt(to.0),
            mm_to_pt(PAGE_HEIGHT_MM - to.1)
        )?;
        Ok(())
    }

    /// Draws `text` with its baseline at `y`. With [`Align::Right`], `x` is
    /// the right edge of the text.
    pub(crate) fn text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        style: TextStyle,
        align: Align,
    ) -> Result<(), ReportError> {
        let x = match align {
            Align::Left => x,
            Align::Right => x - style.width_mm(text),
        };
        let (r, g, b) = style.color.components();
        let page = self.current()?;
        writeln!(
            page,
            "BT {r:.3} {g:.3} {b:.3} rg /{} {:.1} Tf {:.2} {:.2} Td {} Tj ET",
            style.font.resource(),
            style.size,
            mm_to_pt(x),
            mm_to_pt(PAGE_HEIGHT_MM - y),
            fonts::literal(text)
        )?;
        Ok(())
    }

    /// Serializes the document. Object layout: catalog, page tree, the two
    /// fonts, info, then a page and content stream pair per page.
    pub(crate) fn finish(self, info: &DocumentInfo) -> Result<Vec<u8>, ReportError> {
        if self.pages.is_empty() {
            return Err(ReportError::NoPage);
        }

        const FIRST_PAGE_OBJECT: usize = 6;
        let page_ids: Vec<usize> = (0..self.pages.len())
            .map(|index| FIRST_PAGE_OBJECT + index * 2)
            .collect();

        let mut objects: Vec<String> = Vec::with_capacity(5 + self.pages.len() * 2);
        objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());

        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        objects.push(format!(
            "<< /Type /Pages /Kids [{kids}] /Count {} >>",
            self.pages.len()
        ));

        for font in [Font::Regular, Font::Bold] {
            objects.push(format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.base_font()
            ));
        }

        objects.push(format!(
            "<< /Title {} /Author {} /Producer (sam-health) /CreationDate {} >>",
            fonts::literal(&info.title),
            fonts::literal(&info.author),
            fonts::literal(&info.creation_date)
        ));

        for (page_id, content) in page_ids.iter().zip(&self.pages) {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                mm_to_pt(PAGE_WIDTH_MM),
                mm_to_pt(PAGE_HEIGHT_MM),
                page_id + 1
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{content}endstream",
                content.len()
            ));
        }

        let mut out: Vec<u8> = Vec::new();
        out.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")?;

        let mut offsets = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            write!(out, "{} 0 obj\n{body}\nendobj\n", index + 1)?;
        }

        let xref_offset = out.len();
        write!(out, "xref\n0 {}\n", objects.len() + 1)?;
        out.write_all(b"0000000000 65535 f \n")?;
        for offset in offsets {
            write!(out, "{offset:010} 00000 n \n")?;
        }
        write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )?;

        Ok(out)
    }
}
