use super::fonts::Font;
use super::pdf::{Align, Canvas, Rgb, TextStyle, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use super::{ReportBranding, ReportError};
use crate::calculator::HealthCheckResult;
use crate::content::{ContactInfo, NextSteps};
use chrono::NaiveDate;

const MARGIN_LEFT: f64 = 14.0;
const CONTENT_RIGHT: f64 = 196.0;
const CONTENT_WIDTH: f64 = CONTENT_RIGHT - MARGIN_LEFT;
const CONTINUATION_TOP: f64 = 20.0;
const BOTTOM_LIMIT: f64 = PAGE_HEIGHT_MM - 20.0;
const FOOTER_BASELINE: f64 = PAGE_HEIGHT_MM - 10.0;

const HEADER_BACKGROUND: Rgb = Rgb(21, 23, 30);
const BRAND_ORANGE: Rgb = Rgb(247, 152, 0);
const CALL_TO_ACTION: Rgb = Rgb(234, 88, 12);
const TABLE_HEAD: Rgb = Rgb(23, 23, 23);
const TABLE_STRIPE: Rgb = Rgb(249, 250, 251);
const GRID: Rgb = Rgb::gray(200);
const MUTED: Rgb = Rgb::gray(150);

const TABLE_TOP: f64 = 90.0;
const COLUMN_WIDTHS: [f64; 3] = [50.0, 40.0, CONTENT_WIDTH - 90.0];
const CELL_PADDING: f64 = 4.0;
const TABLE_HEADINGS: [&str; 3] = ["KPI Indikator", "Ihr Wert", "Bewertung"];

const CONTACT_HEADING: &str = "Ihr Experte für den nächsten Schritt";
const CONTACT_CALL_TO_ACTION: &str = "Vereinbaren Sie jetzt ein kostenloses Erstgespräch.";
const CONTACT_BLOCK_HEIGHT: f64 = 15.0 + 15.0 + 40.0;
const NEXT_STEPS_FALLBACK_TITLE: &str = "Nächste Schritte";

/// Lays the report out top to bottom, opening a new page whenever the next
/// block would run into the footer.
pub(crate) struct ReportLayout<'a> {
    canvas: Canvas,
    branding: &'a ReportBranding,
    y: f64,
}

impl<'a> ReportLayout<'a> {
    pub(crate) fn new(branding: &'a ReportBranding) -> Result<Self, ReportError> {
        let mut layout = Self {
            canvas: Canvas::new(),
            branding,
            y: 0.0,
        };
        layout.start_page()?;
        Ok(layout)
    }

    pub(crate) fn into_canvas(self) -> Canvas {
        self.canvas
    }

    fn start_page(&mut self) -> Result<(), ReportError> {
        self.canvas.add_page();
        let footer = format!("{} | {}", self.branding.website, self.branding.email);
        self.canvas.text(
            MARGIN_LEFT,
            FOOTER_BASELINE,
            &footer,
            TextStyle::new(Font::Regular, 9.0, MUTED),
            Align::Left,
        )?;
        self.y = CONTINUATION_TOP;
        Ok(())
    }

    fn ensure_space(&mut self, needed: f64) -> Result<bool, ReportError> {
        if self.y + needed > BOTTOM_LIMIT {
            self.start_page()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(crate) fn header(&mut self, issued_on: NaiveDate) -> Result<(), ReportError> {
        self.canvas
            .fill_rect(0.0, 0.0, PAGE_WIDTH_MM, 40.0, HEADER_BACKGROUND)?;
        self.canvas.text(
            MARGIN_LEFT,
            22.0,
            &self.branding.wordmark(),
            TextStyle::new(Font::Bold, 24.0, BRAND_ORANGE),
            Align::Left,
        )?;
        self.canvas.text(
            MARGIN_LEFT,
            28.0,
            "SAM Health Check",
            TextStyle::new(Font::Bold, 16.0, BRAND_ORANGE),
            Align::Left,
        )?;
        self.canvas.text(
            150.0,
            28.0,
            &format!("Erstellt am: {}", issued_on.format("%d.%m.%Y")),
            TextStyle::new(Font::Regular, 10.0, MUTED),
            Align::Left,
        )?;
        self.y = 40.0;
        Ok(())
    }

    pub(crate) fn score_banner(&mut self, result: &HealthCheckResult) -> Result<(), ReportError> {
        let band = result.band();
        self.canvas
            .fill_rounded_rect(MARGIN_LEFT, 50.0, CONTENT_WIDTH, 30.0, 2.0, band.rgb().into())?;
        self.canvas.text(
            20.0,
            70.0,
            &format!("Health Score: {} / 100", result.total_score),
            TextStyle::new(Font::Bold, 16.0, Rgb::WHITE),
            Align::Left,
        )?;
        self.canvas.text(
            190.0,
            70.0,
            band.assessment(),
            TextStyle::new(Font::Regular, 12.0, Rgb::WHITE),
            Align::Right,
        )?;
        self.y = TABLE_TOP;
        Ok(())
    }

    pub(crate) fn kpi_table(&mut self, result: &HealthCheckResult) -> Result<(), ReportError> {
        let head = TextStyle::new(Font::Bold, 10.0, Rgb::WHITE);
        self.table_row(&TABLE_HEADINGS.map(String::from), [head; 3], Some(TABLE_HEAD))?;

        let label = TextStyle::new(Font::Bold, 10.0, Rgb::gray(20));
        let body = TextStyle::new(Font::Regular, 10.0, Rgb::gray(20));
        for (index, kpi) in result.kpis().into_iter().enumerate() {
            let cells = [
                kpi.kind.label().to_string(),
                kpi.formatted_value.clone(),
                kpi.message.clone(),
            ];
            let fill = (index % 2 == 1).then_some(TABLE_STRIPE);
            let height = row_height(&cells, [label, body, body]);
            if self.ensure_space(height)? {
                self.table_row(&TABLE_HEADINGS.map(String::from), [head; 3], Some(TABLE_HEAD))?;
            }
            self.table_row(&cells, [label, body, body], fill)?;
        }
        Ok(())
    }

    fn table_row(
        &mut self,
        cells: &[String; 3],
        styles: [TextStyle; 3],
        fill: Option<Rgb>,
    ) -> Result<(), ReportError> {
        let height = row_height(cells, styles);
        let top = self.y;
        let mut x = MARGIN_LEFT;

        for ((cell, style), width) in cells.iter().zip(styles).zip(COLUMN_WIDTHS) {
            if let Some(color) = fill {
                self.canvas.fill_rect(x, top, width, height, color)?;
            }
            self.canvas.stroke_rect(x, top, width, height, GRID, 0.1)?;

            let first_baseline = top + CELL_PADDING + style.line_height_mm() * 0.75;
            for (line_index, line) in style.wrap(cell, width - 2.0 * CELL_PADDING).iter().enumerate() {
                let baseline = first_baseline + line_index as f64 * style.line_height_mm();
                self.canvas
                    .text(x + CELL_PADDING, baseline, line, style, Align::Left)?;
            }
            x += width;
        }

        self.y = top + height;
        Ok(())
    }

    pub(crate) fn contact(&mut self, contact: &ContactInfo) -> Result<(), ReportError> {
        self.ensure_space(CONTACT_BLOCK_HEIGHT)?;

        self.y += 15.0;
        self.canvas
            .line((MARGIN_LEFT, self.y), (CONTENT_RIGHT, self.y), GRID, 0.2)?;
        self.y += 15.0;

        let y = self.y;
        self.canvas.text(
            MARGIN_LEFT,
            y,
            CONTACT_HEADING,
            TextStyle::new(Font::Bold, 14.0, Rgb::BLACK),
            Align::Left,
        )?;
        self.canvas.text(
            MARGIN_LEFT,
            y + 10.0,
            &contact.name,
            TextStyle::new(Font::Bold, 11.0, Rgb::gray(60)),
            Align::Left,
        )?;

        let detail = TextStyle::new(Font::Regular, 10.0, Rgb::gray(60));
        let lines = [
            (16.0, contact.role.clone()),
            (24.0, format!("Tel: {}", contact.phone)),
            (30.0, format!("Email: {}", contact.email)),
        ];
        for (offset, line) in lines {
            self.canvas
                .text(MARGIN_LEFT, y + offset, &line, detail, Align::Left)?;
        }

        self.canvas.text(
            MARGIN_LEFT,
            y + 40.0,
            CONTACT_CALL_TO_ACTION,
            TextStyle::new(Font::Regular, 10.0, CALL_TO_ACTION),
            Align::Left,
        )?;
        self.y = y + 40.0;
        Ok(())
    }

    pub(crate) fn next_steps(&mut self, next_steps: &NextSteps) -> Result<(), ReportError> {
        if next_steps.steps.is_empty() {
            return Ok(());
        }

        let title_style = TextStyle::new(Font::Bold, 12.0, Rgb::BLACK);
        let step_style = TextStyle::new(Font::Bold, 10.0, Rgb::gray(60));
        let body_style = TextStyle::new(Font::Regular, 10.0, Rgb::gray(60));

        self.ensure_space(12.0 + 12.0)?;
        self.y += 12.0;
        let title = if next_steps.title.trim().is_empty() {
            NEXT_STEPS_FALLBACK_TITLE
        } else {
            next_steps.title.as_str()
        };
        self.canvas
            .text(MARGIN_LEFT, self.y, title, title_style, Align::Left)?;
        self.y += 4.0;

        for (index, step) in next_steps.steps.iter().enumerate() {
            let description = if step.description.trim().is_empty() {
                Vec::new()
            } else {
                body_style.wrap(&step.description, CONTENT_WIDTH - 6.0)
            };
            // keep the step title together with its first line
            let first_line = description.len().min(1) as f64 * body_style.line_height_mm();
            self.ensure_space(6.0 + first_line)?;

            self.y += 6.0;
            self.canvas.text(
                MARGIN_LEFT,
                self.y,
                &format!("{}. {}", index + 1, step.title),
                step_style,
                Align::Left,
            )?;
            for line in &description {
                self.ensure_space(body_style.line_height_mm())?;
                self.y += body_style.line_height_mm();
                self.canvas
                    .text(MARGIN_LEFT + 6.0, self.y, line, body_style, Align::Left)?;
            }
        }
        Ok(())
    }
}

fn row_height(cells: &[String; 3], styles: [TextStyle; 3]) -> f64 {
    let lines = cells
        .iter()
        .zip(styles)
        .zip(COLUMN_WIDTHS)
        .map(|((cell, style), width)| {
            style.wrap(cell, width - 2.0 * CELL_PADDING).len() as f64 * style.line_height_mm()
        })
        .fold(0.0, f64::max);
    lines + 2.0 * CELL_PADDING
}
