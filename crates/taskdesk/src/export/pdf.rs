//! PDF rendering of the task table.

use std::io::BufWriter;
use std::path::Path;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::{ExportDocument, TaskExporter};

// A4, in millimetres
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.6;
const CELL_PADDING: f32 = 1.8;
const COMPLETED_WIDTH: f32 = 28.2;
const ROW_HEIGHT: f32 = 7.0;

const TITLE_SIZE: f32 = 20.0;
const BODY_SIZE: f32 = 10.0;

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width, in ems
const AVG_CHAR_EM: f32 = 0.5;

const LAYER_NAME: &str = "Tasks";

/// Renders the task table to an A4 PDF with the built-in Helvetica fonts
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExporter;

#[async_trait]
impl TaskExporter for PdfExporter {
    async fn render(&self, document: &ExportDocument, path: &Path) -> anyhow::Result<()> {
        let document = document.clone();
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || render_pdf(&document, &path))
            .await
            .context("PDF renderer stopped unexpectedly")?
    }
}

fn render_pdf(document: &ExportDocument, path: &Path) -> anyhow::Result<()> {
    let (doc, page, layer) = PdfDocument::new(
        document.title.as_str(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        LAYER_NAME,
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow!("cannot load Helvetica: {e}"))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow!("cannot load Helvetica-Bold: {e}"))?;
    let mut layer = doc.get_page(page).get_layer(layer);

    let title = pdf_text(&document.title);
    let title_x = ((PAGE_WIDTH - text_width(&title, TITLE_SIZE)) / 2.0).max(MARGIN);
    let mut y = PAGE_HEIGHT - MARGIN - TITLE_SIZE * PT_TO_MM;
    layer.use_text(title, TITLE_SIZE, Mm(title_x), Mm(y), &bold);
    y -= ROW_HEIGHT * 1.5;

    let widths = column_widths();
    let header: Vec<&str> = document.columns.iter().map(String::as_str).collect();
    draw_row(&layer, &header, &widths, y, &bold);
    y -= ROW_HEIGHT;

    for row in &document.rows {
        if y < MARGIN {
            let (page, next) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
            layer = doc.get_page(page).get_layer(next);
            y = PAGE_HEIGHT - MARGIN - ROW_HEIGHT;
            draw_row(&layer, &header, &widths, y, &bold);
            y -= ROW_HEIGHT;
        }

        let cells = [
            row.title.as_str(),
            row.description.as_str(),
            row.completed.as_str(),
        ];
        draw_row(&layer, &cells, &widths, y, &regular);
        y -= ROW_HEIGHT;
    }
    drop(layer);

    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| anyhow!("cannot write {}: {e}", path.display()))?;
    Ok(())
}

/// Title and Description share the width left by the fixed Completed column
fn column_widths() -> [f32; 3] {
    let flexible = (PAGE_WIDTH - 2.0 * MARGIN - COMPLETED_WIDTH) / 2.0;
    [flexible, flexible, COMPLETED_WIDTH]
}

fn draw_row(
    layer: &PdfLayerReference,
    cells: &[&str],
    widths: &[f32; 3],
    y: f32,
    font: &IndirectFontRef,
) {
    let mut x = MARGIN;
    for (cell, width) in cells.iter().zip(widths) {
        let text = fit(cell, width - 2.0 * CELL_PADDING);
        layer.use_text(text, BODY_SIZE, Mm(x + CELL_PADDING), Mm(y), font);
        x += width;
    }
}

fn text_width(text: &str, size: f32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let chars = text.chars().count() as f32;
    chars * size * AVG_CHAR_EM * PT_TO_MM
}

/// Shorten `text` to one line that fits `width` millimetres of body text
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fit(text: &str, width: f32) -> String {
    let text = pdf_text(text);
    let max_chars = (width / (BODY_SIZE * AVG_CHAR_EM * PT_TO_MM)).floor().max(0.0) as usize;
    if text.chars().count() <= max_chars {
        return text;
    }

    let mut cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

/// Built-in fonts only cover ASCII; line breaks become spaces
fn pdf_text(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_control() {
                ' '
            } else if c.is_ascii() {
                c
            } else {
                '?'
            }
        })
        .collect()
}
