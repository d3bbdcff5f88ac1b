//! PDF rendering of attendance reports.
//!
//! Layout: A4 portrait. Page one carries the report title, the active
//! filter description, and the generation timestamp; every page repeats
//! the column header band, shades alternating rows, colors the status
//! cell, and closes with a `Page N of M` footer.

use chrono::Utc;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};

use rollcall_core::error::AppError;
use rollcall_core::result::AppResult;
use rollcall_entity::attendance::{AttendanceRecord, AttendanceStatus};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 7.0;
const TABLE_BOTTOM: f32 = 22.0;
const FOOTER_Y: f32 = 12.0;

/// Table top on the first page, below the title block.
const FIRST_PAGE_TABLE_TOP: f32 = 252.0;
/// Table top on continuation pages.
const NEXT_PAGE_TABLE_TOP: f32 = 275.0;

const BODY_SIZE: f32 = 9.0;

/// Column layout: x offset from the left edge and character budget.
struct Column {
    header: &'static str,
    x: f32,
    max_chars: usize,
}

const COLUMNS: [Column; 8] = [
    Column { header: "#", x: MARGIN, max_chars: 5 },
    Column { header: "Name", x: 23.0, max_chars: 20 },
    Column { header: "Roll No", x: 57.0, max_chars: 10 },
    Column { header: "Trade", x: 75.0, max_chars: 13 },
    Column { header: "Event", x: 97.0, max_chars: 22 },
    Column { header: "Date", x: 135.0, max_chars: 10 },
    Column { header: "Status", x: 155.0, max_chars: 8 },
    Column { header: "Verified By", x: 170.0, max_chars: 15 },
];

/// Renders attendance report PDFs.
#[derive(Debug, Clone, Default)]
pub struct PdfReportRenderer;

impl PdfReportRenderer {
    /// Creates a new renderer.
    pub fn new() -> Self {
        Self
    }

    /// Renders the given (already filtered and ordered) records.
    ///
    /// `filters_line` is a human-readable description of the active
    /// filters, e.g. `Status: present | Kind: event`.
    pub fn render(&self, rows: &[AttendanceRecord], filters_line: &str) -> AppResult<Vec<u8>> {
        let (doc, first_page, first_layer) =
            PdfDocument::new("Attendance Report", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::internal(format!("Failed to load report font: {e}")))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::internal(format!("Failed to load report font: {e}")))?;

        let total_pages = page_count(rows.len());
        let generated_at = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        draw_title_block(&layer, &font, &font_bold, filters_line, &generated_at);

        if rows.is_empty() {
            set_black(&layer);
            layer.use_text(
                "No records match the selected filters.",
                10.0,
                Mm(MARGIN),
                Mm(FIRST_PAGE_TABLE_TOP - 6.0),
                &font,
            );
        }

        let mut page_no = 1usize;
        let mut y = FIRST_PAGE_TABLE_TOP;
        draw_header_band(&layer, &font_bold, y);
        y -= ROW_HEIGHT;

        for (index, row) in rows.iter().enumerate() {
            if y < TABLE_BOTTOM {
                draw_footer(&layer, &font, page_no, total_pages, &generated_at);
                let (page, new_layer) =
                    doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
                layer = doc.get_page(page).get_layer(new_layer);
                page_no += 1;
                y = NEXT_PAGE_TABLE_TOP;
                draw_header_band(&layer, &font_bold, y);
                y -= ROW_HEIGHT;
            }

            if index % 2 == 1 {
                shade_row(&layer, y, Rgb::new(0.93, 0.93, 0.93, None));
            }
            draw_record(&layer, &font, y, index + 1, row);
            y -= ROW_HEIGHT;
        }

        draw_footer(&layer, &font, page_no, total_pages, &generated_at);

        doc.save_to_bytes()
            .map_err(|e| AppError::internal(format!("Failed to serialize report PDF: {e}")))
    }
}

/// Total pages for a given record count, matching the pagination loop.
fn page_count(rows: usize) -> usize {
    let first_capacity = rows_per_page(FIRST_PAGE_TABLE_TOP);
    if rows <= first_capacity {
        return 1;
    }
    let rest = rows - first_capacity;
    1 + rest.div_ceil(rows_per_page(NEXT_PAGE_TABLE_TOP))
}

fn rows_per_page(table_top: f32) -> usize {
    // One row height goes to the header band.
    (((table_top - TABLE_BOTTOM) / ROW_HEIGHT) as usize).saturating_sub(1)
}

/// Truncate a cell to its character budget, with a trailing ellipsis.
fn truncate_cell(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let kept: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}\u{2026}")
}

fn set_black(layer: &PdfLayerReference) {
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
}

fn draw_title_block(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    filters_line: &str,
    generated_at: &str,
) {
    set_black(layer);
    layer.use_text("Attendance Report", 18.0, Mm(MARGIN), Mm(278.0), font_bold);
    layer.use_text(
        truncate_cell(filters_line, 110),
        9.0,
        Mm(MARGIN),
        Mm(270.0),
        font,
    );
    layer.use_text(
        format!("Generated: {generated_at}"),
        8.0,
        Mm(MARGIN),
        Mm(264.0),
        font,
    );
}

fn draw_header_band(layer: &PdfLayerReference, font_bold: &IndirectFontRef, y: f32) {
    shade_row(layer, y, Rgb::new(0.82, 0.82, 0.82, None));
    set_black(layer);
    for column in &COLUMNS {
        layer.use_text(column.header, BODY_SIZE, Mm(column.x), Mm(y - 4.8), font_bold);
    }
}

fn shade_row(layer: &PdfLayerReference, y: f32, color: Rgb) {
    layer.set_fill_color(Color::Rgb(color));
    let rect = Rect::new(
        Mm(MARGIN - 2.0),
        Mm(y - ROW_HEIGHT),
        Mm(PAGE_WIDTH - MARGIN + 2.0),
        Mm(y),
    )
    .with_mode(PaintMode::Fill)
    .with_winding(WindingOrder::NonZero);
    layer.add_rect(rect);
}

fn draw_record(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    y: f32,
    row_no: usize,
    record: &AttendanceRecord,
) {
    let text_y = y - 4.8;
    let date = record.event_date.format("%Y-%m-%d").to_string();
    let cells = [
        row_no.to_string(),
        record.user_name.clone(),
        record.roll_no.clone(),
        record.trade.clone(),
        record.event_title.clone(),
        date,
        record.status.as_str().to_string(),
        record.verifier_name.clone(),
    ];

    set_black(layer);
    for (column, cell) in COLUMNS.iter().zip(cells.iter()) {
        if column.header == "Status" {
            continue;
        }
        layer.use_text(
            truncate_cell(cell, column.max_chars),
            BODY_SIZE,
            Mm(column.x),
            Mm(text_y),
            font,
        );
    }

    let status_color = match record.status {
        AttendanceStatus::Present => Rgb::new(0.0, 0.5, 0.0, None),
        AttendanceStatus::Absent => Rgb::new(0.78, 0.0, 0.0, None),
    };
    layer.set_fill_color(Color::Rgb(status_color));
    layer.use_text(
        record.status.as_str(),
        BODY_SIZE,
        Mm(COLUMNS[6].x),
        Mm(text_y),
        font,
    );
    set_black(layer);
}

fn draw_footer(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    page_no: usize,
    total_pages: usize,
    generated_at: &str,
) {
    set_black(layer);
    layer.use_text(
        format!("Page {page_no} of {total_pages}"),
        8.0,
        Mm(PAGE_WIDTH - MARGIN - 25.0),
        Mm(FOOTER_Y),
        font,
    );
    layer.use_text(
        format!("RollCall attendance report \u{2014} generated {generated_at}"),
        8.0,
        Mm(MARGIN),
        Mm(FOOTER_Y),
        font,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rollcall_entity::event::EventKind;
    use uuid::Uuid;

    fn record(n: usize) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_name: format!("Student {n}"),
            roll_no: format!("R{n:04}"),
            trade: "Electronics".to_string(),
            event_id: Uuid::new_v4(),
            event_title: "Campus Placement Drive".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
            event_kind: EventKind::Event,
            status: if n % 3 == 0 {
                AttendanceStatus::Absent
            } else {
                AttendanceStatus::Present
            },
            verifier_name: "Admin One".to_string(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_truncate_cell() {
        assert_eq!(truncate_cell("short", 10), "short");
        assert_eq!(truncate_cell("exactly-10", 10), "exactly-10");
        assert_eq!(truncate_cell("a little too long", 10), "a little \u{2026}");
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(1), 1);
        let first = rows_per_page(FIRST_PAGE_TABLE_TOP);
        assert_eq!(page_count(first), 1);
        assert_eq!(page_count(first + 1), 2);
    }

    #[test]
    fn test_render_empty_is_valid_pdf() {
        let bytes = PdfReportRenderer::new().render(&[], "Status: any").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_multi_page() {
        let rows: Vec<_> = (0..120).map(record).collect();
        let bytes = PdfReportRenderer::new()
            .render(&rows, "Status: any | Kind: event")
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        // 120 rows cannot fit on one page.
        assert!(page_count(rows.len()) > 1);
    }
}
