//! A4 PDF of the summary and schedule.
//!
//! Text is set in the built-in Helvetica faces, which only cover single-byte
//! encodings, so callers normally pass [`CurrencyFormat::gbp_ascii`].

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::render::currency::CurrencyFormat;
use crate::types::MortgageReport;
use crate::MortgageResult;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const LEFT_MARGIN: Mm = Mm(20.0);
const TOP_LINE: f32 = 277.0;
const BOTTOM_LIMIT: f32 = 20.0;

const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 11.0;
const SUMMARY_LEADING: f32 = 6.0;
const ROW_HEIGHT: f32 = 7.0;

/// Left edge of the Month, Interest, Principal and Balance columns.
const COLUMNS: [Mm; 4] = [Mm(20.0), Mm(45.0), Mm(90.0), Mm(135.0)];
const COLUMN_TITLES: [&str; 4] = ["Month", "Interest", "Principal", "Balance"];

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Lays out lines top to bottom, starting a new page when the next line
/// would cross the bottom margin.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    fonts: &'a Fonts,
    layer: PdfLayerReference,
    y: f32,
    pages: u32,
}

impl PageWriter<'_> {
    fn ensure_room(&mut self, height: f32) {
        if self.y - height >= BOTTOM_LIMIT {
            return;
        }
        self.pages += 1;
        let (page, layer) = self
            .doc
            .add_page(PAGE_WIDTH, PAGE_HEIGHT, format!("Page {}", self.pages));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP_LINE;
    }

    fn line(&mut self, text: &str, size: f32, bold: bool, advance: f32) {
        self.ensure_room(advance);
        let font = if bold { &self.fonts.bold } else { &self.fonts.regular };
        self.layer.use_text(text, size, LEFT_MARGIN, Mm(self.y), font);
        self.y -= advance;
    }

    fn row(&mut self, cells: [&str; 4], bold: bool) {
        self.ensure_room(ROW_HEIGHT);
        let font = if bold { &self.fonts.bold } else { &self.fonts.regular };
        for (x, cell) in COLUMNS.iter().zip(cells) {
            self.layer.use_text(cell, BODY_SIZE, *x, Mm(self.y), font);
        }
        self.y -= ROW_HEIGHT;
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }
}

/// Render the report as a complete PDF document held in memory.
pub fn render_pdf(report: &MortgageReport, currency: &CurrencyFormat) -> MortgageResult<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new("Mortgage Breakdown", PAGE_WIDTH, PAGE_HEIGHT, "Page 1");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    let mut writer = PageWriter {
        doc: &doc,
        fonts: &fonts,
        layer: doc.get_page(page).get_layer(layer),
        y: TOP_LINE,
        pages: 1,
    };

    writer.line("Mortgage Breakdown", TITLE_SIZE, true, 12.0);

    let terms = &report.terms;
    let summary = &report.summary;
    let summary_lines = [
        format!("Principal: {}", currency.format(terms.principal())),
        format!("Fixed rate period: {} months", terms.fixed_months()),
        format!("Monthly payment: {}", currency.format(terms.monthly_payment())),
        format!("Total paid: {}", currency.format(summary.total_paid)),
        format!("Total interest: {}", currency.format(summary.total_interest)),
        format!("Total principal: {}", currency.format(summary.total_principal)),
        format!("Remaining balance: {}", currency.format(summary.remaining_balance)),
    ];
    for text in &summary_lines {
        writer.line(text, BODY_SIZE, false, SUMMARY_LEADING);
    }
    writer.gap(SUMMARY_LEADING);

    writer.row(COLUMN_TITLES, true);
    for entry in report.schedule.entries() {
        let month = entry.month.to_string();
        let interest = currency.format(entry.interest);
        let principal = currency.format(entry.principal);
        let balance = currency.format(entry.balance);
        writer.row(
            [
                month.as_str(),
                interest.as_str(),
                principal.as_str(),
                balance.as_str(),
            ],
            false,
        );
    }

    Ok(doc.save_to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LoanTerms;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pdf_has_header_and_trailer() {
        let terms = LoanTerms::with_computed_payment(dec!(200_000), dec!(5), 12).unwrap();
        let report = MortgageReport::from_terms(terms).unwrap();
        let bytes = render_pdf(&report, &CurrencyFormat::gbp_ascii()).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(64)..]).to_string();
        assert!(tail.contains("%%EOF"));
    }

    #[test]
    fn test_long_schedule_spans_several_pages() {
        let short = LoanTerms::with_computed_payment(dec!(200_000), dec!(5), 12).unwrap();
        let long = LoanTerms::with_computed_payment(dec!(200_000), dec!(5), 360).unwrap();

        let currency = CurrencyFormat::gbp_ascii();
        let short_report = MortgageReport::from_terms(short).unwrap();
        let long_report = MortgageReport::from_terms(long).unwrap();
        let short_pdf = render_pdf(&short_report, &currency).unwrap();
        let long_pdf = render_pdf(&long_report, &currency).unwrap();

        assert!(long_pdf.starts_with(b"%PDF"));
        assert!(long_pdf.len() > short_pdf.len());
    }
}
