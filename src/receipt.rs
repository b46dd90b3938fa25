//! Order-receipt rendering and export.
//!
//! The receipt is a fixed A4 template: centered header, success mark,
//! thank-you line, a horizontal rule, the order details block and a footer
//! disclaimer. Layout is expressed in mm from the top-left corner, matching
//! the page mockup, and converted to the PDF bottom-left origin when the
//! operations are built. Only built-in Helvetica is used,
//! so no fonts need to be embedded.

use std::path::{Path, PathBuf};

use log::{info, warn};
use printpdf::{
    BuiltinFont, Color, Line, LinePoint, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt,
    Rgb, TextItem,
};

use crate::{OrderDetails, Page, Price, Result};

/// File name of the exported document
pub const RECEIPT_FILE_NAME: &str = "order-details.pdf";

/// Element ids the order details are snapshotted from
pub const ORDER_NUMBER_ID: &str = "orderNumber";
pub const ORDER_DATE_ID: &str = "orderDate";
pub const ORDER_AMOUNT_ID: &str = "orderAmount";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

// Template coordinates, mm from the top-left corner.
const HEADER_Y: f32 = 20.0;
const CHECKMARK_Y: f32 = 35.0;
const THANK_YOU_Y: f32 = 50.0;
const RULE_Y: f32 = 60.0;
const DETAILS_LABEL_Y: f32 = 75.0;
const ORDER_NUMBER_Y: f32 = 90.0;
const ORDER_DATE_Y: f32 = 100.0;
const TOTAL_Y: f32 = 110.0;
const FOOTER_Y: f32 = 270.0;

const LEFT_MARGIN: Mm = Mm(20.0);
const RULE_END_X: Mm = Mm(190.0);

const HEADER_SIZE: Pt = Pt(20.0);
const BODY_SIZE: Pt = Pt(12.0);
const FOOTER_SIZE: Pt = Pt(10.0);

// Bootstrap success green and the default body text color.
const SUCCESS_COLOR: (f32, f32, f32) = (25.0 / 255.0, 135.0 / 255.0, 84.0 / 255.0);
const BODY_COLOR: (f32, f32, f32) = (33.0 / 255.0, 37.0 / 255.0, 41.0 / 255.0);

impl OrderDetails {
    /// Snapshot the order details from the page
    ///
    /// Reads the three designated elements at call time; a missing element
    /// aborts the whole export and no partial document is produced.
    pub fn read_from(page: &impl Page) -> Result<Self> {
        Ok(Self {
            order_number: page.text_of(ORDER_NUMBER_ID)?,
            order_date: page.text_of(ORDER_DATE_ID)?,
            order_amount: page.text_of(ORDER_AMOUNT_ID)?,
        })
    }
}

/// A renderable order confirmation
///
/// The total line deliberately does not reuse the `order_amount` display
/// text: the confirmation page substitutes the total server-side, so the
/// caller supplies it explicitly and the read value is carried only as
/// part of the snapshot.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Snapshot of the page's order details
    pub details: OrderDetails,
    /// Total cost emitted on the "Total Amount" line
    pub total_cost: Price,
}

impl Receipt {
    /// Build a receipt from a details snapshot and the order total
    pub fn new(details: OrderDetails, total_cost: Price) -> Self {
        Self { details, total_cost }
    }

    /// The template as page operations
    pub fn ops(&self) -> Vec<Op> {
        let mut ops = vec![Op::SaveGraphicsState];

        text_line(
            &mut ops,
            "Order Confirmation",
            BuiltinFont::HelveticaBold,
            HEADER_SIZE,
            None,
            HEADER_Y,
            rgb((0.0, 0.0, 0.0)),
        );
        text_line(
            &mut ops,
            "✓",
            BuiltinFont::HelveticaBold,
            HEADER_SIZE,
            None,
            CHECKMARK_Y,
            rgb(SUCCESS_COLOR),
        );
        text_line(
            &mut ops,
            "Thank you for your purchase!",
            BuiltinFont::Helvetica,
            BODY_SIZE,
            None,
            THANK_YOU_Y,
            rgb(BODY_COLOR),
        );

        // Separator rule between the header block and the details.
        ops.push(Op::SetOutlineThickness {
            pt: Mm(0.5).into_pt(),
        });
        ops.push(Op::SetOutlineColor {
            col: rgb((0.0, 0.0, 0.0)),
        });
        ops.push(Op::DrawLine {
            line: Line {
                points: vec![
                    LinePoint {
                        p: Point::new(LEFT_MARGIN, from_top(RULE_Y)),
                        bezier: false,
                    },
                    LinePoint {
                        p: Point::new(RULE_END_X, from_top(RULE_Y)),
                        bezier: false,
                    },
                ],
                is_closed: false,
            },
        });

        text_line(
            &mut ops,
            "Order Details",
            BuiltinFont::HelveticaBold,
            BODY_SIZE,
            Some(LEFT_MARGIN),
            DETAILS_LABEL_Y,
            rgb(BODY_COLOR),
        );
        text_line(
            &mut ops,
            &format!("Order Number: {}", self.details.order_number),
            BuiltinFont::Helvetica,
            BODY_SIZE,
            Some(LEFT_MARGIN),
            ORDER_NUMBER_Y,
            rgb(BODY_COLOR),
        );
        text_line(
            &mut ops,
            &format!("Date: {}", self.details.order_date),
            BuiltinFont::Helvetica,
            BODY_SIZE,
            Some(LEFT_MARGIN),
            ORDER_DATE_Y,
            rgb(BODY_COLOR),
        );
        text_line(
            &mut ops,
            &format!("Total Amount: {} rub.", self.total_cost),
            BuiltinFont::Helvetica,
            BODY_SIZE,
            Some(LEFT_MARGIN),
            TOTAL_Y,
            rgb(BODY_COLOR),
        );

        text_line(
            &mut ops,
            "This is an automatically generated document.",
            BuiltinFont::Helvetica,
            FOOTER_SIZE,
            None,
            FOOTER_Y,
            rgb(BODY_COLOR),
        );

        ops.push(Op::RestoreGraphicsState);
        ops
    }

    /// Render the receipt to PDF bytes
    pub fn render(&self) -> Vec<u8> {
        let mut doc = PdfDocument::new("Order Confirmation");
        let page = PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), self.ops());

        let mut warnings = Vec::new();
        let bytes = doc
            .with_pages(vec![page])
            .save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!("receipt rendering produced {} warnings", warnings.len());
        }
        bytes
    }
}

/// Export the order receipt for the current page
///
/// Snapshots the order details, renders the fixed template and writes
/// `order-details.pdf` into `out_dir`. Returns the path of the written
/// file.
pub fn export_order_details<P: Page>(page: &P, total_cost: Price, out_dir: &Path) -> Result<PathBuf> {
    let details = OrderDetails::read_from(page)?;
    let receipt = Receipt::new(details, total_cost);
    let bytes = receipt.render();

    let path = out_dir.join(RECEIPT_FILE_NAME);
    std::fs::write(&path, &bytes)?;
    info!("exported {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb {
        r,
        g,
        b,
        icc_profile: None,
    })
}

fn from_top(y_mm: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - y_mm)
}

// Built-in Helvetica carries no width tables here; half an em per glyph is
// close enough to center the template lines.
fn centered_x(text: &str, size: Pt) -> Mm {
    let width = Mm::from(Pt(text.chars().count() as f32 * size.0 * 0.5));
    Mm((PAGE_WIDTH_MM - width.0) / 2.0)
}

/// Emit one positioned line of text; `x = None` centers it.
fn text_line(
    ops: &mut Vec<Op>,
    text: &str,
    font: BuiltinFont,
    size: Pt,
    x: Option<Mm>,
    y_from_top: f32,
    color: Color,
) {
    let x = x.unwrap_or_else(|| centered_x(text, size));
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point::new(x, from_top(y_from_top)),
    });
    ops.push(Op::SetFillColor { col: color });
    ops.push(Op::SetFontSizeBuiltinFont { size, font });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font,
    });
    ops.push(Op::EndTextSection);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryPage;

    fn order_page() -> MemoryPage {
        MemoryPage::new()
            .with_text(ORDER_NUMBER_ID, "A-100")
            .with_text(ORDER_DATE_ID, "2024-01-01")
            .with_text(ORDER_AMOUNT_ID, "350 ₽")
    }

    fn written_lines(ops: &[Op]) -> Vec<String> {
        ops.iter()
            .filter_map(|op| match op {
                Op::WriteTextBuiltinFont { items, .. } => Some(items),
                _ => None,
            })
            .flatten()
            .filter_map(|item| match item {
                TextItem::Text(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn snapshot_reads_all_three_elements() {
        let details = OrderDetails::read_from(&order_page()).unwrap();
        assert_eq!(details.order_number, "A-100");
        assert_eq!(details.order_date, "2024-01-01");
        assert_eq!(details.order_amount, "350 ₽");
    }

    #[test]
    fn snapshot_aborts_on_missing_element() {
        let page = MemoryPage::new().with_text(ORDER_NUMBER_ID, "A-100");
        assert!(OrderDetails::read_from(&page).is_err());
    }

    #[test]
    fn template_contains_the_order_lines() {
        let details = OrderDetails::read_from(&order_page()).unwrap();
        let lines = written_lines(&Receipt::new(details, 350).ops());

        assert!(lines.contains(&"Order Confirmation".to_string()));
        assert!(lines.contains(&"Thank you for your purchase!".to_string()));
        assert!(lines.contains(&"Order Details".to_string()));
        assert!(lines.contains(&"Order Number: A-100".to_string()));
        assert!(lines.contains(&"Date: 2024-01-01".to_string()));
        assert!(lines.contains(&"Total Amount: 350 rub.".to_string()));
        assert!(lines.contains(&"This is an automatically generated document.".to_string()));
    }

    #[test]
    fn total_line_is_independent_of_order_amount_text() {
        let mut details = OrderDetails::read_from(&order_page()).unwrap();
        details.order_amount = "999999 ₽".to_string();
        let lines = written_lines(&Receipt::new(details, 350).ops());

        assert!(lines.contains(&"Total Amount: 350 rub.".to_string()));
        assert!(!lines.iter().any(|l| l.contains("999999")));
    }

    #[test]
    fn render_produces_a_pdf() {
        let details = OrderDetails::read_from(&order_page()).unwrap();
        let bytes = Receipt::new(details, 350).render();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn export_writes_the_named_file() {
        let dir = std::env::temp_dir().join(format!("shopfront-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = export_order_details(&order_page(), 350, &dir).unwrap();
        assert!(path.ends_with(RECEIPT_FILE_NAME));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
