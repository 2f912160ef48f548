//! Receipt/invoice generation and CSV export over already-fetched data.
//! Layout routines are pure (bytes out); the download helpers hand the
//! artifact to the browser through a Blob and a synthetic anchor click.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb};
use wasm_bindgen::JsCast;

use crate::models::{Client, Inquiry, Transaction};

const IN_TO_MM: f32 = 25.4;

pub const HISTORY_PDF_FILENAME: &str = "transaction_history.pdf";
pub const CSV_FILENAME: &str = "transaction-list.csv";

pub fn receipt_filename(id: i32) -> String {
    format!("Transaction_Receipt_{}.pdf", id)
}

/// One merged row of the grouped line-item table.
#[derive(Clone, PartialEq, Debug)]
pub struct LineItem {
    pub service: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Groups inquiries by service, merging entries that share (service, form
/// name): quantity accumulates and the price sums. First-seen order is kept
/// for both groups and rows.
pub fn group_inquiries<'a, I>(inquiries: I) -> Vec<(String, Vec<LineItem>)>
where
    I: IntoIterator<Item = &'a Inquiry>,
{
    let mut groups: Vec<(String, Vec<LineItem>)> = Vec::new();
    for inquiry in inquiries {
        let price = inquiry.price_value();
        let index = match groups.iter().position(|(s, _)| *s == inquiry.service) {
            Some(i) => i,
            None => {
                groups.push((inquiry.service.clone(), Vec::new()));
                groups.len() - 1
            }
        };
        let rows = &mut groups[index].1;
        match rows.iter_mut().find(|row| row.name == inquiry.name) {
            Some(row) => {
                row.quantity += 1;
                row.total_price += price;
            }
            None => rows.push(LineItem {
                service: inquiry.service.clone(),
                name: inquiry.name.clone(),
                quantity: 1,
                unit_price: price,
                total_price: price,
            }),
        }
    }
    groups
}

pub fn grand_total(groups: &[(String, Vec<LineItem>)]) -> f64 {
    groups
        .iter()
        .flat_map(|(_, rows)| rows.iter())
        .map(|row| row.total_price)
        .sum()
}

pub fn transaction_total(transaction: &Transaction) -> f64 {
    transaction.inquiries.iter().map(Inquiry::price_value).sum()
}

/// Best-effort join from a transaction's denormalized name back to a client
/// record: case-insensitive equality on the reconstructed full name. Breaks
/// when a client is renamed after the transaction was captured.
pub fn match_client<'a>(clients: &'a [Client], name: &str) -> Option<&'a Client> {
    let wanted = name.trim();
    clients
        .iter()
        .find(|client| client.full_name().eq_ignore_ascii_case(wanted))
}

pub fn peso(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string().chars().rev().collect::<Vec<char>>();
    let mut grouped = Vec::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }
    let grouped: String = grouped.into_iter().rev().collect();
    format!("{}Php {}.{:02}", sign, grouped, frac)
}

// ---- CSV ----

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Flattens the transaction table into CSV, inquiries joined into one cell.
/// Leads with a UTF-8 BOM so Excel picks the right encoding.
pub fn transactions_csv(transactions: &[Transaction]) -> String {
    let mut csv = String::from("\u{feff}");
    csv.push_str("ID,Name,Business Name,TIN,Date,Status,Transact,Inquiries\n");
    for tx in transactions {
        let inquiries = tx
            .inquiries
            .iter()
            .map(|inq| format!("{} ({}): {}", inq.name, inq.service, inq.price))
            .collect::<Vec<_>>()
            .join(", ");
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            tx.id,
            csv_quote(&tx.name),
            csv_quote(&tx.business_name),
            csv_quote(&tx.tin_id),
            tx.date,
            tx.status.label(),
            tx.transact.label(),
            csv_quote(&inquiries),
        ));
    }
    csv
}

// ---- PDF layout ----

/// Top-left inch coordinates over printpdf's bottom-left millimetre origin.
/// Geometry stays in f32 because that is what printpdf's `Mm` wraps; money
/// stays f64 and is formatted before it reaches a draw call.
struct Sheet {
    layer: PdfLayerReference,
    height_in: f32,
    width_in: f32,
}

impl Sheet {
    fn text(&self, s: &str, size: f32, x_in: f32, y_in: f32, font: &IndirectFontRef) {
        self.layer.use_text(
            s,
            size,
            Mm(x_in * IN_TO_MM),
            Mm((self.height_in - y_in) * IN_TO_MM),
            font,
        );
    }

    /// The builtin fonts carry no width tables here; half an em per glyph is
    /// close enough for centering and right alignment on these fixed layouts.
    fn approx_width_in(s: &str, size: f32) -> f32 {
        s.chars().count() as f32 * size * 0.5 / 72.0
    }

    fn text_centered(&self, s: &str, size: f32, y_in: f32, font: &IndirectFontRef) {
        let x = (self.width_in - Self::approx_width_in(s, size)) / 2.0;
        self.text(s, size, x.max(0.0), y_in, font);
    }

    fn hline(&self, x1_in: f32, x2_in: f32, y_in: f32) {
        let y = Mm((self.height_in - y_in) * IN_TO_MM);
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1_in * IN_TO_MM), y), false),
                (Point::new(Mm(x2_in * IN_TO_MM), y), false),
            ],
            is_closed: false,
        });
    }

    fn set_text_color(&self, r: f32, g: f32, b: f32) {
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }
}

fn placeholder(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Fixed-size 4.25in x 5.5in receipt for a single transaction. Contact
/// details come from the matched client when available; otherwise N/A.
pub fn receipt_pdf(transaction: &Transaction, client: Option<&Client>) -> Result<Vec<u8>, String> {
    let (doc, page, layer) = PdfDocument::new(
        "Transaction Receipt",
        Mm(4.25 * IN_TO_MM),
        Mm(5.5 * IN_TO_MM),
        "receipt",
    );
    let sheet = Sheet {
        layer: doc.get_page(page).get_layer(layer),
        height_in: 5.5,
        width_in: 4.25,
    };
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| e.to_string())?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| e.to_string())?;

    sheet.text_centered("W&E Guarantee", 14.0, 0.4, &bold);
    sheet.text_centered("Phone: 0916-286-5399 / 0915-113-3693", 10.0, 0.6, &regular);
    sheet.text_centered("Email: webs.sanjuanbatangas@gmail.com", 10.0, 0.75, &regular);
    sheet.text_centered(
        "Location: Pastor Avenue, Pallocan West, Batangas City",
        10.0,
        0.9,
        &regular,
    );
    sheet.hline(0.25, 4.0, 1.05);

    let email = client
        .and_then(|c| c.email.clone())
        .unwrap_or_else(|| "N/A".to_string());
    let contact = client
        .and_then(|c| c.contact_number.clone())
        .unwrap_or_else(|| "N/A".to_string());
    let address = client
        .and_then(|c| c.business.first())
        .map(|b| b.registered_address.clone())
        .unwrap_or_else(|| "N/A".to_string());

    let mut y = 1.3;
    sheet.text(&format!("Name: {}", placeholder(&transaction.name, "N/A")), 10.0, 0.25, y, &regular);
    sheet.text(&format!("Date: {}", placeholder(&transaction.date, "N/A")), 10.0, 2.25, y, &regular);
    y += 0.2;
    sheet.text(&format!("Email: {}", email), 10.0, 0.25, y, &regular);
    sheet.text(&format!("Address: {}", address), 10.0, 2.25, y, &regular);
    y += 0.2;
    sheet.text(&format!("Contact: {}", contact), 10.0, 0.25, y, &regular);

    y += 0.2;
    sheet.hline(0.25, 4.0, y);
    y += 0.15;
    sheet.text("Inquiries", 12.0, 0.25, y, &bold);
    y += 0.2;

    for inquiry in &transaction.inquiries {
        sheet.text(&inquiry.service, 10.0, 0.25, y, &regular);
        y += 0.15;
        sheet.text(&inquiry.name, 10.0, 0.35, y, &regular);
        sheet.text(
            &format!("Price: {}", peso(inquiry.price_value())),
            10.0,
            3.1,
            y,
            &regular,
        );
        y += 0.25;
    }

    let total_text = format!("Total: {}", peso(transaction_total(transaction)));
    let text_width = Sheet::approx_width_in(&total_text, 12.0);
    let right_x = 4.25 - text_width - 0.25;
    sheet.hline(right_x, right_x + text_width, y - 0.2);
    sheet.text(&total_text, 12.0, right_x, y, &bold);
    y += 0.3;

    sheet.text_centered("Thank you for your transaction!", 8.0, y, &regular);

    save_pdf(doc)
}

/// 6in x 7.5in invoice over a filtered transaction batch: BILL TO resolved
/// through `match_client`, grouped line-item table, SUBTOTAL and blanks for
/// the manually filled summary fields.
pub fn invoice_pdf(
    transactions: &[Transaction],
    clients: &[Client],
    fallback_date: &str,
) -> Result<Vec<u8>, String> {
    let (doc, page, layer) = PdfDocument::new(
        "Transaction History",
        Mm(6.0 * IN_TO_MM),
        Mm(7.5 * IN_TO_MM),
        "invoice",
    );
    let sheet = Sheet {
        layer: doc.get_page(page).get_layer(layer),
        height_in: 7.5,
        width_in: 6.0,
    };
    let regular = doc
        .add_builtin_font(BuiltinFont::TimesRoman)
        .map_err(|e| e.to_string())?;
    let bold = doc
        .add_builtin_font(BuiltinFont::TimesBold)
        .map_err(|e| e.to_string())?;

    let margin_left = 0.3;
    let right_col = 4.0;

    sheet.text("W&E Guarantee", 14.0, margin_left + 0.5, 0.5, &bold);
    sheet.text("Phone: 0916-286-5399 / 0915-113-3693", 10.0, margin_left + 0.5, 0.65, &regular);
    sheet.text("Email: webs.sanjuanbatangas@gmail.com", 10.0, margin_left + 0.5, 0.8, &regular);
    sheet.text(
        "Location: Pastor Avenue, Pallocan West, Batangas City",
        10.0,
        margin_left + 0.5,
        0.95,
        &regular,
    );

    sheet.set_text_color(0.0, 0.0, 1.0);
    sheet.text("INVOICE", 14.0, right_col + 0.1, 0.5, &bold);
    sheet.set_text_color(0.0, 0.0, 0.0);

    sheet.text("INVOICE #:", 10.0, right_col + 0.1, 0.75, &regular);
    sheet.text("DATE:", 10.0, right_col + 0.1, 0.95, &regular);
    sheet.text("____________", 10.0, right_col + 1.0, 0.75, &regular);
    let date = transactions
        .first()
        .map(|tx| tx.date.as_str())
        .filter(|d| !d.is_empty())
        .unwrap_or(fallback_date);
    sheet.text(date, 10.0, right_col + 1.0, 0.95, &regular);

    // BILL TO, resolved through the denormalized-name heuristic.
    sheet.set_text_color(0.0, 0.4, 0.8);
    sheet.text("BILL TO", 11.0, margin_left, 1.5, &bold);
    sheet.text("TERMS", 11.0, right_col + 0.5, 1.5, &bold);
    sheet.set_text_color(0.0, 0.0, 0.0);
    sheet.text("Due Upon Receipt", 10.0, right_col + 0.5, 1.7, &bold);

    if let Some(first) = transactions.first() {
        let matched = match_client(clients, &first.name);
        let business = matched.and_then(|c| c.business.first());
        sheet.text(
            &placeholder(&first.name.to_uppercase(), "CLIENT NAME"),
            10.0,
            margin_left,
            1.7,
            &regular,
        );
        sheet.text(
            &business
                .map(|b| b.business_name.to_uppercase())
                .unwrap_or_else(|| "BUSINESS NAME".to_string()),
            10.0,
            margin_left,
            1.9,
            &regular,
        );
        sheet.text(
            &business
                .map(|b| b.registered_address.to_uppercase())
                .unwrap_or_else(|| "ADDRESS".to_string()),
            10.0,
            margin_left,
            2.1,
            &regular,
        );
    } else {
        sheet.text("No client data available", 10.0, margin_left, 1.7, &regular);
    }

    // Grouped line-item table.
    let col = 6.0 / 4.0;
    let mut y = 2.5;
    sheet.set_text_color(0.0, 0.4, 0.8);
    sheet.text("DESCRIPTION", 11.0, margin_left, y, &bold);
    sheet.text("QUANTITY", 11.0, margin_left + col, y, &bold);
    sheet.text("UNIT PRICE", 11.0, margin_left + col * 2.0, y, &bold);
    sheet.text("AMOUNT", 11.0, margin_left + col * 3.0, y, &bold);
    sheet.set_text_color(0.0, 0.0, 0.0);
    y += 0.3;

    let groups = group_inquiries(transactions.iter().flat_map(|tx| tx.inquiries.iter()));
    for (service, rows) in &groups {
        sheet.text(&service.to_uppercase(), 10.0, margin_left, y, &bold);
        y += 0.2;
        for row in rows {
            sheet.text(&row.name, 10.0, margin_left + 0.2, y, &regular);
            sheet.text(&row.quantity.to_string(), 10.0, margin_left + col + 0.3, y, &regular);
            sheet.text(&peso(row.unit_price), 10.0, margin_left + col * 2.0, y, &regular);
            sheet.text(&peso(row.total_price), 10.0, margin_left + col * 3.0, y, &regular);
            y += 0.17;
        }
        sheet.hline(margin_left, margin_left + col * 3.65, y);
        y += 0.2;
    }

    sheet.text("Thank you for your business!", 12.0, margin_left, y, &regular);

    let summary_x = margin_left + 3.7;
    let mut summary_y = y;
    sheet.text(
        &format!("SUBTOTAL: {}", peso(grand_total(&groups))),
        10.0,
        summary_x,
        summary_y,
        &regular,
    );
    summary_y += 0.2;
    sheet.text("DOWNPAYMENT: _________", 10.0, summary_x, summary_y, &regular);
    summary_y += 0.2;
    sheet.text("TAX: ____________________", 10.0, summary_x, summary_y, &regular);
    summary_y += 0.2;
    sheet.text("TOTAL (balance): __________", 10.0, summary_x, summary_y, &regular);

    let mut contact_y = summary_y + 0.3;
    sheet.text_centered("If you have any questions, please contact:", 12.0, contact_y, &bold);
    contact_y += 0.3;
    sheet.text_centered("MA PEARL MACAWILI", 10.0, contact_y, &regular);
    contact_y += 0.2;
    sheet.text_centered("09162865399", 10.0, contact_y, &regular);
    contact_y += 0.2;
    sheet.text_centered("weguaranteeonline@gmail.com", 10.0, contact_y, &regular);

    save_pdf(doc)
}

fn save_pdf(doc: printpdf::PdfDocumentReference) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))
        .map_err(|e| e.to_string())?;
    Ok(bytes)
}

// ---- browser download ----

fn trigger_download(blob: &web_sys::Blob, filename: &str) {
    if let Ok(url) = web_sys::Url::create_object_url_with_blob(blob) {
        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                if let Ok(anchor) = document.create_element("a") {
                    let anchor: web_sys::HtmlAnchorElement = anchor.unchecked_into();
                    anchor.set_href(&url);
                    anchor.set_download(filename);
                    anchor.click();
                    let _ = web_sys::Url::revoke_object_url(&url);
                }
            }
        }
    }
}

pub fn download_bytes(bytes: &[u8], mime: &str, filename: &str) {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let props = web_sys::BlobPropertyBag::new();
    props.set_type(mime);
    if let Ok(blob) = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &props) {
        trigger_download(&blob, filename);
    }
}

pub fn download_text(text: &str, mime: &str, filename: &str) {
    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(text));
    let props = web_sys::BlobPropertyBag::new();
    props.set_type(mime);
    if let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&parts, &props) {
        trigger_download(&blob, filename);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Business;

    fn inquiry(service: &str, name: &str, price: &str) -> Inquiry {
        Inquiry {
            name: name.to_string(),
            price: price.to_string(),
            service: service.to_string(),
        }
    }

    #[test]
    fn test_duplicate_inquiries_merge_into_one_row() {
        let inquiries = vec![
            inquiry("BIR", "Form 1701", "500"),
            inquiry("BIR", "Form 1701", "500"),
        ];
        let groups = group_inquiries(&inquiries);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "BIR");
        assert_eq!(groups[0].1.len(), 1);

        let row = &groups[0].1[0];
        assert_eq!(row.quantity, 2);
        assert_eq!(row.unit_price, 500.0);
        assert_eq!(row.total_price, 1000.0);
        assert_eq!(row.quantity as f64 * row.unit_price, row.total_price);
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let inquiries = vec![
            inquiry("DTI", "Registration", "300"),
            inquiry("BIR", "Form 2551", "200"),
            inquiry("DTI", "Renewal", "150"),
        ];
        let groups = group_inquiries(&inquiries);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "DTI");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "BIR");
    }

    #[test]
    fn test_grand_total_equals_sum_of_individual_prices() {
        let inquiries = vec![
            inquiry("BIR", "Form 1701", "500"),
            inquiry("BIR", "Form 1701", "500"),
            inquiry("BIR", "Form 2551", "250.50"),
            inquiry("DTI", "Registration", "300"),
        ];
        let expected: f64 = inquiries.iter().map(Inquiry::price_value).sum();
        let groups = group_inquiries(&inquiries);
        assert_eq!(grand_total(&groups), expected);
    }

    #[test]
    fn test_empty_inquiries_yield_zero_total_and_no_rows() {
        let transaction = Transaction::default();
        assert_eq!(transaction_total(&transaction), 0.0);
        let groups = group_inquiries(&transaction.inquiries);
        assert!(groups.is_empty());
        assert_eq!(grand_total(&groups), 0.0);

        // An empty receipt is still a valid document, not an error.
        let bytes = receipt_pdf(&transaction, None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_unparsable_price_counts_as_zero() {
        let inquiries = vec![inquiry("BIR", "Form 1701", "free")];
        let groups = group_inquiries(&inquiries);
        assert_eq!(grand_total(&groups), 0.0);
    }

    #[test]
    fn test_match_client_is_case_insensitive_full_name_equality() {
        let clients = vec![
            Client {
                firstname: "Juan".to_string(),
                middlename: Some("Protacio".to_string()),
                lastname: "Dela Cruz".to_string(),
                ..Default::default()
            },
            Client {
                firstname: "Maria".to_string(),
                lastname: "Santos".to_string(),
                ..Default::default()
            },
        ];
        assert!(match_client(&clients, "JUAN PROTACIO DELA CRUZ").is_some());
        assert!(match_client(&clients, "Maria Santos").is_some());
        // Partial names do not join.
        assert!(match_client(&clients, "Juan Dela Cruz").is_none());
    }

    #[test]
    fn test_peso_formatting() {
        assert_eq!(peso(0.0), "Php 0.00");
        assert_eq!(peso(500.0), "Php 500.00");
        assert_eq!(peso(1000.0), "Php 1,000.00");
        assert_eq!(peso(1234567.5), "Php 1,234,567.50");
        assert_eq!(peso(-250.25), "-Php 250.25");
    }

    #[test]
    fn test_csv_quotes_and_flattens_inquiries() {
        let tx = Transaction {
            id: 7,
            name: "Juan \"JP\" Dela Cruz".to_string(),
            date: "2025-03-01".to_string(),
            business_name: "Sari-Sari Store".to_string(),
            tin_id: "123-456".to_string(),
            inquiries: vec![
                inquiry("BIR", "Form 1701", "500"),
                inquiry("DTI", "Registration", "300"),
            ],
            ..Default::default()
        };
        let csv = transactions_csv(&[tx]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"Juan \"\"JP\"\" Dela Cruz\""));
        assert!(lines[1].contains("Form 1701 (BIR): 500, Registration (DTI): 300"));
    }

    #[test]
    fn test_glyph_width_estimate_scales_with_text_and_size() {
        let narrow = Sheet::approx_width_in("Total", 10.0);
        let wide = Sheet::approx_width_in("Total: Php 1,000.00", 10.0);
        assert!(wide > narrow);
        // Half an em per glyph: 10 chars at 12pt spans 60pt.
        assert!((Sheet::approx_width_in("0123456789", 12.0) - 60.0 / 72.0).abs() < 1e-6);
    }

    #[test]
    fn test_receipt_and_invoice_render_valid_pdfs() {
        let client = Client {
            firstname: "Juan".to_string(),
            lastname: "Dela Cruz".to_string(),
            email: Some("juan@example.com".to_string()),
            contact_number: Some("09170000000".to_string()),
            business: vec![Business {
                business_name: "JDC Trading".to_string(),
                registered_address: "Batangas City".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let tx = Transaction {
            id: 42,
            name: "Juan Dela Cruz".to_string(),
            date: "2025-03-01".to_string(),
            inquiries: vec![
                inquiry("BIR", "Form 1701", "500"),
                inquiry("BIR", "Form 1701", "500"),
            ],
            ..Default::default()
        };

        let receipt = receipt_pdf(&tx, Some(&client)).unwrap();
        assert!(receipt.starts_with(b"%PDF"));

        let clients = vec![client];
        let invoice = invoice_pdf(std::slice::from_ref(&tx), &clients, "2025-03-02").unwrap();
        assert!(invoice.starts_with(b"%PDF"));
    }
}
