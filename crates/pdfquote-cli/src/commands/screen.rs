//! Terminal rendering of a render model.

use console::style;

use pdfquote_core::render::format_word_count;
use pdfquote_core::{Notice, NoticeKind, RenderModel, RenderOptions, Severity};

pub const TITLE: &str = "Interactive PDF Text Extraction & Flexible Quotation Calculation";
const TEXT_HEADING: &str = "Extracted Text";
const QUOTATION_HEADING: &str = "Quotation Calculation";

/// What the status line says about the current input.
pub struct ScreenHeader<'a> {
    pub source: Option<&'a str>,
    pub options: &'a RenderOptions,
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn notice_line(notice: &Notice) -> String {
    match notice.severity {
        Severity::Info => format!("{} {}", style("ℹ").blue(), notice.message),
        Severity::Error => format!("{} {}", style("✗").red(), style(&notice.message).red()),
    }
}

fn is_quotation_notice(notice: &Notice) -> bool {
    matches!(
        notice.kind,
        NoticeKind::QuotationMismatch | NoticeKind::QuotationOverflow
    )
}

/// Lay out the screen top to bottom.
pub fn render_screen(model: &RenderModel, header: &ScreenHeader<'_>) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", style(TITLE).bold()));
    let pages = match model.page_count {
        Some(count) => format!("{} of {} pages", header.options.pages, count),
        None => header.options.pages.to_string(),
    };
    output.push_str(&format!(
        "File: {} | {} | breakdown: {} | word count: {}\n",
        header.source.unwrap_or("(none)"),
        pages,
        on_off(header.options.show_item_breakdown),
        on_off(header.options.show_word_count),
    ));
    output.push('\n');

    if let Some(text) = &model.extracted_text {
        output.push_str(&format!("{}\n", style(TEXT_HEADING).bold().underlined()));
        output.push_str(text);
        if !text.ends_with('\n') {
            output.push('\n');
        }
        output.push('\n');
    }

    if let Some(total_line) = &model.total_line {
        output.push_str(&format!("{}\n", style(QUOTATION_HEADING).bold().underlined()));
        output.push_str(&format!("{}\n", total_line));
        for line in &model.breakdown {
            output.push_str(&format!("  {}\n", line));
        }
    }

    for notice in model.notices.iter().filter(|n| is_quotation_notice(n)) {
        output.push_str(&format!("{}\n", notice_line(notice)));
    }

    if let Some(count) = model.word_count {
        output.push_str(&format!("{}\n", format_word_count(count)));
    }

    for notice in model.notices.iter().filter(|n| !is_quotation_notice(n)) {
        output.push_str(&format!("{}\n", notice_line(notice)));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfquote_core::render::{MALFORMED_MESSAGE, MISMATCH_MESSAGE};
    use pdfquote_core::{LineItem, Quotation};

    fn model_with_quotation() -> RenderModel {
        let item = LineItem {
            name: "apple".to_string(),
            quantity_text: "4".to_string(),
            unit_price_text: "10".to_string(),
            quantity: 4,
            unit_price: 10,
            line_total: 40,
        };
        RenderModel {
            page_count: Some(1),
            extracted_text: Some("apple = 4\nprice = Rs 10\n".to_string()),
            quotation: Some(Quotation { items: vec![item], total: 40 }),
            total_line: Some("Total Quotation: Rs 40".to_string()),
            breakdown: vec!["Apple: 4 units at Rs 10 each, Total: Rs 40".to_string()],
            word_count: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn test_screen_order() {
        let options = RenderOptions::default().with_item_breakdown(true).with_word_count(true);
        let header = ScreenHeader { source: Some("quote.pdf"), options: &options };
        let screen = render_screen(&model_with_quotation(), &header);

        let text_at = screen.find("apple = 4").unwrap();
        let total_at = screen.find("Total Quotation: Rs 40").unwrap();
        let item_at = screen.find("Apple: 4 units").unwrap();
        let count_at = screen.find("Word Count: 7").unwrap();
        assert!(text_at < total_at && total_at < item_at && item_at < count_at);
        assert!(screen.contains("File: quote.pdf | all pages of 1 pages"));
        assert!(screen.lines().skip(1).any(|line| line.contains(QUOTATION_HEADING)));
    }

    #[test]
    fn test_mismatch_sits_before_word_count() {
        let mut model = model_with_quotation();
        model.quotation = None;
        model.total_line = None;
        model.breakdown.clear();
        model.notices.push(Notice {
            kind: NoticeKind::QuotationMismatch,
            severity: Severity::Error,
            message: MISMATCH_MESSAGE.to_string(),
        });
        let options = RenderOptions::default().with_word_count(true);
        let header = ScreenHeader { source: None, options: &options };
        let screen = render_screen(&model, &header);

        assert!(!screen.contains("Total Quotation"));
        assert!(!screen.lines().skip(1).any(|line| line.contains(QUOTATION_HEADING)));
        assert!(screen.find(MISMATCH_MESSAGE).unwrap() < screen.find("Word Count: 7").unwrap());
    }

    #[test]
    fn test_error_only_screen() {
        let model = RenderModel {
            notices: vec![Notice {
                kind: NoticeKind::MalformedDocument,
                severity: Severity::Error,
                message: MALFORMED_MESSAGE.to_string(),
            }],
            ..Default::default()
        };
        let options = RenderOptions::default();
        let header = ScreenHeader { source: Some("bad.pdf"), options: &options };
        let screen = render_screen(&model, &header);

        assert!(screen.contains(MALFORMED_MESSAGE));
        assert!(!screen.contains(TEXT_HEADING));
    }
}
