//! Response encodings for a [`Quotation`] and `Accept` header negotiation.

use crate::quote::types::Quotation;

/// Representation chosen for a quotation response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Full HTML document.
    Html,
    /// `{"Quote": ..., "Author": ...}` object.
    Json,
}

/// Pick the response format from an optional `Accept` header value.
///
/// `text/html` wins whenever it is listed; `application/json` and `*/*` select JSON. Media type
/// parameters (`;q=0.8`) are ignored and unknown types are skipped. Without a recognized type
/// the answer is JSON.
pub fn negotiate(accept: Option<&str>) -> Format {
    let Some(accept) = accept else {
        return Format::Json;
    };

    let wants_html = accept
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .map(str::trim)
        .any(|media_type| media_type.eq_ignore_ascii_case("text/html"));

    if wants_html { Format::Html } else { Format::Json }
}

/// Render a quotation as a standalone HTML document.
pub fn to_html(quote: &Quotation) -> String {
    format!(
        "\n<!DOCTYPE html>\n<html>\n<body>\n\n\
         <q style=font-size:200%;font-family:cursive>{}</q>\n\
         <p><i>{}</i></p>\n\n\
         </body>\n</html>",
        escape_html(&quote.text),
        escape_html(&quote.author)
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
