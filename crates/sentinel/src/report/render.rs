use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::profile::{ColumnProfile, FrameProfile};

/// Render a profile as a self-contained HTML document.
pub fn render_html(title: &str, profile: &FrameProfile, generated_at: DateTime<Utc>) -> String {
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>body{{font-family:sans-serif;margin:2em}}table{{border-collapse:collapse}}\
         td,th{{border:1px solid #ccc;padding:4px 8px;text-align:right}}th{{background:#f4f4f4}}</style>\n\
         </head>\n<body>\n<h1>{title}</h1>\n\
         <p>Generated {generated}</p>\n\
         <p>{rows} rows, {columns} columns, {missing:.1}% missing cells</p>\n\
         <table>\n<tr><th>Column</th><th>Type</th><th>Count</th><th>Missing</th><th>Distinct</th>\
         <th>Min</th><th>Max</th><th>Mean</th></tr>\n",
        title = escape(title),
        generated = generated_at.to_rfc3339(),
        rows = profile.rows,
        columns = profile.columns.len(),
        missing = profile.missing_ratio() * 100.0,
    );

    for column in &profile.columns {
        push_row(&mut html, column);
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

fn push_row(html: &mut String, column: &ColumnProfile) {
    let _ = writeln!(
        html,
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape(&column.name),
        column.kind,
        column.count,
        column.missing,
        column.distinct,
        number(column.min),
        number(column.max),
        number(column.mean),
    );
}

fn number(value: Option<f64>) -> String {
    value.map(|value| format!("{value:.4}")).unwrap_or_else(|| "-".to_string())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
