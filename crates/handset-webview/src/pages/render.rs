//! HTML for the generated blank and error documents.

use super::{BLANK_TITLE, ERROR_TITLE};

pub fn blank_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="theme-color" content="#ffffff">
<title>{BLANK_TITLE}</title>
<style>html,body{{margin:0;height:100%;background:#ffffff;}}</style>
</head>
<body></body>
</html>
"#
    )
}

pub fn error_html(code: i32, text: &str, url: &str) -> String {
    let text = escape_html(text);
    let url = escape_html(url);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="theme-color" content="#f5f5f5">
<title>{ERROR_TITLE}</title>
<style>
html,body{{margin:0;height:100%;background:#f5f5f5;color:#333;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",sans-serif;}}
main{{padding:48px 24px;text-align:center;}}
h1{{font-size:20px;font-weight:600;margin:0 0 12px;}}
.code{{font-size:44px;font-weight:700;color:#999;margin:0 0 8px;}}
.url{{font-size:12px;color:#888;word-break:break-all;margin-top:16px;}}
</style>
</head>
<body>
<main>
<p class="code" data-code="{code}">{code}</p>
<h1>{ERROR_TITLE}</h1>
<p class="text">{text}</p>
<p class="url">{url}</p>
</main>
</body>
</html>
"#
    )
}

pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
