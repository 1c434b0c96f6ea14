//! Server-rendered HTML pages. Every interpolated value goes through
//! [`escape`].

use std::fmt::Write;

use axum::{http::StatusCode, response::Html};

use crate::{db::models::NameRecord, types::ShortenerView};

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:3rem auto;padding:0 1rem}\
input[type=text]{width:70%;padding:.4rem}.error{color:#b00020}.result{color:#1b5e20}";

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = escape(title),
    ))
}

pub fn shortener_page(view: &ShortenerView) -> Html<String> {
    let mut body = String::from("<h1>URL Shortener</h1>\n");
    body.push_str("<form method=\"post\" action=\"/\">\n");
    let _ = writeln!(
        body,
        "<input type=\"text\" name=\"long_url\" placeholder=\"Enter a long URL\" value=\"{}\" required>",
        escape(view.input_value.as_deref().unwrap_or_default())
    );
    body.push_str("<button type=\"submit\">Shorten</button>\n</form>\n");

    if let Some(message) = &view.error_message {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", escape(message));
    }
    if let Some(short_url) = &view.short_url {
        let short_url = escape(short_url);
        let _ = writeln!(
            body,
            "<p class=\"result\">Short URL: <a href=\"{short_url}\">{short_url}</a></p>"
        );
    }
    layout("URL Shortener", &body)
}

pub fn names_page(records: &[NameRecord]) -> Html<String> {
    let mut body = String::from("<h1>Names</h1>\n");
    body.push_str(
        "<form method=\"post\" action=\"/\">\n\
         <input type=\"text\" name=\"name\" placeholder=\"Your name\">\n\
         <button type=\"submit\">Submit</button>\n</form>\n",
    );
    body.push_str("<ul>\n");
    for record in records {
        let _ = writeln!(body, "<li>{}</li>", escape(&record.name));
    }
    body.push_str("</ul>\n");
    layout("Names", &body)
}

pub fn not_found_page(short_code: &str) -> Html<String> {
    let body = format!(
        "<h1>404 Not Found</h1>\n<p>No link exists for <code>{}</code>.</p>\n<p><a href=\"/\">Create a short link</a></p>\n",
        escape(short_code)
    );
    layout("Not Found", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let body = format!(
        "<h1>{}</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Back</a></p>\n",
        status,
        escape(message)
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn shortener_page_shows_result_fields() {
        let Html(page) = shortener_page(&ShortenerView::created("http://h/abc123".into()));
        assert!(page.contains("Short URL: <a href=\"http://h/abc123\">"));
        assert!(!page.contains("class=\"error\""));

        let Html(page) = shortener_page(&ShortenerView::error(
            "Invalid URL",
            Some("<script>".into()),
        ));
        assert!(page.contains("<p class=\"error\">Invalid URL</p>"));
        assert!(page.contains("value=\"&lt;script&gt;\""));
    }

    #[test]
    fn names_page_lists_records() {
        let records = vec![
            NameRecord {
                id: 1,
                name: "Ada".into(),
            },
            NameRecord {
                id: 2,
                name: "<b>Bob</b>".into(),
            },
        ];
        let Html(page) = names_page(&records);
        let ada = page.find("<li>Ada</li>").unwrap();
        let bob = page.find("<li>&lt;b&gt;Bob&lt;/b&gt;</li>").unwrap();
        assert!(ada < bob);
    }
}
