// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTML page rendering.
//!
//! The page template and the creation form are read once at startup. Rendering
//! is a pure substitution of `%key%` placeholders.

use std::fs;
use std::io;
use std::path::Path;

use crate::models::Record;

/// Page template with `%key%` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Replace every `%key%` with its value in a single pass. Unknown
    /// placeholders are left as is and inserted values are never rescanned.
    ///
    /// Values are inserted verbatim; escape user input before passing it in.
    pub fn render(&self, params: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let substitution = after.find('%').and_then(|end| {
                let key = &after[..end];
                params
                    .iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, value)| (*value, end))
            });
            match substitution {
                Some((value, end)) => {
                    out.push_str(value);
                    rest = &after[end + 1..];
                }
                None => {
                    out.push('%');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }

    /// Page showing a note.
    pub fn note_page(&self, record: &Record) -> String {
        let title = escape_html(record.id.as_str());
        let content = render_note(&record.content);
        self.render(&[("title", title.as_str()), ("content", content.as_str())])
    }

    /// Page showing an error message.
    pub fn error_page(&self, message: &str) -> String {
        let content = format!(
            "<div class=\"fullCenter\"><h1>{}</h1><h3><a href=\"/\">Return home?</a></h3></div>",
            escape_html(message)
        );
        self.render(&[("title", "Error"), ("content", content.as_str())])
    }
}

/// Static pages held in memory for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Pages {
    /// Creation/edit form served at `/`.
    pub index: String,
    pub template: Template,
}

impl Pages {
    /// Read `index.html` and `template.html` from `static_dir`.
    pub fn load(static_dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = static_dir.as_ref();
        Ok(Self {
            index: fs::read_to_string(dir.join("index.html"))?,
            template: Template::new(fs::read_to_string(dir.join("template.html"))?),
        })
    }
}

/// Display form of a note body: escaped, whitespace and line breaks kept.
pub fn render_note(content: &str) -> String {
    format!("<pre class=\"note\">{}</pre>", escape_html(content))
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
