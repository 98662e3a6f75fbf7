// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HTML report wrapping the demo SVGs.

use std::fmt::Write as _;

/// One chart in the report.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) notes: Vec<String>,
    pub(crate) svg: String,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>body{{font-family:sans-serif;margin:2em}}section{{margin-bottom:3em}}\
         pre{{background:#f4f4f4;padding:.5em}}</style></head><body>"
    );
    let _ = writeln!(out, "<h1>{title}</h1>");
    for section in sections {
        let _ = writeln!(out, "<section><h2>{}</h2>", section.title);
        if !section.notes.is_empty() {
            let _ = writeln!(out, "<pre>{}</pre>", section.notes.join("\n"));
        }
        out.push_str(&section.svg);
        out.push_str("</section>\n");
    }
    out.push_str("</body></html>\n");
    out
}
