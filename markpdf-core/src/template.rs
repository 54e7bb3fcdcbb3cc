// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use crate::config::{Options, Theme};
use crate::math::head_content;

pub const GITHUB_MARKDOWN_CSS: &str = include_str!("../assets/github-markdown.css");
pub const PRINT_CSS: &str = include_str!("../assets/print.css");

const MATH_CSS: &str = "
.markdown-body .math-display {
  display: block;
  margin: 1em 0;
  overflow-x: auto;
  text-align: center;
}
.markdown-body .math-error {
  color: #d1242f;
}
";

const PRINT_LAYOUT_CSS: &str = "
body {
  box-sizing: border-box;
  margin: 0;
  padding: 2rem;
  background: #fff;
}
.markdown-body {
  box-sizing: border-box;
  min-width: 200px;
  max-width: 794px;
  margin: 0 auto;
  padding: 0;
}
";

const GITHUB_LAYOUT_CSS: &str = "
body {
  box-sizing: border-box;
  margin: 0;
  padding: 40px;
  background: #fff;
}
.markdown-body {
  box-sizing: border-box;
  min-width: 200px;
  max-width: 980px;
  margin: 0 auto;
  font-size: 16px;
}
";

/// Wraps a rendered fragment into a standalone, styled HTML document.
pub fn render_document(fragment: &str, title: &str, options: &Options) -> String {
    let theme_css = match options.theme {
        Theme::Print => format!("{PRINT_LAYOUT_CSS}{PRINT_CSS}"),
        Theme::Github => GITHUB_LAYOUT_CSS.to_string(),
    };
    let math_head = head_content(options.math).unwrap_or_default();
    let title = escape_html(title);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>{GITHUB_MARKDOWN_CSS}</style>
  <style>{theme_css}{MATH_CSS}</style>
  {math_head}
</head>
<body>
  <article class="markdown-body">{fragment}</article>
</body>
</html>
"#
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
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
