// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use markpdf_core::{MathBackend, Options, Theme, convert_to_document, render_document};

// 行为：文档包含转义后的标题、GitHub 样式以及 article 包裹。
#[test]
fn document_wraps_fragment_with_title_and_styles() {
    let html = render_document("<p>x</p>", "Q&A <draft>", &Options::default());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<meta charset=\"utf-8\">"));
    assert!(html.contains("<title>Q&amp;A &lt;draft&gt;</title>"));
    assert!(html.contains(".markdown-body {"));
    assert!(html.contains(r#"<article class="markdown-body"><p>x</p></article>"#));
}

// 行为：print 主题使用 A4 宽度及打印样式。
#[test]
fn print_theme_uses_page_width() {
    let html = render_document("", "t", &Options::default());
    assert!(html.contains("max-width: 794px;"));
    assert!(html.contains("border-bottom: 3px solid #3b82f6;"));
    assert!(!html.contains("max-width: 980px;"));
}

// 行为：github 主题使用宽栏且不含打印样式。
#[test]
fn github_theme_uses_wide_column() {
    let options = Options {
        theme: Theme::Github,
        ..Default::default()
    };
    let html = render_document("", "t", &options);
    assert!(html.contains("max-width: 980px;"));
    assert!(html.contains("padding: 40px;"));
    assert!(!html.contains("border-bottom: 3px solid #3b82f6;"));
}

// 行为：只有 MathJax 后端会在 head 中加载脚本。
#[test]
fn mathjax_script_only_for_mathjax_backend() {
    let plain = render_document("", "t", &Options::default());
    assert!(!plain.contains("<script"));

    let options = Options {
        math: MathBackend::MathJax,
        ..Default::default()
    };
    let with_script = render_document("", "t", &options);
    assert!(with_script.contains("mathjax@3"));
}

// 行为：完整转换使用第一条非空行作为标题。
#[test]
fn convert_to_document_derives_title() {
    let html = convert_to_document("\n# Minutes\n\nbody\n", &Options::default()).unwrap();
    assert!(html.contains("<title>Minutes</title>"));
    assert!(html.contains("<h1>Minutes</h1>"));
}
