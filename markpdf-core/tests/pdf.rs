// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::sync::Mutex;

use markpdf_core::{Options, PdfRenderer, convert_to_pdf};

#[derive(Default)]
struct RecordingRenderer {
    documents: Mutex<Vec<String>>,
}

impl PdfRenderer for RecordingRenderer {
    fn render_pdf(&self, html: &str) -> markpdf_core::Result<Vec<u8>> {
        self.documents.lock().unwrap().push(html.to_string());
        Ok(b"%PDF-1.7 fake".to_vec())
    }
}

struct FailingRenderer;

impl PdfRenderer for FailingRenderer {
    fn render_pdf(&self, _html: &str) -> markpdf_core::Result<Vec<u8>> {
        Err(markpdf_core::Error::Browser("no browser here".to_string()))
    }
}

// 行为：渲染器收到的是带样式的完整文档，返回值原样透传。
#[test]
fn renderer_receives_full_document() {
    let renderer = RecordingRenderer::default();
    let pdf = convert_to_pdf("# Report\n\ntext", &Options::default(), &renderer).unwrap();
    assert_eq!(pdf, b"%PDF-1.7 fake");

    let documents = renderer.documents.lock().unwrap();
    assert_eq!(documents.len(), 1);
    assert!(documents[0].contains("<title>Report</title>"));
    assert!(documents[0].contains("<h1>Report</h1>"));
}

// 行为：渲染器的错误原样向上传递。
#[test]
fn renderer_errors_propagate() {
    let err = convert_to_pdf("# Report", &Options::default(), &FailingRenderer).unwrap_err();
    assert_eq!(err.to_string(), "browser error: no browser here");
}
