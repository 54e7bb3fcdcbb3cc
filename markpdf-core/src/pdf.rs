// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::io::Write;
use std::time::Duration;

use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};

use crate::config::PdfOptions;
use crate::{Error, Result};

const MM_PER_INCH: f64 = 25.4;

/// Turns a standalone HTML document into PDF bytes.
pub trait PdfRenderer: Send + Sync {
    fn render_pdf(&self, html: &str) -> Result<Vec<u8>>;
}

/// Prints through a headless Chrome process started for each document.
#[derive(Clone, Debug, Default)]
pub struct ChromePdfRenderer {
    options: PdfOptions,
}

impl ChromePdfRenderer {
    pub fn new(options: PdfOptions) -> Self {
        Self { options }
    }

    fn launch_options(&self) -> Result<LaunchOptions<'static>> {
        LaunchOptions::default_builder()
            .headless(true)
            .sandbox(self.options.sandbox)
            .path(self.options.chrome_path.clone())
            .build()
            .map_err(|err| Error::Browser(format!("invalid launch options: {err}")))
    }

    fn print_options(&self) -> PrintToPdfOptions {
        let (paper_width, paper_height) = self.options.page_size.dimensions();
        let margin = f64::from(self.options.margin_mm) / MM_PER_INCH;
        PrintToPdfOptions {
            landscape: Some(self.options.landscape),
            display_header_footer: Some(false),
            print_background: Some(true),
            scale: Some(1.0),
            paper_width: Some(paper_width),
            paper_height: Some(paper_height),
            margin_top: Some(margin),
            margin_bottom: Some(margin),
            margin_left: Some(margin),
            margin_right: Some(margin),
            prefer_css_page_size: Some(false),
            ..Default::default()
        }
    }
}

impl PdfRenderer for ChromePdfRenderer {
    fn render_pdf(&self, html: &str) -> Result<Vec<u8>> {
        // Removed on drop, after the browser below has shut down.
        let mut page = tempfile::Builder::new()
            .prefix("markpdf-")
            .suffix(".html")
            .tempfile()?;
        page.write_all(html.as_bytes())?;
        page.flush()?;
        let url = format!("file://{}", page.path().display());

        tracing::debug!(%url, "launching headless browser");
        let browser = Browser::new(self.launch_options()?)
            .map_err(|err| Error::Browser(format!("failed to launch: {err}")))?;
        let tab = browser
            .new_tab()
            .map_err(|err| Error::Browser(format!("failed to open tab: {err}")))?;
        tab.navigate_to(&url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|err| Error::Browser(format!("failed to load document: {err}")))?;

        if self.options.render_delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.options.render_delay_ms));
        }

        let pdf = tab
            .print_to_pdf(Some(self.print_options()))
            .map_err(|err| Error::Browser(format!("failed to print: {err}")))?;
        tracing::debug!(bytes = pdf.len(), "printed document");
        Ok(pdf)
    }
}
