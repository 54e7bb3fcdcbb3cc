// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

pub mod config;
pub mod error;
pub mod math;
pub mod pdf;
pub mod render;
pub mod template;
pub mod title;

pub use config::{MathBackend, Options, PageSize, PdfOptions, Theme};
pub use error::{Error, Result};
pub use math::preprocess_math;
pub use pdf::{ChromePdfRenderer, PdfRenderer};
pub use render::render_fragment;
pub use template::render_document;
pub use title::{extract_title, file_stem};

pub fn convert_to_document(markdown: &str, options: &Options) -> Result<String> {
    let fragment = render_fragment(markdown, options)?;
    Ok(render_document(&fragment, &extract_title(markdown), options))
}

pub fn convert_to_pdf(
    markdown: &str,
    options: &Options,
    renderer: &dyn PdfRenderer,
) -> Result<Vec<u8>> {
    let document = convert_to_document(markdown, options)?;
    renderer.render_pdf(&document)
}
