// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

pub mod cli;
pub mod config;
pub mod server;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use markpdf_core::{ChromePdfRenderer, Options};

use crate::cli::{CliArgs, Command};

pub fn run(args: CliArgs) -> anyhow::Result<()> {
    let options =
        config::load_options(args.config.as_deref()).context("cannot load options")?;

    match args.command {
        Command::Html {
            input,
            output,
            fragment,
        } => {
            let markdown = read_input(&input)?;
            let html = if fragment {
                markpdf_core::render_fragment(&markdown, &options)?
            } else {
                markpdf_core::convert_to_document(&markdown, &options)?
            };
            write_output(output.as_deref(), html.as_bytes())
        }
        Command::Pdf { input, output } => {
            let markdown = read_input(&input)?;
            let output = output.unwrap_or_else(|| default_pdf_path(&markdown));
            convert_pdf_file(&markdown, &options, &output)
        }
        Command::Serve { host, port } => actix_web::rt::System::new()
            .block_on(server::serve(&host, port, options))
            .with_context(|| format!("server on {host}:{port} failed")),
    }
}

fn convert_pdf_file(markdown: &str, options: &Options, output: &Path) -> anyhow::Result<()> {
    let renderer = ChromePdfRenderer::new(options.pdf.clone());
    let pdf = markpdf_core::convert_to_pdf(markdown, options, &renderer)?;
    write_output(Some(output), &pdf)?;
    tracing::info!(output = %output.display(), bytes = pdf.len(), "wrote PDF");
    Ok(())
}

fn default_pdf_path(markdown: &str) -> PathBuf {
    PathBuf::from(format!("{}.pdf", markpdf_core::file_stem(markdown)))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut markdown = String::new();
        std::io::stdin()
            .read_to_string(&mut markdown)
            .context("cannot read Markdown from stdin")?;
        return Ok(markdown);
    }
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, bytes).with_context(|| format!("cannot write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
