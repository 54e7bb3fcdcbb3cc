// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, arg_required_else_help = true)]
pub struct CliArgs {
    /// YAML options file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Convert Markdown to a styled HTML document.
    Html {
        /// Markdown file, or `-` for stdin.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit only the rendered body, without the document wrapper.
        #[arg(long)]
        fragment: bool,
    },
    /// Convert Markdown to PDF through a headless browser.
    Pdf {
        /// Markdown file, or `-` for stdin.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Defaults to a name derived from the first line of the input.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Serve the editor page and the conversion API.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
}
