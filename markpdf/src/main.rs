// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::process::ExitCode;

use clap::Parser;
use markpdf::cli::CliArgs;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    match markpdf::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use clap::error::ErrorKind;
    use markpdf::cli::{CliArgs, Command};

    // 行为：html 子命令只给输入文件时 output 为空、默认输出整篇文档。
    #[test]
    fn parse_html_input_only() {
        let args = CliArgs::try_parse_from(["markpdf", "html", "a.md"]).unwrap();
        assert_eq!(
            args.command,
            Command::Html {
                input: PathBuf::from("a.md"),
                output: None,
                fragment: false,
            }
        );
        assert_eq!(args.config, None);
    }

    // 行为：支持短参数 -o 与 --fragment，并且允许与输入混排。
    #[test]
    fn parse_html_output_and_fragment_mixed() {
        let args =
            CliArgs::try_parse_from(["markpdf", "html", "-o", "out.html", "a.md", "--fragment"])
                .unwrap();
        assert_eq!(
            args.command,
            Command::Html {
                input: PathBuf::from("a.md"),
                output: Some(PathBuf::from("out.html")),
                fragment: true,
            }
        );
    }

    // 行为：--config 是全局参数，可以写在子命令之后。
    #[test]
    fn parse_global_config_after_subcommand() {
        let args =
            CliArgs::try_parse_from(["markpdf", "pdf", "a.md", "--config", "c.yaml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("c.yaml")));
        assert_eq!(
            args.command,
            Command::Pdf {
                input: PathBuf::from("a.md"),
                output: None,
            }
        );
    }

    // 行为：serve 默认监听 127.0.0.1:3000。
    #[test]
    fn parse_serve_defaults() {
        let args = CliArgs::try_parse_from(["markpdf", "serve"]).unwrap();
        assert_eq!(
            args.command,
            Command::Serve {
                host: "127.0.0.1".to_string(),
                port: 3000,
            }
        );
    }

    // 行为：重复指定 -o 会报错。
    #[test]
    fn error_on_duplicate_output() {
        let err = CliArgs::try_parse_from([
            "markpdf", "pdf", "-o", "a.pdf", "-o", "b.pdf", "input.md",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    // 行为：端口不是数字会报错。
    #[test]
    fn error_on_invalid_port() {
        let err = CliArgs::try_parse_from(["markpdf", "serve", "--port", "http"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    // 行为：缺少输入文件会报错。
    #[test]
    fn error_on_missing_input() {
        let err = CliArgs::try_parse_from(["markpdf", "html"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    // 行为：未知参数会报错。
    #[test]
    fn error_on_unknown_argument() {
        let err = CliArgs::try_parse_from(["markpdf", "html", "a.md", "--unknown"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
