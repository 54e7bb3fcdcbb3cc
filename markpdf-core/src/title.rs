// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const DEFAULT_TITLE: &str = "Markdown Preview";
pub const DEFAULT_FILE_STEM: &str = "markdown";
const MAX_FILE_STEM_CHARS: usize = 50;
const FORBIDDEN_FILE_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Everything except what `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Document title taken from the first non-blank line, without heading marks.
pub fn extract_title(markdown: &str) -> String {
    let first_line = markdown
        .split('\n')
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    let title = strip_heading_marks(first_line);
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// Download file name (without extension) derived from the first line.
///
/// Unlike [`extract_title`] this looks at the literal first line only, so a
/// document starting with a blank line gets [`DEFAULT_FILE_STEM`].
pub fn file_stem(markdown: &str) -> String {
    let first_line = markdown.split('\n').next().unwrap_or("");
    let stem = strip_heading_marks(first_line)
        .chars()
        .filter(|ch| !FORBIDDEN_FILE_NAME_CHARS.contains(ch))
        .take(MAX_FILE_STEM_CHARS)
        .collect::<String>();
    if stem.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        stem
    }
}

/// `Content-Disposition` value with a percent-encoded file name.
pub fn content_disposition(disposition: &str, stem: &str, extension: &str) -> String {
    let encoded = utf8_percent_encode(stem, URI_COMPONENT);
    format!("{disposition}; filename=\"{encoded}.{extension}\"")
}

fn strip_heading_marks(line: &str) -> &str {
    line.trim_start_matches('#').trim()
}
