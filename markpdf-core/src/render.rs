// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::borrow::Cow;

use comrak::nodes::{AstNode, NodeValue};

use crate::Result;
use crate::config::Options;
use crate::math::{preprocess_math, render_display_math, render_inline_math};

const DISPLAY_MATH_PLACEHOLDER_BASE: &str = "MARKPDFDISPLAYMATH";
const DISPLAY_MATH_PLACEHOLDER_SUFFIX: &str = "END";

/// Renders Markdown to the HTML fragment shown in the preview pane.
pub fn render_fragment(markdown: &str, options: &Options) -> Result<String> {
    let markdown = if options.preprocess_math {
        Cow::Owned(preprocess_outside_code(markdown))
    } else {
        Cow::Borrowed(markdown)
    };
    let extracted = extract_display_math(&markdown);

    let arena = comrak::Arena::new();
    let comrak_options = comrak_options(options.allow_raw_html);
    let root = comrak::parse_document(&arena, &extracted.markdown, &comrak_options);
    rewrite_nodes(root, &extracted, options);

    let mut html = String::new();
    comrak::format_html(root, &comrak_options, &mut html)?;
    tracing::debug!(
        display_math = extracted.blocks.len(),
        bytes = html.len(),
        "rendered fragment"
    );
    Ok(html)
}

fn comrak_options(allow_raw_html: bool) -> comrak::Options<'static> {
    let mut options = comrak::Options::default();
    options.extension.autolink = true;
    options.extension.footnotes = true;
    options.extension.math_dollars = true;
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.tasklist = true;
    // Rendered math is emitted as `NodeValue::Raw` and does not need this.
    options.render.unsafe_ = allow_raw_html;
    options
}

struct ExtractedMarkdown {
    markdown: String,
    blocks: Vec<String>,
    placeholder_prefix: String,
}

impl ExtractedMarkdown {
    fn block_literal(&self, placeholder: &str) -> Option<&str> {
        let number = placeholder
            .strip_prefix(&self.placeholder_prefix)?
            .strip_suffix(DISPLAY_MATH_PLACEHOLDER_SUFFIX)?;
        let index: usize = number.parse().ok()?;
        self.blocks.get(index).map(String::as_str)
    }
}

/// Runs [`preprocess_math`] on the prose between fenced code blocks only.
fn preprocess_outside_code(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut prose = String::new();
    let mut code_fence: Option<CodeFence> = None;

    for line in markdown.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        if let Some(fence) = &code_fence {
            if fence.is_closed_by(content) {
                code_fence = None;
            }
            out.push_str(line);
        } else if let Some(fence) = CodeFence::open(content) {
            out.push_str(&preprocess_math(&prose));
            prose.clear();
            code_fence = Some(fence);
            out.push_str(line);
        } else {
            prose.push_str(line);
        }
    }

    out.push_str(&preprocess_math(&prose));
    out
}

fn choose_placeholder_prefix(markdown: &str) -> String {
    use std::hash::{Hash, Hasher};

    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    markdown.hash(&mut hasher);
    let mut nonce = hasher.finish();

    loop {
        let prefix = format!("{DISPLAY_MATH_PLACEHOLDER_BASE}{nonce:x}X");
        if !markdown.contains(&prefix) {
            return prefix;
        }
        nonce = nonce.wrapping_add(1);
    }
}

/// Pulls `$$` fenced blocks out of the source so comrak never sees them.
///
/// A fence is a line that is exactly `$$` (trailing whitespace allowed)
/// outside fenced code. Each block becomes a placeholder paragraph; an
/// unclosed fence runs to the end of the document.
fn extract_display_math(markdown: &str) -> ExtractedMarkdown {
    let placeholder_prefix = choose_placeholder_prefix(markdown);
    let mut out = String::with_capacity(markdown.len());
    let mut blocks = Vec::new();
    let mut code_fence: Option<CodeFence> = None;

    let mut lines = markdown.split_inclusive('\n');
    while let Some(line) = lines.next() {
        let content = line.strip_suffix('\n').unwrap_or(line);

        if let Some(fence) = &code_fence {
            if fence.is_closed_by(content) {
                code_fence = None;
            }
            out.push_str(line);
            continue;
        }
        if let Some(fence) = CodeFence::open(content) {
            code_fence = Some(fence);
            out.push_str(line);
            continue;
        }

        if is_display_math_fence(content) {
            let mut literal = String::new();
            for next in lines.by_ref() {
                let next_content = next.strip_suffix('\n').unwrap_or(next);
                if is_display_math_fence(next_content) {
                    break;
                }
                literal.push_str(next);
            }

            let id = blocks.len();
            blocks.push(literal);
            out.push('\n');
            out.push_str(&placeholder_prefix);
            out.push_str(&id.to_string());
            out.push_str(DISPLAY_MATH_PLACEHOLDER_SUFFIX);
            out.push_str("\n\n");
            continue;
        }

        out.push_str(line);
    }

    ExtractedMarkdown {
        markdown: out,
        blocks,
        placeholder_prefix,
    }
}

fn is_display_math_fence(line: &str) -> bool {
    line.trim_end() == "$$"
}

struct CodeFence {
    marker: char,
    len: usize,
}

impl CodeFence {
    fn open(line: &str) -> Option<Self> {
        let trimmed = strip_fence_indent(line)?;
        let marker = trimmed.chars().next().filter(|ch| matches!(ch, '`' | '~'))?;
        let len = trimmed.chars().take_while(|&ch| ch == marker).count();
        (len >= 3).then_some(Self { marker, len })
    }

    fn is_closed_by(&self, line: &str) -> bool {
        let Some(trimmed) = strip_fence_indent(line) else {
            return false;
        };
        let len = trimmed.chars().take_while(|&ch| ch == self.marker).count();
        len >= self.len && trimmed[len * self.marker.len_utf8()..].trim().is_empty()
    }
}

/// Fences may be indented by up to three spaces.
fn strip_fence_indent(line: &str) -> Option<&str> {
    let trimmed = line.trim_start_matches(' ');
    (line.len() - trimmed.len() <= 3).then_some(trimmed)
}

enum Rewrite {
    Drop,
    InlineMath(String),
    DisplayMath(String),
}

fn rewrite_nodes<'a>(root: &'a AstNode<'a>, extracted: &ExtractedMarkdown, options: &Options) {
    let nodes = root.descendants().collect::<Vec<_>>();
    for node in nodes {
        let rewrite = match &node.data.borrow().value {
            NodeValue::HtmlBlock(_) | NodeValue::HtmlInline(_) if !options.allow_raw_html => {
                Some(Rewrite::Drop)
            }
            NodeValue::Math(math) => Some(Rewrite::InlineMath(render_inline_math(
                &math.literal,
                math.display_math,
                options.math,
            ))),
            NodeValue::Paragraph => placeholder_literal(node, extracted)
                .map(|literal| Rewrite::DisplayMath(render_display_math(literal, options.math))),
            _ => None,
        };

        match rewrite {
            Some(Rewrite::Drop) => node.detach(),
            Some(Rewrite::InlineMath(html)) => {
                node.data.borrow_mut().value = NodeValue::Raw(html);
            }
            Some(Rewrite::DisplayMath(html)) => {
                for child in node.children().collect::<Vec<_>>() {
                    child.detach();
                }
                node.data.borrow_mut().value = NodeValue::Raw(html + "\n");
            }
            None => {}
        }
    }
}

fn placeholder_literal<'a, 'e>(
    node: &'a AstNode<'a>,
    extracted: &'e ExtractedMarkdown,
) -> Option<&'e str> {
    let mut children = node.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }

    match &only.data.borrow().value {
        NodeValue::Text(text) => {
            let text: &str = text.as_ref();
            extracted.block_literal(text.trim())
        }
        _ => None,
    }
}
