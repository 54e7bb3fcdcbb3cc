// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::MathBackend;
use crate::template::escape_html;

const DISPLAY_MATH_REPLACEMENT: &str = "\n$$$$\n${1}\n$$$$\n";
const DISPLAY_FENCE_REPLACEMENT: &str = "\n$$$$\n";
const INLINE_MATH_REPLACEMENT: &str = "$$${1}$$";

static ESCAPED_PAREN: LazyLock<Regex> = LazyLock::new(|| regex(r"\\\(([^)]+)\\\)"));
static LATEX_PAREN: LazyLock<Regex> = LazyLock::new(|| regex(r"\(([^)]*\\[^)]+[^)]*)\)"));
static ESCAPED_BRACKET: LazyLock<Regex> = LazyLock::new(|| regex(r"\\\[([^\]]+)\\\]"));
static OPENING_BRACKET_LINE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?mR)^\[\s*\n"));
static CLOSING_BRACKET_LINE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?mR)\n\s*\]$"));
static LATEX_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\[([^\]]*\\[^\]]+[^\]]*)\]"));

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("math delimiter patterns are valid")
}

/// Rewrites chat-style math delimiters into dollar math.
///
/// Inline `\(...\)` and parenthesised LaTeX become `$...$`. Display
/// `\[...\]`, bracketed LaTeX and bare `[` / `]` lines become `$$` fences on
/// their own lines. Rules run in a fixed order, each over the whole text.
pub fn preprocess_math(text: &str) -> String {
    let result = ESCAPED_PAREN.replace_all(text, INLINE_MATH_REPLACEMENT);
    let result = LATEX_PAREN.replace_all(&result, INLINE_MATH_REPLACEMENT);

    let result = ESCAPED_BRACKET.replace_all(&result, DISPLAY_MATH_REPLACEMENT);
    let result = OPENING_BRACKET_LINE.replace_all(&result, DISPLAY_FENCE_REPLACEMENT);
    let result = CLOSING_BRACKET_LINE.replace_all(&result, DISPLAY_FENCE_REPLACEMENT);
    let result = LATEX_BRACKET.replace_all(&result, DISPLAY_MATH_REPLACEMENT);

    result.into_owned()
}

/// Math that comrak found inside a paragraph.
///
/// Display math written inline (`$$x$$`) keeps block layout but stays in a
/// `<span>` so the surrounding paragraph remains valid HTML.
pub fn render_inline_math(latex: &str, display: bool, backend: MathBackend) -> String {
    let class = if display { "math math-display" } else { "math math-inline" };
    let body = match backend {
        MathBackend::MathMl => to_mathml(latex, display_style(display)).unwrap_or_else(|| {
            format!(r#"<code class="math-error">{}</code>"#, escape_html(latex))
        }),
        MathBackend::MathJax if display => format!(r"\[{}\]", escape_html(latex)),
        MathBackend::MathJax => format!(r"\({}\)", escape_html(latex)),
    };
    format!(r#"<span class="{class}">{body}</span>"#)
}

/// A `$$` fenced block.
pub fn render_display_math(latex: &str, backend: MathBackend) -> String {
    let latex = latex.trim_matches(['\r', '\n']);
    match backend {
        MathBackend::MathMl => match to_mathml(latex, latex2mathml::DisplayStyle::Block) {
            Some(mathml) => format!(r#"<div class="math math-display">{mathml}</div>"#),
            None => format!(
                r#"<pre class="math-error"><code>{}</code></pre>"#,
                escape_html(latex)
            ),
        },
        MathBackend::MathJax => format!(
            r#"<div class="math math-display">\[{}\]</div>"#,
            escape_html(latex)
        ),
    }
}

fn display_style(display: bool) -> latex2mathml::DisplayStyle {
    if display {
        latex2mathml::DisplayStyle::Block
    } else {
        latex2mathml::DisplayStyle::Inline
    }
}

/// Extra `<head>` markup the backend needs in a standalone document.
pub fn head_content(backend: MathBackend) -> Option<&'static str> {
    match backend {
        MathBackend::MathMl => None,
        MathBackend::MathJax => Some(MATHJAX_HEAD),
    }
}

fn to_mathml(latex: &str, style: latex2mathml::DisplayStyle) -> Option<String> {
    match latex2mathml::latex_to_mathml(latex, style) {
        Ok(mathml) => Some(mathml),
        Err(err) => {
            tracing::warn!(%err, latex, "cannot convert math to MathML, keeping source");
            None
        }
    }
}

const MATHJAX_HEAD: &str = r#"<script>
  window.MathJax = {
    tex: { inlineMath: [['\\(', '\\)']], displayMath: [['\\[', '\\]']] },
    svg: { fontCache: 'global' }
  };
</script>
<script defer src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>"#;
