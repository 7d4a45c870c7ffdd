//! Inline tree types.

/// A run of inline content.
///
/// Span variants exist only when both their opening and closing
/// delimiters were found in the source; unmatched delimiters stay in
/// `Text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Literal text (not yet HTML-escaped).
    Text(String),
    /// `**bold**`
    Bold(Vec<Inline>),
    /// `//italic//`
    Italic(Vec<Inline>),
    /// `__underline__`
    Underline(Vec<Inline>),
    /// `^^superscript^^`
    Superscript(Vec<Inline>),
    /// `,,subscript,,`
    Subscript(Vec<Inline>),
    /// `\\`
    LineBreak,
    /// `[[target|label]]`, `[[target]]` or a free-standing URL.
    Link {
        /// Link destination, as written.
        target: String,
        /// Parsed label; `None` renders the target as the link text.
        label: Option<Vec<Inline>>,
    },
    /// `{{target|alt}}` or `{{target}}`.
    Image {
        /// Image source, as written.
        target: String,
        /// Alternative text.
        alt: Option<String>,
    },
    /// Inline nowiki `{{{...}}}`, rendered as code.
    Code(String),
}

impl Inline {
    /// Child runs of a span variant.
    pub fn children(&self) -> Option<&[Inline]> {
        match self {
            Self::Bold(c)
            | Self::Italic(c)
            | Self::Underline(c)
            | Self::Superscript(c)
            | Self::Subscript(c) => Some(c),
            Self::Link { label: Some(c), .. } => Some(c),
            Self::Text(_)
            | Self::LineBreak
            | Self::Link { label: None, .. }
            | Self::Image { .. }
            | Self::Code(_) => None,
        }
    }
}

/// Append `text` to the output, merging with a preceding `Text` run.
pub(crate) fn push_text(out: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(Inline::Text(text.to_owned()));
    }
}

/// Plain-text rendering of inline content, markup removed.
///
/// Link labels stand in for links (the target when there is no label),
/// image alt text for images, and line breaks become spaces.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    collect_plain_text(inlines, &mut out);
    out
}

fn collect_plain_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::LineBreak => out.push(' '),
            Inline::Link { target, label: None } => out.push_str(target),
            Inline::Image { alt, .. } => {
                if let Some(alt) = alt {
                    out.push_str(alt);
                }
            }
            Inline::Bold(_)
            | Inline::Italic(_)
            | Inline::Underline(_)
            | Inline::Superscript(_)
            | Inline::Subscript(_)
            | Inline::Link { label: Some(_), .. } => {
                if let Some(children) = inline.children() {
                    collect_plain_text(children, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_text_merges() {
        let mut out = Vec::new();
        push_text(&mut out, "a");
        push_text(&mut out, "");
        push_text(&mut out, "b");
        assert_eq!(out, vec![Inline::Text("ab".into())]);
    }

    #[test]
    fn test_plain_text_strips_markup() {
        let inlines = vec![
            Inline::Bold(vec![Inline::Text("System".into())]),
            Inline::Text(" ".into()),
            Inline::Link {
                target: "x".into(),
                label: Some(vec![Inline::Italic(vec![Inline::Text("Overview".into())])]),
            },
        ];
        assert_eq!(plain_text(&inlines), "System Overview");
    }

    #[test]
    fn test_plain_text_leaf_variants() {
        let inlines = vec![
            Inline::Code("x".into()),
            Inline::LineBreak,
            Inline::Link { target: "http://a".into(), label: None },
            Inline::Image { target: "i.png".into(), alt: Some("pic".into()) },
        ];
        assert_eq!(plain_text(&inlines), "x http://apic");
    }
}
