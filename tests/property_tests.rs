//! Property tests: the output is well formed for any input.

use creole_html::{Options, escape::escape_text, to_html, to_html_with_options};
use proptest::prelude::*;

const VOID_ELEMENTS: [&str; 3] = ["br", "hr", "img"];

/// Check that every tag in `html` is closed in reverse open order.
fn check_balanced(html: &str) -> Result<(), String> {
    let mut stack: Vec<&str> = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let end = after
            .find('>')
            .ok_or_else(|| format!("unterminated tag in {html:?}"))?;
        let tag = &after[..end];
        rest = &after[end + 1..];

        if let Some(name) = tag.strip_prefix('/') {
            match stack.pop() {
                Some(open) if open == name => {}
                other => return Err(format!("</{name}> closes {other:?} in {html:?}")),
            }
            continue;
        }

        let name = tag.split([' ', '/']).next().unwrap_or_default();
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(format!("bad tag <{tag}> in {html:?}"));
        }
        if !VOID_ELEMENTS.contains(&name) {
            stack.push(name);
        }
    }

    if stack.is_empty() {
        Ok(())
    } else {
        Err(format!("unclosed {stack:?} in {html:?}"))
    }
}

/// Fragments of Creole syntax, combined into documents.
const TOKENS: &[&str] = &[
    "**", "//", "__", "^^", ",,", "[[", "]]", "|", "|=", "{{", "}}", "{{{", "}}}", "~",
    "\\\\", "\n", "\n\n", "\n* ", "\n** ", "\n# ", "\n= ", " == ", "\n; ", "\n: ",
    "\n----\n", "\n{{{\n", "\n}}}\n", "http://x.org/a.", " ", "word", "<&>",
];

fn creole_document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(TOKENS), 0..60).prop_map(|tokens| tokens.concat())
}

proptest! {
    #[test]
    fn output_is_balanced(input in creole_document()) {
        let html = to_html(&input);
        prop_assert!(check_balanced(&html).is_ok(), "{:?}", check_balanced(&html));
    }

    #[test]
    fn xhtml_output_is_balanced(input in creole_document()) {
        let html = to_html_with_options(&input, &Options::xhtml());
        prop_assert!(check_balanced(&html).is_ok(), "{:?}", check_balanced(&html));
    }

    #[test]
    fn arbitrary_text_is_balanced(input in any::<String>()) {
        let html = to_html(&input);
        prop_assert!(check_balanced(&html).is_ok(), "{:?}", check_balanced(&html));
    }

    #[test]
    fn plain_text_is_only_escaped(input in "[a-z0-9<>&\"' ]{0,40}") {
        let trimmed = input.trim();
        let expected = if trimmed.is_empty() {
            String::new()
        } else {
            format!("<p>{}</p>\n", escape_text(trimmed))
        };
        prop_assert_eq!(to_html(&input), expected);
    }

    #[test]
    fn heading_text_has_no_markup(words in "[a-z]{1,8}( [a-z]{1,8}){0,4}") {
        let result = creole_html::parse(format!("== **{words}** =="));
        let heading = result.heading().map(|h| h.text.clone());
        prop_assert_eq!(heading, Some(words));
    }
}

#[test]
fn test_checker_rejects_unbalanced() {
    assert!(check_balanced("<p><em>x</p></em>").is_err());
    assert!(check_balanced("<ul>\n<li>x</li>\n").is_err());
    assert!(check_balanced("<p>a<br>b<img src=\"x\"/></p>").is_ok());
}
