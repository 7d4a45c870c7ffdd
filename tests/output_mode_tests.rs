use creole_html::{Options, Parser, to_html_with_options};

fn xhtml(input: &str) -> String {
    to_html_with_options(input, &Options::xhtml())
}

fn wiki_parser() -> Parser {
    Parser::new().with_resolver(|uri: &str| format!("/wiki/{uri}"))
}

#[test]
fn test_xhtml_void_elements() {
    assert_eq!(xhtml("a\\\\b"), "<p>a<br/>b</p>\n");
    assert_eq!(xhtml("{{x.png|y}}"), "<p><img src=\"x.png\" alt=\"y\"/></p>\n");
    assert_eq!(xhtml("----"), "<hr/>\n");
}

#[test]
fn test_xhtml_only_changes_void_elements() {
    let input = "= T =\n* **a**\n|b|";
    assert_eq!(
        xhtml(input),
        to_html_with_options(input, &Options::default())
    );
}

#[test]
fn test_options() {
    assert!(Options::default().html5);
    assert!(!Options::xhtml().html5);
    assert_eq!(Parser::with_options(Options::xhtml()).options(), Options::xhtml());
}

#[test]
fn test_resolver_rewrites_relative_links() {
    assert_eq!(
        wiki_parser().parse("[[Page]]").html(),
        "<p><a href=\"/wiki/Page\">Page</a></p>\n"
    );
}

#[test]
fn test_resolver_rewrites_images() {
    assert_eq!(
        wiki_parser().parse("{{pic.png|P}}").html(),
        "<p><img src=\"/wiki/pic.png\" alt=\"P\"></p>\n"
    );
}

#[test]
fn test_interwiki_links_are_relative() {
    assert_eq!(
        wiki_parser().parse("[[Wiki:Page|W]]").html(),
        "<p><a href=\"/wiki/Wiki:Page\">W</a></p>\n"
    );
}

#[test]
fn test_absolute_and_free_links_are_not_resolved() {
    assert_eq!(
        wiki_parser().parse("[[https://a.org|A]] http://b.org").html(),
        "<p><a href=\"https://a.org\">A</a> <a href=\"http://b.org\">http://b.org</a></p>\n"
    );
}

#[test]
fn test_resolved_uri_is_escaped() {
    let parser = Parser::new().with_resolver(|uri: &str| format!("/w?p={uri}&v=1"));
    assert_eq!(
        parser.parse("[[X]]").html(),
        "<p><a href=\"/w?p=X&amp;v=1\">X</a></p>\n"
    );
}

#[test]
fn test_resolver_struct() {
    struct Prefix(&'static str);

    impl creole_html::LinkResolver for Prefix {
        fn resolve(&self, uri: &str) -> String {
            format!("{}{uri}", self.0)
        }
    }

    let parser = Parser::new().with_resolver(Prefix("../"));
    assert_eq!(parser.parse("[[a]]").html(), "<p><a href=\"../a\">a</a></p>\n");
}

#[test]
fn test_parser_shared_across_threads() {
    let parser = wiki_parser();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let parser = &parser;
                scope.spawn(move || parser.parse(format!("[[P{i}]]")).into_html())
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let html = handle.join().expect("thread panicked");
            assert_eq!(html, format!("<p><a href=\"/wiki/P{i}\">P{i}</a></p>\n"));
        }
    });
}

#[test]
fn test_parser_is_reusable() {
    let parser = Parser::new();
    let first = parser.parse("= One =");
    let second = parser.parse("text");
    assert_eq!(first.heading().map(|h| h.text.as_str()), Some("One"));
    assert!(second.heading().is_none());
    assert_eq!(second.html(), "<p>text</p>\n");
}
