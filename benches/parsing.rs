//! Performance benchmarks for creole-html
//!
//! Run with: cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Sample Creole documents of various sizes
mod samples {
    pub const TINY: &str = "Hello, **world**!";

    pub const SMALL: &str = r#"= Heading =

This is a paragraph with //emphasis// and **strong** text.

* Item 1
* Item 2
* Item 3

{{{inline nowiki}}} and [[https://example.com|a link]].
"#;

    pub const MEDIUM: &str = r#"= Project Page = top

This is a sample wiki page that demonstrates the Creole features.

== Features ==

* Single pass
** No backtracking
** Balanced output
* Free links like http://example.com/docs.

=== Code Example ===

{{{
fn main() {
    println!("Hello, world!");
}
}}}

== Reference ==

|= Markup |= Result |
| ~*~*bold~*~* | **bold** |
| ~/~/italic~/~/ | //italic// |
|| merged cell |

; Term
: Description with ^^super^^ and ,,sub,, text.

----

Thank you for reading!\\
[[Home|Back home]]
"#;

    /// Generate a large document by repeating sections
    pub fn large() -> String {
        let section = r#"
== Section Title ==

This paragraph contains various inline elements like //emphasis//, **strong**,
{{{code}}}, __underline__ and [[https://example.com|links]].

* First bullet point with **bold** text
* Second bullet point with //italic// text
*# A nested ordered item
* Third point with {{{code}}}

|= Name |= Value |
| alpha | 1 |
| beta | 2 |

Another paragraph to add some content. This helps test the parser's ability
to handle longer documents efficiently.

"#;
        section.repeat(50)
    }

    /// Pathological document with many potential delimiters
    pub fn pathological_emphasis() -> String {
        "**a //b __c ".repeat(1000)
    }

    /// Deeply nested lists
    pub fn pathological_nested() -> String {
        (1..=200).map(|depth| format!("{} deep\n", "*".repeat(depth))).collect()
    }

    /// Long rows of merged cell delimiters
    pub fn pathological_table() -> String {
        format!("{}x\n", "|".repeat(10_000)).repeat(10)
    }

    /// Unclosed links, nowiki and images on one line
    pub fn pathological_brackets() -> String {
        format!("{}{}{}", "[[".repeat(20_000), "{{{a}}".repeat(20_000), "{{a ".repeat(20_000))
    }

    /// A table row of cells that each open a link
    pub fn pathological_link_cells() -> String {
        format!("|{}", "[[|".repeat(20_000))
    }
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    // Tiny document
    group.throughput(Throughput::Bytes(samples::TINY.len() as u64));
    group.bench_function("tiny", |b| {
        b.iter(|| creole_html::to_html(black_box(samples::TINY)))
    });

    // Small document
    group.throughput(Throughput::Bytes(samples::SMALL.len() as u64));
    group.bench_function("small", |b| {
        b.iter(|| creole_html::to_html(black_box(samples::SMALL)))
    });

    // Medium document
    group.throughput(Throughput::Bytes(samples::MEDIUM.len() as u64));
    group.bench_function("medium", |b| {
        b.iter(|| creole_html::to_html(black_box(samples::MEDIUM)))
    });

    // Large document
    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large", |b| {
        b.iter(|| creole_html::to_html(black_box(&large)))
    });

    // Same document fed line by line
    let lines: Vec<&str> = large.lines().collect();
    group.bench_function("large_lines", |b| {
        b.iter(|| creole_html::parse(black_box(lines.as_slice())))
    });

    group.finish();
}

fn bench_escaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("escaping");

    // Plain text (no escaping needed)
    let plain = "Hello, this is plain text without any special characters. ".repeat(100);
    group.throughput(Throughput::Bytes(plain.len() as u64));
    group.bench_function("plain_text", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(plain.len());
            creole_html::escape::escape_text_into(&mut out, black_box(&plain));
            out
        })
    });

    // Text with HTML that needs escaping
    let html_heavy = "<script>alert('xss')</script> & more <tags> here! ".repeat(100);
    group.throughput(Throughput::Bytes(html_heavy.len() as u64));
    group.bench_function("html_heavy", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(html_heavy.len() * 2);
            creole_html::escape::escape_text_into(&mut out, black_box(&html_heavy));
            out
        })
    });

    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(20); // Fewer samples for slow cases

    let emphasis = samples::pathological_emphasis();
    group.throughput(Throughput::Bytes(emphasis.len() as u64));
    group.bench_function("delimiter_runs", |b| {
        b.iter(|| creole_html::to_html(black_box(&emphasis)))
    });

    let nested = samples::pathological_nested();
    group.throughput(Throughput::Bytes(nested.len() as u64));
    group.bench_function("nested_lists", |b| {
        b.iter(|| creole_html::to_html(black_box(&nested)))
    });

    let table = samples::pathological_table();
    group.throughput(Throughput::Bytes(table.len() as u64));
    group.bench_function("merged_cells", |b| {
        b.iter(|| creole_html::to_html(black_box(&table)))
    });

    let brackets = samples::pathological_brackets();
    group.throughput(Throughput::Bytes(brackets.len() as u64));
    group.bench_function("unclosed_brackets", |b| {
        b.iter(|| creole_html::to_html(black_box(&brackets)))
    });

    let link_cells = samples::pathological_link_cells();
    group.throughput(Throughput::Bytes(link_cells.len() as u64));
    group.bench_function("unclosed_link_cells", |b| {
        b.iter(|| creole_html::to_html(black_box(&link_cells)))
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_escaping, bench_pathological);
criterion_main!(benches);
