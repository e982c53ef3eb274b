//! Whole-document parsing: header row, row records, publish filter.

use crate::error::{Result, SheetError};
use crate::tokenizer::{parse_line, tokenize};
use sheetblog_core::Post;
use std::collections::HashMap;

const BOM: char = '\u{feff}';

/// Trim whitespace and stray byte-order marks, which `str::trim` keeps.
fn trim_cell(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

/// A non-blank physical line and its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Split on `\n` or `\r\n`, dropping lines that are blank after trimming.
///
/// One logical record per physical line: a quoted field cannot span lines.
pub fn source_lines(text: &str) -> Vec<SourceLine<'_>> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| SourceLine {
            number: idx + 1,
            text: line.strip_suffix('\r').unwrap_or(line),
        })
        .filter(|line| !trim_cell(line.text).is_empty())
        .collect()
}

/// Tokenize and trim the header row.
pub fn parse_headers(line: &str) -> Vec<String> {
    parse_line(line)
        .iter()
        .map(|h| trim_cell(h).to_string())
        .collect()
}

/// Build a record by walking `headers` in order.
///
/// Values are trimmed; a missing trailing value becomes an empty string.
/// Values beyond the last header are ignored.
pub fn build_record(headers: &[String], values: &[String]) -> Post {
    let mut post = Post::default();
    for (index, header) in headers.iter().enumerate() {
        let value = values.get(index).map_or("", |v| trim_cell(v));
        post.set_field(header, value);
    }
    post
}

/// Every row as a record, before the publish filter.
pub fn parse_records(text: &str) -> Vec<Post> {
    let lines = source_lines(text);
    let Some((header, rows)) = lines.split_first() else {
        return Vec::new();
    };
    let headers = parse_headers(header.text);

    rows.iter()
        .map(|line| build_record(&headers, &parse_line(line.text)))
        .collect()
}

/// Parse a CSV export into published posts, in file order.
///
/// Never fails: malformed rows still produce records (possibly with empty
/// fields), and a document without rows yields an empty vector. Only rows
/// whose `Status` is exactly `Publish` survive. Slugs are not deduplicated.
pub fn parse_document(text: &str) -> Vec<Post> {
    let records = parse_records(text);
    let total = records.len();
    let posts: Vec<Post> = records.into_iter().filter(Post::is_published).collect();
    tracing::debug!(
        rows = total,
        published = posts.len(),
        "parsed sheet document"
    );
    posts
}

/// Collect every structural issue in `text`.
///
/// Reports a missing header row, unterminated quotes, rows whose length
/// differs from the header, and duplicate slugs among published rows.
/// An empty result means the strict and permissive parses agree on intent.
pub fn validate_document(text: &str) -> Vec<SheetError> {
    let lines = source_lines(text);
    let Some((header, rows)) = lines.split_first() else {
        return vec![SheetError::MissingHeader];
    };

    let mut issues = Vec::new();

    let header_tokens = tokenize(header.text);
    if header_tokens.unterminated {
        issues.push(SheetError::UnterminatedQuote {
            line: header.number,
        });
    }
    let headers: Vec<String> = header_tokens
        .fields
        .iter()
        .map(|h| trim_cell(h).to_string())
        .collect();

    let mut slugs: HashMap<String, usize> = HashMap::new();
    for line in rows {
        let tokens = tokenize(line.text);
        if tokens.unterminated {
            issues.push(SheetError::UnterminatedQuote { line: line.number });
        }
        if tokens.fields.len() != headers.len() {
            issues.push(SheetError::RowLength {
                line: line.number,
                expected: headers.len(),
                actual: tokens.fields.len(),
            });
        }

        let post = build_record(&headers, &tokens.fields);
        if !post.is_published() || post.slug.is_empty() {
            continue;
        }
        if let Some(&first_line) = slugs.get(&post.slug) {
            issues.push(SheetError::DuplicateSlug {
                slug: post.slug,
                line: line.number,
                first_line,
            });
        } else {
            slugs.insert(post.slug, line.number);
        }
    }

    issues
}

/// Strict variant of [`parse_document`].
///
/// Returns the first issue [`validate_document`] finds, otherwise exactly
/// what [`parse_document`] returns.
pub fn parse_document_strict(text: &str) -> Result<Vec<Post>> {
    match validate_document(text).into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(parse_document(text)),
    }
}
