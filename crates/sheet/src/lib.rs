//! CSV ingestion for spreadsheet-backed posts.
//!
//! Turns the text of a published spreadsheet CSV export into [`Post`]
//! records: a quote-aware line tokenizer, a document parser that maps the
//! sheet's headers to canonical fields and keeps only published rows, an
//! opt-in strict validator, and a CSV writer.
//!
//! # Examples
//!
//! ```
//! use sheetblog_sheet::{parse_document, parse_line};
//!
//! assert_eq!(parse_line(r#"a,"b,c""#), vec!["a", "b,c"]);
//!
//! let csv = "Judul,Slug,Status,Tipe\nHalo,halo,Publish,Post\nDraf,draf,Draft,Post\n";
//! let posts = parse_document(csv);
//! assert_eq!(posts.len(), 1);
//! assert_eq!(posts[0].slug, "halo");
//! ```
//!
//! The permissive parser never fails. Strict validation is separate:
//!
//! ```
//! use sheetblog_sheet::{parse_document_strict, SheetError};
//!
//! let csv = "Judul,Slug,Status\n\"Halo,halo,Publish\n";
//! assert!(matches!(
//!     parse_document_strict(csv),
//!     Err(SheetError::UnterminatedQuote { line: 2 })
//! ));
//! ```
//!
//! [`Post`]: sheetblog_core::Post

mod document;
mod error;
mod export;
mod tokenizer;

/// Re-export document parsing.
pub use document::{
    build_record, parse_document, parse_document_strict, parse_headers, parse_records,
    source_lines, validate_document, SourceLine,
};
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export CSV export.
pub use export::{to_csv_string, write_csv};
/// Re-export the line tokenizer.
pub use tokenizer::{parse_line, tokenize, LineTokens};
