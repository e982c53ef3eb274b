use sheetblog_core::Post;
use sheetblog_sheet::{
    parse_document, parse_document_strict, parse_line, parse_records, to_csv_string,
    validate_document, SheetError,
};

const HEADER: &str = "Judul,Label,Gambar,Body,Slug,Meta Deskripsi,Status,Tanggal Jam,Tipe";

fn doc(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push_str("\r\n");
        text.push_str(row);
    }
    text
}

// ===== Tokenizer =====

#[test]
fn test_quoted_fields() {
    assert_eq!(
        parse_line(r#"a,"b,c","d""e",f"#),
        vec!["a", "b,c", "d\"e", "f"]
    );
}

// ===== Header mapping =====

#[test]
fn test_all_canonical_fields_populated_and_trimmed() {
    let text = doc(&[
        r#" Halo Dunia , "Rust, CSV" , https://img.example/a.png ,"<p>Isi, penuh</p>", halo-dunia , Ringkasan ,Publish, 2024-05-01 10:00 , Post "#,
    ]);
    let posts = parse_document(&text);

    assert_eq!(posts.len(), 1);
    let post = &posts[0];
    assert_eq!(post.judul, "Halo Dunia");
    assert_eq!(post.label, "Rust, CSV");
    assert_eq!(post.gambar, "https://img.example/a.png");
    assert_eq!(post.body, "<p>Isi, penuh</p>");
    assert_eq!(post.slug, "halo-dunia");
    assert_eq!(post.meta_deskripsi, "Ringkasan");
    assert_eq!(post.status, "Publish");
    assert_eq!(post.tanggal_jam, "2024-05-01 10:00");
    assert_eq!(post.tipe, "Post");
    assert!(post.extras.is_empty());
}

#[test]
fn test_headers_trimmed_before_mapping() {
    let text = "  Judul , Status ,Meta Deskripsi \nHalo,Publish,ringkas\n";
    let posts = parse_document(text);
    assert_eq!(posts[0].judul, "Halo");
    assert_eq!(posts[0].meta_deskripsi, "ringkas");
}

#[test]
fn test_unmapped_headers_kept_as_extras() {
    let text = "Judul,Penulis,Status,Views\nHalo,Admin,Publish,42\n";
    let posts = parse_document(text);

    let extras: Vec<(&str, &str)> = posts[0]
        .extras
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(extras, vec![("Penulis", "Admin"), ("Views", "42")]);
}

#[test]
fn test_header_case_matters() {
    let text = "judul,Status\nHalo,Publish\n";
    let posts = parse_document(text);
    assert_eq!(posts[0].judul, "");
    assert_eq!(posts[0].extra("judul"), Some("Halo"));
}

// ===== Status filter =====

#[test]
fn test_status_filter_exact_match() {
    let text = doc(&[
        "A,,,,a,,Publish,,Post",
        "B,,,,b,,publish,,Post",
        "C,,,,c,,Draft,,Post",
        "D,,,,d,, Publish ,,Post",
        "E,,,,e,,PUBLISH,,Post",
        "F,,,,f,,,,Post",
    ]);
    let slugs: Vec<String> = parse_document(&text).into_iter().map(|p| p.slug).collect();
    assert_eq!(slugs, vec!["a", "d"]);
}

#[test]
fn test_filter_agrees_with_raw_records() {
    let text = doc(&[
        "A,,,,a,,Publish,,Post",
        "B,,,,b,,Draft,,Page",
        "C,,,,c,,Publish,,Page",
    ]);
    let expected: Vec<Post> = parse_records(&text)
        .into_iter()
        .filter(|p| p.status.trim() == "Publish")
        .collect();
    assert_eq!(parse_document(&text), expected);
}

#[test]
fn test_missing_status_column_publishes_nothing() {
    assert!(parse_document("Judul,Slug\nHalo,halo\n").is_empty());
}

// ===== Tolerance =====

#[test]
fn test_short_row_fills_empty_strings() {
    let text = "Judul,Slug,Status,Tipe,Label\nHalo,halo,Publish\n";
    let posts = parse_document(text);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].tipe, "");
    assert_eq!(posts[0].label, "");
}

#[test]
fn test_blank_lines_skipped() {
    let text = format!(
        "{HEADER}\n\nA,,,,a,,Publish,,Post\n   \n\r\nB,,,,b,,Publish,,Post\n\n"
    );
    let posts = parse_document(&text);
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].slug, "b");
}

#[test]
fn test_stray_quote_does_not_fail() {
    let text = doc(&[r#""Unclosed,,,,x,,Publish,,Post"#, "Ok,,,,ok,,Publish,,Post"]);
    let posts = parse_document(&text);
    // The unterminated row swallows its commas and loses its status.
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].slug, "ok");
}

#[test]
fn test_duplicate_slugs_kept_in_order() {
    let text = doc(&["Satu,,,,sama,,Publish,,Post", "Dua,,,,sama,,Publish,,Post"]);
    let titles: Vec<String> = parse_document(&text).into_iter().map(|p| p.judul).collect();
    assert_eq!(titles, vec!["Satu", "Dua"]);
}

#[test]
fn test_parse_is_idempotent() {
    let text = doc(&[
        r#"A,"x, y",,"<h2>Hi</h2>",a,,Publish,,Post"#,
        "B,,,,b,,Draft,,Post",
    ]);
    assert_eq!(parse_document(&text), parse_document(&text));
}

// ===== Strict mode =====

#[test]
fn test_strict_accepts_clean_document() {
    let text = doc(&["A,,,,a,,Publish,,Post", "B,,,,b,,Draft,,Post"]);
    assert!(validate_document(&text).is_empty());
    assert_eq!(parse_document_strict(&text).unwrap(), parse_document(&text));
}

#[test]
fn test_strict_reports_every_issue() {
    let text = format!(
        "{HEADER}\nA,,,,a,,Publish,,Post\n\nShort,row\n\"Open,,,,o,,Publish,,Post\nDup,,,,a,,Publish,,Post\n"
    );
    let issues = validate_document(&text);
    let lines: Vec<Option<usize>> = issues.iter().map(SheetError::line).collect();

    assert_eq!(issues.len(), 4);
    assert!(matches!(
        issues[0],
        SheetError::RowLength {
            line: 4,
            expected: 9,
            actual: 2
        }
    ));
    assert!(matches!(issues[1], SheetError::UnterminatedQuote { line: 5 }));
    assert!(matches!(issues[2], SheetError::RowLength { line: 5, .. }));
    assert!(matches!(
        &issues[3],
        SheetError::DuplicateSlug { slug, line: 6, first_line: 2 } if slug == "a"
    ));
    assert_eq!(lines, vec![Some(4), Some(5), Some(5), Some(6)]);
}

#[test]
fn test_strict_ignores_duplicate_drafts() {
    let text = doc(&["A,,,,a,,Draft,,Post", "B,,,,a,,Publish,,Post"]);
    assert!(validate_document(&text).is_empty());
}

#[test]
fn test_strict_missing_header() {
    assert!(matches!(
        parse_document_strict("\n \n"),
        Err(SheetError::MissingHeader)
    ));
}

// ===== Export =====

#[test]
fn test_export_then_parse() {
    let text = doc(&[
        r#"Halo,"Rust, CSV",img.png,"<p>a ""quote""</p>",halo,Ringkas,Publish,2024-01-01,Post"#,
        "Tentang,,,,about-us,,Publish,,Page",
    ]);
    let posts = parse_document(&text);
    let exported = to_csv_string(&posts).unwrap();
    assert_eq!(parse_document(&exported), posts);
}
