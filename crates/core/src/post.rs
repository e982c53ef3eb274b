//! The post record produced by the sheet parser.

use crate::fields::CanonicalField;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// The only status value that makes a row visible.
pub const PUBLISH_STATUS: &str = "Publish";

const WORDS_PER_MINUTE: usize = 200;

/// A single spreadsheet row, keyed by canonical field name.
///
/// Every value is the raw trimmed cell text. Columns whose header is not in
/// the canonical table are kept in `extras`, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub judul: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub gambar: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub meta_deskripsi: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tanggal_jam: String,
    #[serde(default)]
    pub tipe: String,
    /// Unmapped columns, keyed by their literal header text.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extras: IndexMap<String, String>,
}

/// Discriminates blog posts from static pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostKind {
    Post,
    Page,
}

impl PostKind {
    /// Parse the raw `tipe` cell. Exact match only.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Post" => Some(Self::Post),
            "Page" => Some(Self::Page),
            _ => None,
        }
    }
}

impl Post {
    /// Store `value` under the field named by `header`.
    ///
    /// Known headers land in their canonical field; any other header is kept
    /// in `extras`. A later column with the same key overwrites an earlier one.
    pub fn set_field(&mut self, header: &str, value: impl Into<String>) {
        let value = value.into();
        match CanonicalField::from_header(header) {
            Some(field) => *self.field_mut(field) = value,
            None => {
                self.extras.insert(header.to_string(), value);
            }
        }
    }

    /// Read a canonical field.
    pub fn field(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::Judul => &self.judul,
            CanonicalField::Label => &self.label,
            CanonicalField::Gambar => &self.gambar,
            CanonicalField::Body => &self.body,
            CanonicalField::Slug => &self.slug,
            CanonicalField::MetaDeskripsi => &self.meta_deskripsi,
            CanonicalField::Status => &self.status,
            CanonicalField::TanggalJam => &self.tanggal_jam,
            CanonicalField::Tipe => &self.tipe,
        }
    }

    fn field_mut(&mut self, field: CanonicalField) -> &mut String {
        match field {
            CanonicalField::Judul => &mut self.judul,
            CanonicalField::Label => &mut self.label,
            CanonicalField::Gambar => &mut self.gambar,
            CanonicalField::Body => &mut self.body,
            CanonicalField::Slug => &mut self.slug,
            CanonicalField::MetaDeskripsi => &mut self.meta_deskripsi,
            CanonicalField::Status => &mut self.status,
            CanonicalField::TanggalJam => &mut self.tanggal_jam,
            CanonicalField::Tipe => &mut self.tipe,
        }
    }

    /// Look up an unmapped column by its header text.
    pub fn extra(&self, header: &str) -> Option<&str> {
        self.extras.get(header).map(String::as_str)
    }

    /// True iff `status` is exactly `"Publish"`.
    pub fn is_published(&self) -> bool {
        self.status == PUBLISH_STATUS
    }

    /// Interpret `tipe`. The raw text is left untouched.
    pub fn kind(&self) -> Option<PostKind> {
        PostKind::parse(&self.tipe)
    }

    /// Labels split on `,`, trimmed, empty entries dropped.
    pub fn labels(&self) -> Vec<&str> {
        self.label
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }

    /// First label, if any.
    pub fn primary_label(&self) -> Option<&str> {
        self.labels().into_iter().next()
    }

    /// Whether `label` (trimmed) is one of this post's labels.
    pub fn has_label(&self, label: &str) -> bool {
        let label = label.trim();
        !label.is_empty() && self.labels().contains(&label)
    }

    /// Estimated reading time at 200 words per minute, rounded up, at least one.
    pub fn read_time_minutes(&self) -> usize {
        self.body
            .split_whitespace()
            .count()
            .div_ceil(WORDS_PER_MINUTE)
            .max(1)
    }

    /// The date portion of `tanggalJam` (everything before the first space).
    pub fn date_part(&self) -> &str {
        self.tanggal_jam
            .split(' ')
            .next()
            .unwrap_or(&self.tanggal_jam)
    }

    /// Text of every `<h2>` in the body, inner tags stripped.
    ///
    /// Used to build a table of contents for the detail view.
    pub fn headings(&self) -> Vec<String> {
        static H2: OnceLock<Regex> = OnceLock::new();
        static TAG: OnceLock<Regex> = OnceLock::new();
        let h2 = H2.get_or_init(|| Regex::new(r"<h2[^>]*>(.*?)</h2>").expect("valid regex"));
        let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>?").expect("valid regex"));

        h2.captures_iter(&self.body)
            .map(|caps| tag.replace_all(&caps[1], "").into_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with_body(body: &str) -> Post {
        Post {
            body: body.to_string(),
            ..Post::default()
        }
    }

    #[test]
    fn test_set_field_canonical_and_extra() {
        let mut post = Post::default();
        post.set_field("Judul", "Halo");
        post.set_field("Meta Deskripsi", "ringkas");
        post.set_field("Penulis", "Admin");

        assert_eq!(post.judul, "Halo");
        assert_eq!(post.meta_deskripsi, "ringkas");
        assert_eq!(post.extra("Penulis"), Some("Admin"));
        assert_eq!(post.extras.len(), 1);
    }

    #[test]
    fn test_set_field_last_duplicate_wins() {
        let mut post = Post::default();
        post.set_field("Slug", "first");
        post.set_field("Slug", "second");
        assert_eq!(post.slug, "second");
    }

    #[test]
    fn test_is_published_exact() {
        let mut post = Post::default();
        post.status = "Publish".to_string();
        assert!(post.is_published());

        post.status = "publish".to_string();
        assert!(!post.is_published());

        post.status = "Draft".to_string();
        assert!(!post.is_published());
    }

    #[test]
    fn test_kind() {
        let mut post = Post::default();
        post.tipe = "Page".to_string();
        assert_eq!(post.kind(), Some(PostKind::Page));

        post.tipe = "Post".to_string();
        assert_eq!(post.kind(), Some(PostKind::Post));

        post.tipe = "post".to_string();
        assert_eq!(post.kind(), None);
    }

    #[test]
    fn test_labels_trimmed_at_use() {
        let post = Post {
            label: "Rust, Web ,, CSV".to_string(),
            ..Post::default()
        };
        assert_eq!(post.labels(), vec!["Rust", "Web", "CSV"]);
        assert_eq!(post.primary_label(), Some("Rust"));
        assert!(post.has_label(" Web "));
        assert!(!post.has_label("We"));
        assert!(!post.has_label(""));
        // Storage keeps the raw text.
        assert_eq!(post.label, "Rust, Web ,, CSV");
    }

    #[test]
    fn test_read_time() {
        assert_eq!(post_with_body("").read_time_minutes(), 1);
        assert_eq!(post_with_body("satu dua tiga").read_time_minutes(), 1);

        let long = vec!["kata"; 401].join(" ");
        assert_eq!(post_with_body(&long).read_time_minutes(), 3);
    }

    #[test]
    fn test_date_part() {
        let post = Post {
            tanggal_jam: "2024-05-01 10:30".to_string(),
            ..Post::default()
        };
        assert_eq!(post.date_part(), "2024-05-01");
        assert_eq!(Post::default().date_part(), "");
    }

    #[test]
    fn test_headings() {
        let post = post_with_body(
            r#"<p>intro</p><h2 id="a">Pertama</h2><p>x</p><h2><b>Kedua</b> bagian</h2><h3>skip</h3>"#,
        );
        assert_eq!(post.headings(), vec!["Pertama", "Kedua bagian"]);
        assert!(post_with_body("no headings").headings().is_empty());
    }

    #[test]
    fn test_serde_canonical_names() {
        let mut post = Post {
            meta_deskripsi: "m".to_string(),
            tanggal_jam: "t".to_string(),
            ..Post::default()
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["metaDeskripsi"], "m");
        assert_eq!(json["tanggalJam"], "t");
        assert!(json.get("extras").is_none());

        post.extras.insert("Penulis".to_string(), "A".to_string());
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["extras"]["Penulis"], "A");

        let back: Post = serde_json::from_value(json).unwrap();
        assert_eq!(back, post);
    }
}
