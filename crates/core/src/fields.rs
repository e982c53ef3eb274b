//! Mapping from the spreadsheet's source-language headers to canonical field names.

use std::fmt;

/// One of the nine canonical post fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Judul,
    Label,
    Gambar,
    Body,
    Slug,
    MetaDeskripsi,
    Status,
    TanggalJam,
    Tipe,
}

impl CanonicalField {
    /// All fields in sheet column order.
    pub const ALL: [CanonicalField; 9] = [
        CanonicalField::Judul,
        CanonicalField::Label,
        CanonicalField::Gambar,
        CanonicalField::Body,
        CanonicalField::Slug,
        CanonicalField::MetaDeskripsi,
        CanonicalField::Status,
        CanonicalField::TanggalJam,
        CanonicalField::Tipe,
    ];

    /// Map a (trimmed) header label to its canonical field.
    ///
    /// Matching is exact and case-sensitive; anything else returns `None`
    /// and is kept by the caller under its literal text.
    pub fn from_header(header: &str) -> Option<Self> {
        match header {
            "Judul" => Some(Self::Judul),
            "Label" => Some(Self::Label),
            "Gambar" => Some(Self::Gambar),
            "Body" => Some(Self::Body),
            "Slug" => Some(Self::Slug),
            "Meta Deskripsi" => Some(Self::MetaDeskripsi),
            "Status" => Some(Self::Status),
            "Tanggal Jam" => Some(Self::TanggalJam),
            "Tipe" => Some(Self::Tipe),
            _ => None,
        }
    }

    /// Canonical field name, as used in serialized records.
    pub fn key(self) -> &'static str {
        match self {
            Self::Judul => "judul",
            Self::Label => "label",
            Self::Gambar => "gambar",
            Self::Body => "body",
            Self::Slug => "slug",
            Self::MetaDeskripsi => "metaDeskripsi",
            Self::Status => "status",
            Self::TanggalJam => "tanggalJam",
            Self::Tipe => "tipe",
        }
    }

    /// Source-language header text for this field.
    pub fn header(self) -> &'static str {
        match self {
            Self::Judul => "Judul",
            Self::Label => "Label",
            Self::Gambar => "Gambar",
            Self::Body => "Body",
            Self::Slug => "Slug",
            Self::MetaDeskripsi => "Meta Deskripsi",
            Self::Status => "Status",
            Self::TanggalJam => "Tanggal Jam",
            Self::Tipe => "Tipe",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
