//! Write records back out as CSV with the sheet's source-language headers.

use crate::error::Result;
use sheetblog_core::{CanonicalField, Post};
use std::io::Write;

/// Write `posts` as CSV.
///
/// The header row is the nine canonical columns in sheet order followed by
/// every extra column seen across `posts`, in first-seen order. A record
/// lacking an extra column writes an empty cell.
pub fn write_csv<'a, W, I>(posts: I, writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Post>,
    I::IntoIter: Clone,
{
    let posts = posts.into_iter();

    let mut extra_headers: Vec<&str> = Vec::new();
    for post in posts.clone() {
        for key in post.extras.keys() {
            if !extra_headers.contains(&key.as_str()) {
                extra_headers.push(key);
            }
        }
    }

    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);

    let header: Vec<&str> = CanonicalField::ALL
        .iter()
        .map(|f| f.header())
        .chain(extra_headers.iter().copied())
        .collect();
    csv_writer.write_record(&header)?;

    for post in posts {
        let record: Vec<&str> = CanonicalField::ALL
            .iter()
            .map(|f| post.field(*f))
            .chain(extra_headers.iter().map(|h| post.extra(h).unwrap_or("")))
            .collect();
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render `posts` as a CSV string.
pub fn to_csv_string(posts: &[Post]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(posts, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
