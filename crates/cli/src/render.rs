//! Terminal rendering of list, detail and label views.

use colored::{ColoredString, Colorize};
use sheetblog_core::{Post, PostPage, Preferences};
use sheetblog_sheet::SheetError;

const GRID_WIDTH: usize = 96;
const GUTTER: &str = "  ";

/// Accent color derived from the reader's preferences.
#[derive(Debug, Clone, Copy)]
pub struct Accent {
    rgb: (u8, u8, u8),
}

impl Accent {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        let palette = prefs.theme_color.palette();
        // Lighter shade reads better on dark terminals.
        let hex = if prefs.dark_mode {
            palette.shade_500
        } else {
            palette.shade_700
        };
        Self {
            rgb: hex_to_rgb(hex).unwrap_or((14, 165, 233)),
        }
    }

    pub fn paint(&self, text: &str) -> ColoredString {
        let (r, g, b) = self.rgb;
        text.truecolor(r, g, b)
    }
}

/// Parse `#rrggbb`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Plain-text lines of one post card.
fn card_lines(post: &Post, width: usize) -> Vec<String> {
    vec![
        truncate(&post.judul, width),
        truncate(
            &format!("{} · {} min read", post.date_part(), post.read_time_minutes()),
            width,
        ),
        truncate(&post.labels().join(" | "), width),
        truncate(&post.meta_deskripsi, width),
    ]
}

/// Lay posts out as cards, `columns` per row.
pub fn card_grid(posts: &[&Post], columns: u8, accent: Accent) -> String {
    let columns = usize::from(columns.max(1));
    let width = (GRID_WIDTH.saturating_sub(GUTTER.len() * (columns - 1)) / columns).max(1);
    let mut out = String::new();

    for row in posts.chunks(columns) {
        let cards: Vec<Vec<String>> = row.iter().map(|p| card_lines(p, width)).collect();
        let height = cards.iter().map(Vec::len).max().unwrap_or(0);

        for line_idx in 0..height {
            let cells: Vec<String> = cards
                .iter()
                .map(|card| {
                    let text = card.get(line_idx).map_or("", String::as_str);
                    let padded = pad(text, width);
                    if line_idx == 0 {
                        accent.paint(&padded).bold().to_string()
                    } else {
                        padded
                    }
                })
                .collect();
            out.push_str(cells.join(GUTTER).trim_end());
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Message shown whenever there is nothing to list.
pub fn empty_state() -> String {
    format!("{}\n", "No posts yet.".dimmed())
}

/// The home list: site header, card grid, pager.
pub fn list_view(site_name: &str, page: &PostPage<'_>, columns: u8, accent: Accent) -> String {
    let mut out = format!("{}\n", accent.paint(site_name).bold());
    if page.is_empty() {
        out.push_str(&empty_state());
        return out;
    }

    out.push_str(&format!(
        "{}\nShowing {}-{} of {} posts\n\n",
        "Latest Posts".bold(),
        page.first_index,
        page.last_index,
        page.total_items
    ));
    out.push_str(&card_grid(&page.items, columns, accent));

    if page.total_pages > 1 {
        let pages: Vec<String> = (1..=page.total_pages)
            .map(|n| {
                if n == page.number {
                    accent.paint(&format!("[{n}]")).bold().to_string()
                } else {
                    n.to_string()
                }
            })
            .collect();
        let prev = if page.has_previous() { "<" } else { " " };
        let next = if page.has_next() { ">" } else { " " };
        out.push_str(&format!("{prev} {} {next}\n", pages.join(" ")));
    }

    out
}

/// Posts carrying one label.
pub fn label_view(label: &str, posts: &[&Post], columns: u8, accent: Accent) -> String {
    let mut out = format!("{} {label}\n\n", accent.paint("Label:").bold());
    if posts.is_empty() {
        out.push_str(&empty_state());
    } else {
        out.push_str(&card_grid(posts, columns, accent));
    }
    out
}

/// Full post with table of contents and related posts.
pub fn detail_view(post: &Post, related: &[&Post], accent: Accent) -> String {
    let mut out = String::new();

    let labels = post.labels();
    if !labels.is_empty() {
        let tags: Vec<String> = labels
            .iter()
            .map(|l| accent.paint(&l.to_uppercase()).to_string())
            .collect();
        out.push_str(&format!("{}\n", tags.join("  ")));
    }
    out.push_str(&format!("{}\n", post.judul.bold()));
    out.push_str(&format!(
        "Admin · {} · {} min read\n",
        post.tanggal_jam,
        post.read_time_minutes()
    ));
    if !post.gambar.is_empty() {
        out.push_str(&format!("{}\n", post.gambar.dimmed()));
    }
    out.push('\n');

    let headings = post.headings();
    if !headings.is_empty() {
        out.push_str(&format!("{}\n", accent.paint("Contents").bold()));
        for (i, heading) in headings.iter().enumerate() {
            out.push_str(&format!("  {}. {heading}\n", i + 1));
        }
        out.push('\n');
    }

    out.push_str(&post.body);
    out.push_str("\n\n");

    if !related.is_empty() {
        out.push_str(&format!("{}\n", accent.paint("Related").bold()));
        for p in related {
            out.push_str(&format!("  - {} ({})\n", p.judul, p.slug));
        }
    }

    out
}

/// One line per page: title and slug.
pub fn page_index(pages: &[&Post], accent: Accent) -> String {
    if pages.is_empty() {
        return empty_state();
    }
    pages
        .iter()
        .map(|p| format!("{}  {}\n", accent.paint(&p.judul).bold(), p.slug.dimmed()))
        .collect()
}

/// Strict validation result.
pub fn issues_view(issues: &[SheetError]) -> String {
    if issues.is_empty() {
        return format!("{}\n", "Sheet OK".green().bold());
    }
    let mut out = format!(
        "{} {} issue(s)\n",
        "Sheet has".red().bold(),
        issues.len()
    );
    for issue in issues {
        out.push_str(&format!("  {issue}\n"));
    }
    out
}
