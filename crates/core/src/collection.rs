//! The in-memory post collection and the queries the front-end runs on it.

use crate::post::{Post, PostKind};
use serde::Serialize;

/// Posts shown per list page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Related posts shown under a detail view.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Every published record from one load, in sheet order.
///
/// Replaced wholesale on reload; read-only otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostCollection {
    posts: Vec<Post>,
}

/// One page of blog posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage<'a> {
    /// 1-based page number after clamping.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based display index of the first item (0 when empty).
    pub first_index: usize,
    /// 1-based display index of the last item (0 when empty).
    pub last_index: usize,
    pub items: Vec<&'a Post>,
}

impl PostPage<'_> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl PostCollection {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Swap in a freshly loaded set of posts.
    pub fn replace(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }

    pub fn as_slice(&self) -> &[Post] {
        &self.posts
    }

    pub fn into_inner(self) -> Vec<Post> {
        self.posts
    }

    /// Records whose `tipe` is `Post`.
    pub fn blog_posts(&self) -> Vec<&Post> {
        self.of_kind(PostKind::Post)
    }

    /// Records whose `tipe` is `Page`.
    pub fn pages(&self) -> Vec<&Post> {
        self.of_kind(PostKind::Page)
    }

    fn of_kind(&self, kind: PostKind) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.kind() == Some(kind)).collect()
    }

    /// Paginate blog posts. `page` is 1-based and clamped into range.
    pub fn paginate(&self, page: usize, per_page: usize) -> PostPage<'_> {
        let per_page = per_page.max(1);
        let blog = self.blog_posts();
        let total_items = blog.len();
        let total_pages = total_items.div_ceil(per_page).max(1);
        let number = page.clamp(1, total_pages);

        let start = (number - 1) * per_page;
        let end = (start + per_page).min(total_items);
        let items: Vec<&Post> = blog.get(start..end).map(<[_]>::to_vec).unwrap_or_default();

        let (first_index, last_index) = if items.is_empty() {
            (0, 0)
        } else {
            (start + 1, end)
        };

        PostPage {
            number,
            total_pages,
            total_items,
            first_index,
            last_index,
            items,
        }
    }

    /// First record with this slug. Duplicate slugs resolve to the earliest row.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Every record (post or page) carrying `label`.
    pub fn with_label(&self, label: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.has_label(label)).collect()
    }

    /// Other blog posts sharing `post`'s first label, in sheet order.
    pub fn related(&self, post: &Post, limit: usize) -> Vec<&Post> {
        let Some(primary) = post.primary_label() else {
            return Vec::new();
        };

        self.posts
            .iter()
            .filter(|p| p.slug != post.slug)
            .filter(|p| p.kind() == Some(PostKind::Post))
            .filter(|p| p.has_label(primary))
            .take(limit)
            .collect()
    }

    /// Distinct labels across all records, in first-seen order.
    pub fn labels(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for label in self.posts.iter().flat_map(|p| p.labels()) {
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        seen
    }
}

impl From<Vec<Post>> for PostCollection {
    fn from(posts: Vec<Post>) -> Self {
        Self::new(posts)
    }
}

impl<'a> IntoIterator for &'a PostCollection {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}
