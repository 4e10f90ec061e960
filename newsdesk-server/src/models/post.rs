//! News post input validation

use newsdesk_core::slugify;

use super::validation::required;
use super::ValidationError;

/// Validated post title (trimmed, non-blank)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    /// # Example
    /// ```
    /// use newsdesk_server::models::PostTitle;
    ///
    /// assert!(PostTitle::new("Launch day").is_ok());
    /// assert!(PostTitle::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        Self::parse(Some(s))
    }

    pub(crate) fn parse(s: Option<&str>) -> Result<Self, ValidationError> {
        let title = required("title", s)?;
        Ok(Self(title.to_owned()))
    }

    /// Slug derived from this title.
    pub fn slug(&self) -> String {
        slugify(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated post body (non-blank, surrounding whitespace kept)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        Self::parse(Some(s))
    }

    pub(crate) fn parse(s: Option<&str>) -> Result<Self, ValidationError> {
        required("content", s)?;
        Ok(Self(s.unwrap_or_default().to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A post ready to insert
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub content: PostContent,
    pub image_url: Option<String>,
    pub published: bool,
}

impl NewPost {
    /// Validate create input. `title` and `content` are required;
    /// `published` defaults to false.
    pub fn from_parts(
        title: Option<&str>,
        content: Option<&str>,
        image_url: Option<String>,
        published: Option<bool>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: PostTitle::parse(title)?,
            content: PostContent::parse(content)?,
            image_url: normalize_url(image_url),
            published: published.unwrap_or(false),
        })
    }

    pub fn slug(&self) -> String {
        self.title.slug()
    }
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<PostTitle>,
    pub content: Option<PostContent>,
    pub image_url: Option<String>,
    pub published: Option<bool>,
}

impl PostChanges {
    /// Validate update input. Fields that are present must be valid.
    pub fn from_parts(
        title: Option<&str>,
        content: Option<&str>,
        image_url: Option<String>,
        published: Option<bool>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: title.map(PostTitle::new).transpose()?,
            content: content.map(PostContent::new).transpose()?,
            image_url: normalize_url(image_url),
            published,
        })
    }

    /// New slug when the title changes.
    pub fn slug(&self) -> Option<String> {
        self.title.as_ref().map(PostTitle::slug)
    }
}

fn normalize_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_owned()).filter(|u| !u.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_requires_title_and_content() {
        let err = NewPost::from_parts(None, Some("body"), None, None).unwrap_err();
        assert!(matches!(err, ValidationError::Required { field: "title" }));

        let err = NewPost::from_parts(Some("Title"), Some("  \n"), None, None).unwrap_err();
        assert!(matches!(err, ValidationError::Required { field: "content" }));
    }

    #[test]
    fn new_post_defaults_and_slug() {
        let post =
            NewPost::from_parts(Some("  Hello, World! "), Some("Body"), Some(" ".into()), None)
                .unwrap();
        assert_eq!(post.title.as_str(), "Hello, World!");
        assert_eq!(post.slug(), "hello-world");
        assert!(!post.published);
        assert!(post.image_url.is_none());
    }

    #[test]
    fn changes_keep_absent_fields() {
        let changes = PostChanges::from_parts(None, None, None, Some(true)).unwrap();
        assert!(changes.title.is_none());
        assert!(changes.slug().is_none());
        assert_eq!(changes.published, Some(true));
    }

    #[test]
    fn changes_reject_blank_title() {
        assert!(PostChanges::from_parts(Some(""), None, None, None).is_err());
    }

    #[test]
    fn changes_rederive_slug() {
        let changes = PostChanges::from_parts(Some("New Title"), None, None, None).unwrap();
        assert_eq!(changes.slug().as_deref(), Some("new-title"));
    }

    #[test]
    fn long_title_and_content_are_accepted() {
        let title = "a".repeat(2_000);
        let content = "word ".repeat(50_000);
        let post = NewPost::from_parts(Some(&title), Some(&content), None, None).unwrap();
        assert_eq!(post.title.as_str().len(), 2_000);
        assert_eq!(post.content.as_str(), content);
    }
}
