//! Reading items: books, certifications, articles and quotes.
//!
//! New items are built from a [`ReadingDetails`] variant so each kind only
//! carries the fields that make sense for it. Stored items are flat records
//! whose mutable field set is declared per kind by [`ReadingKind::mutable_fields`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Default status for newly added items.
pub const DEFAULT_STATUS: &str = "not started";

/// Kind of reading item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingKind {
    Book,
    Certification,
    Article,
    Quote,
}

impl ReadingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingKind::Book => "book",
            ReadingKind::Certification => "certification",
            ReadingKind::Article => "article",
            ReadingKind::Quote => "quote",
        }
    }

    /// Label for progress counts, or `None` for kinds that do not track progress.
    pub fn progress_unit(&self) -> Option<&'static str> {
        match self {
            ReadingKind::Book => Some("Chapter"),
            ReadingKind::Certification => Some("Module"),
            ReadingKind::Article => Some("article"),
            ReadingKind::Quote => None,
        }
    }

    /// Tags applied when the caller does not supply any.
    pub fn default_tags(&self) -> Vec<String> {
        let tag = match self {
            ReadingKind::Book => "book",
            ReadingKind::Certification => "certification",
            ReadingKind::Article => "article",
            ReadingKind::Quote => "motivation",
        };
        vec![tag.to_string()]
    }

    /// Fields an `update` may change on items of this kind.
    pub fn mutable_fields(&self) -> &'static [ReadingField] {
        use ReadingField::*;
        match self {
            ReadingKind::Book => &[
                Title,
                Status,
                Author,
                Link,
                CurrentProgress,
                TotalProgress,
                Tags,
            ],
            ReadingKind::Certification => &[
                Title,
                Status,
                Source,
                Link,
                CurrentProgress,
                TotalProgress,
                Tags,
                TargetCompletionDate,
            ],
            ReadingKind::Article => &[
                Title,
                Status,
                Source,
                Link,
                CurrentProgress,
                TotalProgress,
                Tags,
            ],
            ReadingKind::Quote => &[Status, Content, Author, Tags],
        }
    }

    pub fn allows(&self, field: ReadingField) -> bool {
        self.mutable_fields().contains(&field)
    }
}

impl fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "book" => Ok(ReadingKind::Book),
            "certification" | "cert" => Ok(ReadingKind::Certification),
            "article" => Ok(ReadingKind::Article),
            "quote" => Ok(ReadingKind::Quote),
            _ => Err(Error::InvalidInput(format!(
                "Invalid item type '{}' (expected book, certification, article or quote)",
                s
            ))),
        }
    }
}

/// A named field of a reading item, as used by partial updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingField {
    Title,
    Content,
    Author,
    Source,
    Link,
    CurrentProgress,
    TotalProgress,
    Status,
    Tags,
    TargetCompletionDate,
}

impl ReadingField {
    /// The JSON key of this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingField::Title => "title",
            ReadingField::Content => "content",
            ReadingField::Author => "author",
            ReadingField::Source => "source",
            ReadingField::Link => "link",
            ReadingField::CurrentProgress => "current_progress",
            ReadingField::TotalProgress => "total_progress",
            ReadingField::Status => "status",
            ReadingField::Tags => "tags",
            ReadingField::TargetCompletionDate => "target_completion_date",
        }
    }
}

/// A stored reading item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingItem {
    /// Unique identifier, assigned as max existing + 1
    pub id: u64,

    /// Item kind
    #[serde(rename = "type")]
    pub kind: ReadingKind,

    /// Title (absent for quotes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Quote text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Free-form status (e.g. "not started", "in progress", "completed")
    pub status: String,

    /// Date of the last mutation
    pub last_updated: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Unit label for progress counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_progress: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_progress: Option<u32>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_completion_date: Option<NaiveDate>,
}

impl ReadingItem {
    /// Text shown as the item's headline: content for quotes, title otherwise.
    pub fn display_title(&self) -> &str {
        match (self.kind, &self.content, &self.title) {
            (ReadingKind::Quote, Some(content), _) => content,
            (_, _, Some(title)) => title,
            (_, Some(content), None) => content,
            _ => "",
        }
    }

    /// Apply a partial update.
    ///
    /// When `strict` is set, any supplied field outside the kind's schema
    /// rejects the whole update before anything changes. Otherwise such
    /// fields are skipped. `last_updated` is always set to `today`.
    pub fn apply(&mut self, update: &ReadingUpdate, strict: bool, today: NaiveDate) -> Result<()> {
        let rejected: Vec<ReadingField> = update
            .supplied()
            .into_iter()
            .filter(|field| !self.kind.allows(*field))
            .collect();

        if strict {
            if let Some(field) = rejected.first() {
                return Err(Error::UnknownField {
                    field: field.as_str().to_string(),
                    kind: self.kind.as_str().to_string(),
                });
            }
        }

        let kind = self.kind;
        let allowed = |field: ReadingField| kind.allows(field);

        if let Some(ref title) = update.title {
            if allowed(ReadingField::Title) {
                self.title = Some(title.clone());
            }
        }
        if let Some(ref content) = update.content {
            if allowed(ReadingField::Content) {
                self.content = Some(content.clone());
            }
        }
        if let Some(ref author) = update.author {
            if allowed(ReadingField::Author) {
                self.author = Some(author.clone());
            }
        }
        if let Some(ref source) = update.source {
            if allowed(ReadingField::Source) {
                self.source = Some(source.clone());
            }
        }
        if let Some(ref link) = update.link {
            if allowed(ReadingField::Link) {
                self.link = Some(link.clone());
            }
        }
        if let Some(current) = update.current_progress {
            if allowed(ReadingField::CurrentProgress) {
                self.current_progress = Some(current);
            }
        }
        if let Some(total) = update.total_progress {
            if allowed(ReadingField::TotalProgress) {
                self.total_progress = Some(total);
            }
        }
        if let Some(ref status) = update.status {
            self.status = status.clone();
        }
        if let Some(ref tags) = update.tags {
            self.tags = tags.clone();
        }
        if let Some(date) = update.target_completion_date {
            if allowed(ReadingField::TargetCompletionDate) {
                self.target_completion_date = Some(date);
            }
        }

        self.last_updated = today;
        Ok(())
    }
}

/// Starting and total progress for a new item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub current: u32,
    pub total: Option<u32>,
}

/// Kind-specific fields of a new reading item.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadingDetails {
    Book {
        title: String,
        author: Option<String>,
        link: Option<String>,
        progress: Progress,
    },
    Certification {
        title: String,
        source: Option<String>,
        link: Option<String>,
        progress: Progress,
        target_completion_date: Option<NaiveDate>,
    },
    Article {
        title: String,
        source: Option<String>,
        link: Option<String>,
        progress: Progress,
    },
    Quote {
        content: String,
        author: Option<String>,
    },
}

impl ReadingDetails {
    pub fn kind(&self) -> ReadingKind {
        match self {
            ReadingDetails::Book { .. } => ReadingKind::Book,
            ReadingDetails::Certification { .. } => ReadingKind::Certification,
            ReadingDetails::Article { .. } => ReadingKind::Article,
            ReadingDetails::Quote { .. } => ReadingKind::Quote,
        }
    }
}

/// Loose set of fields as collected from the command line, before validation.
#[derive(Debug, Clone, Default)]
pub struct ReadingArgs {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub source: Option<String>,
    pub link: Option<String>,
    pub current_progress: Option<u32>,
    pub total_progress: Option<u32>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub target_completion_date: Option<NaiveDate>,
}

/// A validated request to add a reading item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReadingItem {
    pub details: ReadingDetails,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NewReadingItem {
    /// Build a new item of `kind` from loose arguments.
    ///
    /// Books, certifications and articles require a title; quotes require
    /// content. Arguments that do not apply to the kind are dropped.
    pub fn build(kind: ReadingKind, args: ReadingArgs) -> Result<Self> {
        let require_title = |title: Option<String>| {
            title.filter(|t| !t.trim().is_empty()).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Title is required for item type '{}' unless it's a quote (use --content)",
                    kind
                ))
            })
        };

        for field in ReadingUpdate::from(args.clone()).supplied() {
            if !kind.allows(field) {
                tracing::warn!(
                    "ignoring --{} for {} items",
                    field.as_str().replace('_', "-"),
                    kind
                );
            }
        }

        let progress = Progress {
            current: args.current_progress.unwrap_or(0),
            total: args.total_progress,
        };

        let details = match kind {
            ReadingKind::Book => ReadingDetails::Book {
                title: require_title(args.title)?,
                author: args.author,
                link: args.link,
                progress,
            },
            ReadingKind::Certification => ReadingDetails::Certification {
                title: require_title(args.title)?,
                source: args.source,
                link: args.link,
                progress,
                target_completion_date: args.target_completion_date,
            },
            ReadingKind::Article => ReadingDetails::Article {
                title: require_title(args.title)?,
                source: args.source,
                link: args.link,
                progress: Progress {
                    total: args.total_progress.or(Some(1)),
                    ..progress
                },
            },
            ReadingKind::Quote => {
                let content = args
                    .content
                    .filter(|c| !c.trim().is_empty())
                    .ok_or_else(|| {
                        Error::InvalidInput("Quotes require --content".to_string())
                    })?;
                ReadingDetails::Quote {
                    content,
                    author: args.author,
                }
            }
        };

        Ok(Self {
            details,
            status: args.status,
            tags: args.tags,
        })
    }

    pub fn kind(&self) -> ReadingKind {
        self.details.kind()
    }

    /// Turn the request into a stored item with the given id.
    pub fn into_item(self, id: u64, today: NaiveDate) -> ReadingItem {
        let kind = self.kind();
        let mut item = ReadingItem {
            id,
            kind,
            title: None,
            content: None,
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            last_updated: today,
            author: None,
            source: None,
            link: None,
            progress_unit: kind.progress_unit().map(str::to_string),
            current_progress: None,
            total_progress: None,
            tags: self.tags.unwrap_or_else(|| kind.default_tags()),
            target_completion_date: None,
        };

        let set_progress = |item: &mut ReadingItem, progress: Progress| {
            item.current_progress = Some(progress.current);
            item.total_progress = progress.total;
        };

        match self.details {
            ReadingDetails::Book {
                title,
                author,
                link,
                progress,
            } => {
                item.title = Some(title);
                item.author = author;
                item.link = link;
                set_progress(&mut item, progress);
            }
            ReadingDetails::Certification {
                title,
                source,
                link,
                progress,
                target_completion_date,
            } => {
                item.title = Some(title);
                item.source = source;
                item.link = link;
                item.target_completion_date = target_completion_date;
                set_progress(&mut item, progress);
            }
            ReadingDetails::Article {
                title,
                source,
                link,
                progress,
            } => {
                item.title = Some(title);
                item.source = source;
                item.link = link;
                set_progress(&mut item, progress);
            }
            ReadingDetails::Quote { content, author } => {
                item.content = Some(content);
                item.author = author;
            }
        }

        item
    }
}

/// Partial update of a reading item. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub source: Option<String>,
    pub link: Option<String>,
    pub current_progress: Option<u32>,
    pub total_progress: Option<u32>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub target_completion_date: Option<NaiveDate>,
}

impl From<ReadingArgs> for ReadingUpdate {
    fn from(args: ReadingArgs) -> Self {
        Self {
            title: args.title,
            content: args.content,
            author: args.author,
            source: args.source,
            link: args.link,
            current_progress: args.current_progress,
            total_progress: args.total_progress,
            status: args.status,
            tags: args.tags,
            target_completion_date: args.target_completion_date,
        }
    }
}

impl ReadingUpdate {
    /// Fields this update supplies a value for.
    pub fn supplied(&self) -> Vec<ReadingField> {
        let mut fields = Vec::new();
        let mut push = |present: bool, field| {
            if present {
                fields.push(field);
            }
        };
        push(self.title.is_some(), ReadingField::Title);
        push(self.content.is_some(), ReadingField::Content);
        push(self.author.is_some(), ReadingField::Author);
        push(self.source.is_some(), ReadingField::Source);
        push(self.link.is_some(), ReadingField::Link);
        push(self.current_progress.is_some(), ReadingField::CurrentProgress);
        push(self.total_progress.is_some(), ReadingField::TotalProgress);
        push(self.status.is_some(), ReadingField::Status);
        push(self.tags.is_some(), ReadingField::Tags);
        push(
            self.target_completion_date.is_some(),
            ReadingField::TargetCompletionDate,
        );
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.supplied().is_empty()
    }
}

/// Equality filters for listing reading items. All supplied filters must match.
#[derive(Debug, Clone, Default)]
pub struct ReadingFilter {
    pub kind: Option<ReadingKind>,
    pub status: Option<String>,
    pub tag: Option<String>,
}

impl ReadingFilter {
    pub fn matches(&self, item: &ReadingItem) -> bool {
        self.kind.is_none_or(|kind| item.kind == kind)
            && self.status.as_ref().is_none_or(|s| &item.status == s)
            && self.tag.as_ref().is_none_or(|t| item.tags.contains(t))
    }
}

/// The daily reads document (`daily_reads.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingDocument {
    #[serde(default)]
    pub reading_items: Vec<ReadingItem>,

    /// Highest id ever deleted, so deleted ids are never issued again
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_id: u64,
}

pub(crate) fn is_zero(n: &u64) -> bool {
    *n == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn book() -> ReadingItem {
        NewReadingItem::build(
            ReadingKind::Book,
            ReadingArgs {
                title: Some("Dune".to_string()),
                author: Some("Frank Herbert".to_string()),
                total_progress: Some(48),
                ..Default::default()
            },
        )
        .unwrap()
        .into_item(1, today())
    }

    #[test]
    fn test_book_defaults() {
        let item = book();
        assert_eq!(item.status, DEFAULT_STATUS);
        assert_eq!(item.progress_unit.as_deref(), Some("Chapter"));
        assert_eq!(item.current_progress, Some(0));
        assert_eq!(item.total_progress, Some(48));
        assert_eq!(item.tags, vec!["book"]);
        assert_eq!(item.last_updated, today());
    }

    #[test]
    fn test_article_total_defaults_to_one() {
        let item = NewReadingItem::build(
            ReadingKind::Article,
            ReadingArgs {
                title: Some("Ownership in Rust".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .into_item(2, today());
        assert_eq!(item.total_progress, Some(1));
        assert_eq!(item.progress_unit.as_deref(), Some("article"));
    }

    #[test]
    fn test_title_required_for_non_quote() {
        for kind in [
            ReadingKind::Book,
            ReadingKind::Certification,
            ReadingKind::Article,
        ] {
            let err = NewReadingItem::build(kind, ReadingArgs::default()).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
            assert!(err.to_string().contains("Title is required"));
        }
    }

    #[test]
    fn test_quote_has_no_title_or_progress() {
        let item = NewReadingItem::build(
            ReadingKind::Quote,
            ReadingArgs {
                title: Some("ignored".to_string()),
                content: Some("Stay hungry".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .into_item(3, today());

        assert_eq!(item.title, None);
        assert_eq!(item.content.as_deref(), Some("Stay hungry"));
        assert_eq!(item.progress_unit, None);
        assert_eq!(item.current_progress, None);
        assert_eq!(item.tags, vec!["motivation"]);
        assert_eq!(item.display_title(), "Stay hungry");

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("title").is_none());
        assert!(json.get("progress_unit").is_none());
        assert_eq!(json["type"], "quote");
    }

    #[test]
    fn test_quote_requires_content() {
        let err = NewReadingItem::build(ReadingKind::Quote, ReadingArgs::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_apply_updates_allowed_fields() {
        let mut item = book();
        let later = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let update = ReadingUpdate {
            current_progress: Some(12),
            status: Some("in progress".to_string()),
            ..Default::default()
        };
        item.apply(&update, true, later).unwrap();
        assert_eq!(item.current_progress, Some(12));
        assert_eq!(item.status, "in progress");
        assert_eq!(item.last_updated, later);
    }

    #[test]
    fn test_apply_strict_rejects_unknown_field() {
        let mut item = book();
        let before = item.clone();
        let update = ReadingUpdate {
            source: Some("O'Reilly".to_string()),
            status: Some("done".to_string()),
            ..Default::default()
        };
        let err = item
            .apply(&update, true, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
            .unwrap_err();
        match err {
            Error::UnknownField { field, kind } => {
                assert_eq!(field, "source");
                assert_eq!(kind, "book");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(item, before);
    }

    #[test]
    fn test_apply_lenient_skips_unknown_field() {
        let mut item = book();
        let before = item.clone();
        let later = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let update = ReadingUpdate {
            content: Some("not a quote".to_string()),
            ..Default::default()
        };
        item.apply(&update, false, later).unwrap();

        assert_eq!(item.content, None);
        assert_eq!(item.last_updated, later);
        assert_eq!(
            ReadingItem {
                last_updated: before.last_updated,
                ..item
            },
            before
        );
    }

    #[test]
    fn test_apply_can_set_absent_schema_field() {
        let mut item = NewReadingItem::build(
            ReadingKind::Certification,
            ReadingArgs {
                title: Some("AWS SAA".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .into_item(1, today());
        assert_eq!(item.target_completion_date, None);

        let target = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let update = ReadingUpdate {
            target_completion_date: Some(target),
            ..Default::default()
        };
        item.apply(&update, true, today()).unwrap();
        assert_eq!(item.target_completion_date, Some(target));
    }

    #[test]
    fn test_filter_matches_all_predicates() {
        let item = book();
        let filter = ReadingFilter {
            kind: Some(ReadingKind::Book),
            status: Some(DEFAULT_STATUS.to_string()),
            tag: Some("book".to_string()),
        };
        assert!(filter.matches(&item));

        let filter = ReadingFilter {
            tag: Some("fiction".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&item));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("Book".parse::<ReadingKind>().unwrap(), ReadingKind::Book);
        assert_eq!(
            "certification".parse::<ReadingKind>().unwrap(),
            ReadingKind::Certification
        );
        assert!("podcast".parse::<ReadingKind>().is_err());
    }

    #[test]
    fn test_deserialize_original_layout() {
        let json = r#"{
            "id": 4,
            "type": "book",
            "title": "Atomic Habits",
            "status": "in progress",
            "last_updated": "2024-02-10",
            "author": null,
            "link": null,
            "progress_unit": "Chapter",
            "current_progress": 3,
            "total_progress": null,
            "tags": ["book", "habits"]
        }"#;
        let item: ReadingItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 4);
        assert_eq!(item.kind, ReadingKind::Book);
        assert_eq!(item.current_progress, Some(3));
        assert_eq!(item.total_progress, None);
        assert_eq!(item.tags, vec!["book", "habits"]);
    }
}
