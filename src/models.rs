// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Record Models
//!
//! A [`Record`] is the only persisted entity: an identifier plus either a
//! note body or a redirect target, optionally locked behind a password.
//!
//! ## Model Categories
//!
//! - **Identifiers**: [`RecordId`] and the rules it enforces
//! - **Records**: [`Record`], [`RecordKind`] and content validation
//! - **Requests/Responses**: [`NewRecordForm`], [`RecordContent`]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::hasher::PasswordHasher;

/// Longest accepted identifier, in characters.
pub const MAX_ID_CHARS: usize = 128;

/// Largest accepted note body or redirect target, in bytes.
pub const MAX_CONTENT_BYTES: usize = 1024 * 1024;

/// Path segments taken by fixed routes. A record with one of these ids could
/// never be served back.
pub const RESERVED_IDS: &[&str] = &["new", "static", "health", "docs", "api-doc"];

// =============================================================================
// Record Identifier
// =============================================================================

/// Why an identifier was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("Record IDs cannot contain \".\"")]
    ContainsDot,
    #[error("Record ID is required.")]
    Empty,
    #[error("Record IDs cannot be longer than {} characters.", MAX_ID_CHARS)]
    TooLong,
    #[error("Record IDs cannot contain {0:?}.")]
    IllegalChar(char),
    #[error("Record ID \"{0}\" is reserved.")]
    Reserved(String),
}

/// Validated record identifier.
///
/// Usable verbatim as a single URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        // Checked first: it is the rule clients know about.
        if raw.contains('.') {
            return Err(IdError::ContainsDot);
        }
        if raw.is_empty() {
            return Err(IdError::Empty);
        }
        if raw.chars().count() > MAX_ID_CHARS {
            return Err(IdError::TooLong);
        }
        if let Some(c) = raw
            .chars()
            .find(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
        {
            return Err(IdError::IllegalChar(c));
        }
        if RESERVED_IDS.contains(&raw) {
            return Err(IdError::Reserved(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

// =============================================================================
// Records
// =============================================================================

/// What a record's content means.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Free text, rendered as a page.
    Note,
    /// Redirect target.
    Uri,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Note => "note",
            RecordKind::Uri => "uri",
        }
    }
}

/// Why record content was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("record has no content")]
    EmptyContent,
    #[error("record content exceeds {} bytes", MAX_CONTENT_BYTES)]
    ContentTooLarge,
    #[error("redirect target is not a valid URL: {0}")]
    InvalidUrl(String),
    #[error("redirect target must use http or https, not {0}")]
    UnsupportedScheme(String),
}

/// A note or redirect persisted under its identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub content: String,
    /// Argon2 PHC string of the lock password, if the record is locked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Build an unlocked record stamped with the current time.
    pub fn new(id: RecordId, kind: RecordKind, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            kind,
            content: content.into(),
            password_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn is_note(&self) -> bool {
        self.kind == RecordKind::Note
    }

    pub fn is_uri(&self) -> bool {
        self.kind == RecordKind::Uri
    }

    /// A URI record pointing at its own identifier would redirect to itself.
    pub fn is_redirect_loop(&self) -> bool {
        self.is_uri() && self.content == self.id.as_str()
    }

    /// Whether `password` opens this record for editing.
    ///
    /// Unlocked records open for anything.
    pub fn can_unlock_with(&self, hasher: &dyn PasswordHasher, password: &str) -> bool {
        match &self.password_hash {
            Some(hash) => hasher.verify(hash, password),
            None => true,
        }
    }

    /// Check content against the rules for its kind.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        if self.content.len() > MAX_CONTENT_BYTES {
            return Err(ValidationError::ContentTooLarge);
        }
        if self.is_uri() {
            let url = Url::parse(&self.content)
                .map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ValidationError::UnsupportedScheme(url.scheme().to_string()));
            }
        }
        Ok(())
    }

    /// Redirect target in its serialized (ASCII) form.
    ///
    /// `None` for notes, or if the stored target no longer parses.
    pub fn redirect_target(&self) -> Option<String> {
        if !self.is_uri() {
            return None;
        }
        Url::parse(&self.content).ok().map(String::from)
    }
}

// =============================================================================
// Requests and Responses
// =============================================================================

/// Form submitted to `POST /new`.
///
/// Empty fields count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NewRecordForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub content_uri: String,
    #[serde(default)]
    pub content_note: String,
}

impl NewRecordForm {
    /// Kind and content selected by the form: a non-empty URI wins.
    pub fn kind_and_content(&self) -> (RecordKind, &str) {
        if !self.content_uri.is_empty() {
            (RecordKind::Uri, &self.content_uri)
        } else {
            (RecordKind::Note, &self.content_note)
        }
    }

    pub fn password(&self) -> Option<&str> {
        Some(self.password.as_str()).filter(|p| !p.is_empty())
    }
}

/// `type` field of [`RecordContent`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Note,
    Uri,
    None,
}

impl From<RecordKind> for ContentType {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Note => ContentType::Note,
            RecordKind::Uri => ContentType::Uri,
        }
    }
}

/// Body of `GET /{id}/content`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct RecordContent {
    #[serde(rename = "type")]
    pub kind: ContentType,
    /// Raw note text, literal redirect target, or a not-found message.
    pub content: String,
}

impl RecordContent {
    pub fn of(record: &Record) -> Self {
        Self {
            kind: record.kind.into(),
            content: record.content.clone(),
        }
    }

    pub fn none(id: &str) -> Self {
        Self {
            kind: ContentType::None,
            content: format!("Record {id} does not exist."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::testing::fast_hasher;

    fn id(raw: &str) -> RecordId {
        RecordId::parse(raw).unwrap()
    }

    #[test]
    fn record_id_rejects_dot_before_anything_else() {
        assert_eq!(RecordId::parse("a.b"), Err(IdError::ContainsDot));
        assert_eq!(RecordId::parse("."), Err(IdError::ContainsDot));
        assert_eq!(RecordId::parse("new."), Err(IdError::ContainsDot));
        assert_eq!(RecordId::parse("a b."), Err(IdError::ContainsDot));
    }

    #[test]
    fn record_id_rejects_unservable_ids() {
        assert_eq!(RecordId::parse(""), Err(IdError::Empty));
        assert_eq!(RecordId::parse("a/b"), Err(IdError::IllegalChar('/')));
        assert_eq!(RecordId::parse("a b"), Err(IdError::IllegalChar(' ')));
        assert_eq!(RecordId::parse("a?b"), Err(IdError::IllegalChar('?')));
        assert_eq!(RecordId::parse("a#b"), Err(IdError::IllegalChar('#')));
        assert_eq!(RecordId::parse("a%20"), Err(IdError::IllegalChar('%')));
        assert_eq!(
            RecordId::parse("static"),
            Err(IdError::Reserved("static".into()))
        );
        assert_eq!(
            RecordId::parse(&"x".repeat(MAX_ID_CHARS + 1)),
            Err(IdError::TooLong)
        );
    }

    #[test]
    fn record_id_accepts_ordinary_ids() {
        for raw in ["foo", "Foo-Bar_9", "café", "newer", &"x".repeat(MAX_ID_CHARS)] {
            assert_eq!(id(raw).as_str(), raw);
        }
    }

    #[test]
    fn record_id_deserialization_is_validated() {
        let ok: Result<RecordId, _> = serde_json::from_str(r#""foo""#);
        assert!(ok.is_ok());
        let bad: Result<RecordId, _> = serde_json::from_str(r#""foo.json""#);
        assert!(bad.is_err());
    }

    #[test]
    fn empty_content_is_invalid() {
        let note = Record::new(id("n"), RecordKind::Note, "");
        assert_eq!(note.validate(), Err(ValidationError::EmptyContent));

        let uri = Record::new(id("u"), RecordKind::Uri, "");
        assert_eq!(uri.validate(), Err(ValidationError::EmptyContent));
    }

    #[test]
    fn oversized_content_is_invalid() {
        let note = Record::new(id("n"), RecordKind::Note, "a".repeat(MAX_CONTENT_BYTES + 1));
        assert_eq!(note.validate(), Err(ValidationError::ContentTooLarge));
    }

    #[test]
    fn uri_content_must_be_absolute_http_url() {
        let ok = Record::new(id("u"), RecordKind::Uri, "https://example.com");
        assert!(ok.validate().is_ok());

        let relative = Record::new(id("u"), RecordKind::Uri, "example.com");
        assert!(matches!(relative.validate(), Err(ValidationError::InvalidUrl(_))));

        let script = Record::new(id("u"), RecordKind::Uri, "javascript:alert(1)");
        assert_eq!(
            script.validate(),
            Err(ValidationError::UnsupportedScheme("javascript".into()))
        );
    }

    #[test]
    fn note_content_is_free_text() {
        let note = Record::new(id("n"), RecordKind::Note, "not a url <b>at all</b>");
        assert!(note.validate().is_ok());
        assert!(note.redirect_target().is_none());
    }

    #[test]
    fn redirect_loop_only_applies_to_uris() {
        let uri = Record::new(id("loop"), RecordKind::Uri, "loop");
        assert!(uri.is_redirect_loop());

        let note = Record::new(id("loop"), RecordKind::Note, "loop");
        assert!(!note.is_redirect_loop());
    }

    #[test]
    fn derived_state() {
        let mut record = Record::new(id("r"), RecordKind::Note, "hi");
        assert!(record.is_note());
        assert!(!record.is_uri());
        assert!(!record.is_locked());

        record.password_hash = Some("$argon2id$placeholder".into());
        assert!(record.is_locked());
    }

    #[test]
    fn unlock_requires_exact_password() {
        let hasher = fast_hasher();
        let mut record = Record::new(id("r"), RecordKind::Note, "hi");
        assert!(record.can_unlock_with(&hasher, "anything"));

        record.password_hash = Some(hasher.hash("hunter2").unwrap());
        assert!(record.can_unlock_with(&hasher, "hunter2"));
        assert!(!record.can_unlock_with(&hasher, "hunter3"));
        assert!(!record.can_unlock_with(&hasher, ""));
        assert!(!record.can_unlock_with(&hasher, "Hunter2"));
    }

    #[test]
    fn record_serializes_type_field() {
        let record = Record::new(id("r"), RecordKind::Uri, "https://example.com");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "uri");
        assert_eq!(json["id"], "r");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn redirect_target_is_ascii_serialized() {
        let record = Record::new(id("r"), RecordKind::Uri, "https://exämple.com/ü");
        let target = record.redirect_target().unwrap();
        assert!(target.is_ascii());
        assert!(target.starts_with("https://xn--"));
        assert!(target.ends_with("/%C3%BC"));
    }

    #[test]
    fn form_prefers_uri_over_note() {
        let form = NewRecordForm {
            id: "x".into(),
            content_uri: "https://example.com".into(),
            content_note: "ignored".into(),
            ..Default::default()
        };
        assert_eq!(form.kind_and_content(), (RecordKind::Uri, "https://example.com"));

        let form = NewRecordForm {
            id: "x".into(),
            content_note: "hello".into(),
            ..Default::default()
        };
        assert_eq!(form.kind_and_content(), (RecordKind::Note, "hello"));
        assert_eq!(form.password(), None);
    }

    #[test]
    fn content_response_shapes() {
        let body = serde_json::to_string(&RecordContent::none("ghost")).unwrap();
        assert_eq!(body, r#"{"type":"none","content":"Record ghost does not exist."}"#);

        let record = Record::new(id("n"), RecordKind::Note, "Hello");
        let body = serde_json::to_string(&RecordContent::of(&record)).unwrap();
        assert_eq!(body, r#"{"type":"note","content":"Hello"}"#);
    }
}
