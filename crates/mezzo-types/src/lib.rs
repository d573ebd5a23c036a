//! Shared types for Mezzo search components.
//!
//! This crate provides the types exchanged between the search core, the
//! providers feeding it, and the presentation layer draining its updates.
//! All types are serializable.

use serde::{Deserialize, Serialize};

/// Identifier for one search request.
///
/// Ids increase monotonically; a batch of results tagged with a superseded
/// id is discarded before it reaches the result collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SearchId(pub u64);

/// Stable identity of one row in the result collection.
///
/// Unlike a position in the sorted collection, an `EntryId` survives
/// insertions and merges, so asynchronous lookups (album art) can be keyed
/// on it and invalidated when the entry is merged away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

/// How well a result matched the query, as reported by its provider.
///
/// The variant order is the ordinal: earlier variants are better matches
/// and sort first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MatchQuality {
    /// A query token matched at the start of a metadata field
    AtStart,
    /// A query token matched somewhere else
    Middle,
    /// No token match (provider returned it anyway)
    #[default]
    None,
}

/// What kind of item a result describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Track,
    Album,
    Stream,
}

/// Display metadata attached to a result.
///
/// Which fields are populated depends on [`ResultKind`]: tracks carry
/// title/album/artist, albums carry album/artist, streams carry a url.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One result produced by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Id of the provider that produced this result
    pub provider_id: String,

    pub kind: ResultKind,

    #[serde(default)]
    pub match_quality: MatchQuality,

    #[serde(default)]
    pub metadata: ResultMetadata,
}

impl SearchResult {
    /// Create a track result.
    #[must_use]
    pub fn track(provider_id: &str, title: &str, album: &str, artist: &str) -> Self {
        Self {
            provider_id: provider_id.to_string(),
            kind: ResultKind::Track,
            match_quality: MatchQuality::default(),
            metadata: ResultMetadata {
                title: Some(title.to_string()),
                album: Some(album.to_string()),
                artist: Some(artist.to_string()),
                url: None,
            },
        }
    }

    /// Create an album result.
    #[must_use]
    pub fn album(provider_id: &str, album: &str, artist: &str) -> Self {
        Self {
            provider_id: provider_id.to_string(),
            kind: ResultKind::Album,
            match_quality: MatchQuality::default(),
            metadata: ResultMetadata {
                album: Some(album.to_string()),
                artist: Some(artist.to_string()),
                ..ResultMetadata::default()
            },
        }
    }

    /// Create a stream result.
    #[must_use]
    pub fn stream(provider_id: &str, url: &str) -> Self {
        Self {
            provider_id: provider_id.to_string(),
            kind: ResultKind::Stream,
            match_quality: MatchQuality::default(),
            metadata: ResultMetadata {
                url: Some(url.to_string()),
                ..ResultMetadata::default()
            },
        }
    }

    /// Set the match quality.
    #[must_use]
    pub fn with_quality(mut self, quality: MatchQuality) -> Self {
        self.match_quality = quality;
        self
    }
}

/// A provider known to the search session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: String,

    /// Human-readable name shown next to the provider's toggle
    pub name: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ProviderInfo {
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            enabled: true,
        }
    }
}

/// Updates pushed from the search core to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchUpdate {
    /// A composite entry was created for a newly arrived result
    EntryAdded { id: EntryId },

    /// An entry was absorbed by `merged_into` and removed. Any pending
    /// asynchronous lookup keyed on `id` is stale.
    EntryRemoved { id: EntryId, merged_into: EntryId },

    /// The collection was cleared because `search` superseded the previous
    /// search
    Cleared { search: SearchId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_quality_ordering() {
        assert!(MatchQuality::AtStart < MatchQuality::Middle);
        assert!(MatchQuality::Middle < MatchQuality::None);
    }

    #[test]
    fn test_match_quality_default_is_worst() {
        assert_eq!(MatchQuality::default(), MatchQuality::None);
    }

    #[test]
    fn test_track_constructor() {
        let result = SearchResult::track("library", "Go", "X", "Y");
        assert_eq!(result.kind, ResultKind::Track);
        assert_eq!(result.metadata.title.as_deref(), Some("Go"));
        assert_eq!(result.metadata.album.as_deref(), Some("X"));
        assert_eq!(result.metadata.artist.as_deref(), Some("Y"));
        assert!(result.metadata.url.is_none());
    }

    #[test]
    fn test_stream_constructor() {
        let result = SearchResult::stream("icecast", "http://example.com/radio");
        assert_eq!(result.kind, ResultKind::Stream);
        assert!(result.metadata.title.is_none());
        assert_eq!(
            result.metadata.url.as_deref(),
            Some("http://example.com/radio")
        );
    }

    #[test]
    fn test_search_result_serde_field_names() {
        let result = SearchResult::track("library", "Go", "X", "Y")
            .with_quality(MatchQuality::AtStart);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["providerId"], "library");
        assert_eq!(json["kind"], "track");
        assert_eq!(json["matchQuality"], "at_start");
        assert_eq!(json["metadata"]["title"], "Go");
    }

    #[test]
    fn test_search_result_deserialize_defaults() {
        let result: SearchResult = serde_json::from_str(
            r#"{"providerId": "spotify", "kind": "album", "metadata": {"album": "x"}}"#,
        )
        .unwrap();
        assert_eq!(result.match_quality, MatchQuality::None);
        assert!(result.metadata.artist.is_none());
    }

    #[test]
    fn test_search_update_tag_format() {
        let update = SearchUpdate::EntryRemoved {
            id: EntryId(3),
            merged_into: EntryId(1),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["type"], "entry_removed");
        assert_eq!(json["id"], 3);
        assert_eq!(json["merged_into"], 1);
    }

    #[test]
    fn test_provider_info_enabled_default() {
        let provider: ProviderInfo =
            serde_json::from_str(r#"{"id": "library", "name": "Library"}"#).unwrap();
        assert!(provider.enabled);
    }
}
