use mezzo_types::{ResultKind, SearchResult};

/// Outcome of testing two results for combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOutcome {
    /// The results describe different items
    CannotCombine,
    /// Same item; the left result's provider is preferred
    LeftPreferred,
    /// Same item; the right result's provider is preferred
    RightPreferred,
}

/// Position of a provider in the preference order.
///
/// `None` means the provider is not listed and ranks below every listed
/// provider.
#[must_use]
pub fn provider_rank(order: &[String], provider_id: &str) -> Option<usize> {
    order.iter().position(|id| id == provider_id)
}

fn text_matches(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        (None, None) => true,
        _ => false,
    }
}

/// Decide whether two results describe the same item and, if they do, which
/// side's provider is preferred under `order`.
///
/// Results with differing match quality or kind never combine. Tracks must
/// agree on title, album and artist; albums on album and artist; streams on
/// url. All comparisons are case-insensitive.
#[must_use]
pub fn can_combine(left: &SearchResult, right: &SearchResult, order: &[String]) -> CombineOutcome {
    if left.match_quality != right.match_quality || left.kind != right.kind {
        return CombineOutcome::CannotCombine;
    }

    let (m1, m2) = (&left.metadata, &right.metadata);
    let same_item = match left.kind {
        ResultKind::Track => {
            text_matches(m1.title.as_deref(), m2.title.as_deref())
                && text_matches(m1.album.as_deref(), m2.album.as_deref())
                && text_matches(m1.artist.as_deref(), m2.artist.as_deref())
        }
        ResultKind::Album => {
            text_matches(m1.album.as_deref(), m2.album.as_deref())
                && text_matches(m1.artist.as_deref(), m2.artist.as_deref())
        }
        ResultKind::Stream => text_matches(m1.url.as_deref(), m2.url.as_deref()),
    };

    if !same_item {
        return CombineOutcome::CannotCombine;
    }

    // They look the same - decide which provider we like best. An unlisted
    // provider loses to any listed one; two unlisted providers keep the left.
    match (
        provider_rank(order, &left.provider_id),
        provider_rank(order, &right.provider_id),
    ) {
        (Some(l), Some(r)) if r < l => CombineOutcome::RightPreferred,
        (None, Some(_)) => CombineOutcome::RightPreferred,
        _ => CombineOutcome::LeftPreferred,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mezzo_types::MatchQuality;

    fn order(ids: &[&str]) -> Vec<String> {
        ids.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_tracks_combine_case_insensitive() {
        let a = SearchResult::track("library", "Go", "X", "Y");
        let b = SearchResult::track("spotify", "go", "x", "y");
        assert_eq!(
            can_combine(&a, &b, &order(&["library", "spotify"])),
            CombineOutcome::LeftPreferred
        );
    }

    #[test]
    fn test_differing_quality_cannot_combine() {
        let a = SearchResult::track("library", "Go", "X", "Y").with_quality(MatchQuality::AtStart);
        let b = SearchResult::track("spotify", "Go", "X", "Y").with_quality(MatchQuality::Middle);
        assert_eq!(
            can_combine(&a, &b, &order(&["library"])),
            CombineOutcome::CannotCombine
        );
    }

    #[test]
    fn test_differing_kind_cannot_combine() {
        let a = SearchResult::track("library", "Go", "X", "Y");
        let b = SearchResult::album("spotify", "X", "Y");
        assert_eq!(
            can_combine(&a, &b, &order(&["library"])),
            CombineOutcome::CannotCombine
        );
    }

    #[test]
    fn test_tracks_with_same_title_different_album_cannot_combine() {
        let a = SearchResult::track("library", "Go", "X", "Y");
        let b = SearchResult::track("spotify", "Go", "Other", "Y");
        assert_eq!(
            can_combine(&a, &b, &order(&["library", "spotify"])),
            CombineOutcome::CannotCombine
        );
    }

    #[test]
    fn test_albums_ignore_title() {
        let mut a = SearchResult::album("library", "X", "Y");
        a.metadata.title = Some("ignored".to_string());
        let b = SearchResult::album("spotify", "x", "y");
        assert_eq!(
            can_combine(&a, &b, &order(&["library", "spotify"])),
            CombineOutcome::LeftPreferred
        );
    }

    #[test]
    fn test_streams_with_different_urls_never_combine() {
        let a = SearchResult::stream("somafm", "http://example.com/a");
        let b = SearchResult::stream("icecast", "http://example.com/b");
        assert_eq!(
            can_combine(&a, &b, &order(&["icecast", "somafm"])),
            CombineOutcome::CannotCombine
        );
        assert_eq!(
            can_combine(&a, &b, &order(&["somafm", "icecast"])),
            CombineOutcome::CannotCombine
        );
    }

    #[test]
    fn test_right_provider_earlier_in_order_wins() {
        let a = SearchResult::track("spotify", "Go", "X", "Y");
        let b = SearchResult::track("library", "Go", "X", "Y");
        assert_eq!(
            can_combine(&a, &b, &order(&["library", "spotify"])),
            CombineOutcome::RightPreferred
        );
    }

    #[test]
    fn test_unlisted_provider_loses_to_listed() {
        let listed = SearchResult::track("library", "Go", "X", "Y");
        let unlisted = SearchResult::track("jamendo", "Go", "X", "Y");
        assert_eq!(
            can_combine(&unlisted, &listed, &order(&["library"])),
            CombineOutcome::RightPreferred
        );
        assert_eq!(
            can_combine(&listed, &unlisted, &order(&["library"])),
            CombineOutcome::LeftPreferred
        );
    }

    #[test]
    fn test_two_unlisted_providers_keep_left() {
        let a = SearchResult::track("jamendo", "Go", "X", "Y");
        let b = SearchResult::track("magnatune", "Go", "X", "Y");
        assert_eq!(
            can_combine(&a, &b, &order(&["library"])),
            CombineOutcome::LeftPreferred
        );
    }

    #[test]
    fn test_missing_field_on_one_side_cannot_combine() {
        let a = SearchResult::track("library", "Go", "X", "Y");
        let mut b = SearchResult::track("spotify", "Go", "X", "Y");
        b.metadata.artist = None;
        assert_eq!(
            can_combine(&a, &b, &order(&["library"])),
            CombineOutcome::CannotCombine
        );
    }

    #[test]
    fn test_provider_rank() {
        let order = order(&["library", "spotify"]);
        assert_eq!(provider_rank(&order, "library"), Some(0));
        assert_eq!(provider_rank(&order, "spotify"), Some(1));
        assert_eq!(provider_rank(&order, "jamendo"), None);
    }
}
