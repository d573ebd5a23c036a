use super::combine::{CombineOutcome, can_combine};
use mezzo_types::{EntryId, ResultKind, SearchResult};
use std::cmp::Ordering;
use tracing::debug;

/// One row in the sorted result collection: a primary result plus every
/// result merged into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeEntry {
    id: EntryId,
    results: Vec<SearchResult>,
    order_arrived: u32,
}

impl CompositeEntry {
    fn new(id: EntryId, result: SearchResult, order_arrived: u32) -> Self {
        Self {
            id,
            results: vec![result],
            order_arrived,
        }
    }

    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// The result used for display and sorting. Always the most-preferred
    /// result merged into this entry.
    #[must_use]
    pub fn primary(&self) -> &SearchResult {
        &self.results[0]
    }

    /// Every merged result, most-preferred provider first, then insertion
    /// order.
    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Which batch this entry arrived in.
    #[must_use]
    pub fn order_arrived(&self) -> u32 {
        self.order_arrived
    }
}

/// A merge performed during insertion: `removed` was absorbed into `kept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    pub kept: EntryId,
    pub removed: EntryId,
}

/// Sorted collection of composite entries for the active search.
///
/// The sort key is derived from the same display fields the combine
/// predicate compares, so results that can merge end up adjacent and the
/// neighbor scan stays cheap.
#[derive(Debug, Default)]
pub struct ResultCollection {
    entries: Vec<CompositeEntry>,
    next_id: u64,
}

impl ResultCollection {
    /// Insert a result without attempting any merge. Used when combining is
    /// disabled: every result keeps its own row.
    pub fn insert(&mut self, result: SearchResult, order_arrived: u32) -> EntryId {
        let pos = self.insert_sorted(result, order_arrived);
        self.entries[pos].id
    }

    /// Insert a result and collapse it into an equivalent neighbor if one
    /// exists. Returns the id of the entry created for the result and the
    /// merge performed, if any.
    pub fn insert_and_combine(
        &mut self,
        result: SearchResult,
        order_arrived: u32,
        order: &[String],
    ) -> (EntryId, Option<Merge>) {
        let pos = self.insert_sorted(result, order_arrived);
        let id = self.entries[pos].id;
        let merge = self.try_merge(pos, order);
        (id, merge)
    }

    /// Scan the sort-order neighborhood of the entry at `pos` for a
    /// combinable entry: the entry immediately after `pos`, then every entry
    /// before it scanning backward to the start. Positions past the end are
    /// skipped. At most one merge is performed, after which the scan stops -
    /// the removal has invalidated every position.
    pub fn try_merge(&mut self, pos: usize, order: &[String]) -> Option<Merge> {
        let new_primary = self.entries.get(pos)?.primary();

        let found = std::iter::once(pos + 1)
            .chain((0..pos).rev())
            .find_map(|candidate| {
                let other = self.entries.get(candidate)?;
                match can_combine(new_primary, other.primary(), order) {
                    CombineOutcome::CannotCombine => None,
                    CombineOutcome::LeftPreferred => Some((pos, candidate)),
                    CombineOutcome::RightPreferred => Some((candidate, pos)),
                }
            });

        let (superior, inferior) = found?;
        Some(self.combine(superior, inferior))
    }

    /// Append the inferior entry's results to the superior's and remove it.
    fn combine(&mut self, superior: usize, inferior: usize) -> Merge {
        let removed = self.entries.remove(inferior);
        let superior = if inferior < superior {
            superior - 1
        } else {
            superior
        };
        let kept = &mut self.entries[superior];
        kept.results.extend(removed.results);

        debug!(
            "Combined entry {} into {} ({} results)",
            removed.id.0,
            kept.id.0,
            kept.results.len()
        );

        Merge {
            kept: kept.id,
            removed: removed.id,
        }
    }

    fn insert_sorted(&mut self, result: SearchResult, order_arrived: u32) -> usize {
        let entry = CompositeEntry::new(EntryId(self.next_id), result, order_arrived);
        self.next_id += 1;

        let pos = self
            .entries
            .partition_point(|existing| cmp_entries(existing, &entry) != Ordering::Greater);
        self.entries.insert(pos, entry);
        pos
    }

    /// Drop every entry. Entry ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in sort order.
    pub fn iter(&self) -> impl Iterator<Item = &CompositeEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&CompositeEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }
}

fn cmp_entries(a: &CompositeEntry, b: &CompositeEntry) -> Ordering {
    cmp_results(a.primary(), b.primary()).then_with(|| a.order_arrived.cmp(&b.order_arrived))
}

/// Sort order for the collection: match quality, kind, then the case-folded
/// fields the combine predicate compares for that kind, then arrival order.
fn cmp_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    a.match_quality
        .cmp(&b.match_quality)
        .then_with(|| a.kind.cmp(&b.kind))
        .then_with(|| match a.kind {
            ResultKind::Track | ResultKind::Album => {
                cmp_text(a.metadata.artist.as_deref(), b.metadata.artist.as_deref())
                    .then_with(|| {
                        cmp_text(a.metadata.album.as_deref(), b.metadata.album.as_deref())
                    })
                    .then_with(|| {
                        cmp_text(a.metadata.title.as_deref(), b.metadata.title.as_deref())
                    })
            }
            ResultKind::Stream => cmp_text(a.metadata.url.as_deref(), b.metadata.url.as_deref()),
        })
}

fn cmp_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}
