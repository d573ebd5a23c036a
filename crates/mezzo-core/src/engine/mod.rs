mod decoration;

pub use decoration::DecorationId;

use crate::config::Config;
use crate::merge::{CompositeEntry, ResultCollection};
use crate::providers::ProviderRegistry;
use decoration::DecorationRequests;
use mezzo_types::{EntryId, ProviderInfo, SearchId, SearchResult, SearchUpdate};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// Core search session.
///
/// Owns the sorted result collection and applies arriving provider batches
/// to it, one batch at a time on the caller's thread. Presentation state
/// changes are pushed over the update channel.
pub struct MezzoCore {
    config: Config,
    providers: ProviderRegistry,
    collection: ResultCollection,

    /// Id of the search results are currently accepted for, if any
    active: Option<SearchId>,
    next_search_id: u64,

    /// How many batches have arrived for the active search
    order_arrived: u32,

    /// Pending album art lookups keyed by entry identity
    decorations: DecorationRequests,

    /// Channel to send updates to the presentation layer
    update_tx: UnboundedSender<SearchUpdate>,
}

impl MezzoCore {
    /// Create a new core with a channel for updates. Returns the core and a
    /// receiver the presentation layer drains.
    #[must_use]
    pub fn new(config: Config) -> (Self, UnboundedReceiver<SearchUpdate>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                config,
                providers: ProviderRegistry::default(),
                collection: ResultCollection::default(),
                active: None,
                next_search_id: 0,
                order_arrived: 0,
                decorations: DecorationRequests::default(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start a new search, superseding any previous one. Returns the id the
    /// caller must tag result batches with.
    ///
    /// Queries shorter than the configured minimum (after trimming) do not
    /// start a search and leave the previous state untouched.
    pub fn start_search(&mut self, query: &str) -> Option<SearchId> {
        let trimmed = query.trim();
        if trimmed.chars().count() < self.config.search.min_query_length {
            return None;
        }

        self.next_search_id += 1;
        let id = SearchId(self.next_search_id);
        self.active = Some(id);
        self.collection.clear();
        self.decorations.clear();
        self.order_arrived = 0;
        self.send(SearchUpdate::Cleared { search: id });

        debug!("Started search {} for {:?}", id.0, trimmed);
        Some(id)
    }

    /// Stop accepting batches for `id`. Advisory: entries already merged for
    /// that search stay as they are.
    pub fn cancel_search(&mut self, id: SearchId) {
        if self.active == Some(id) {
            debug!("Cancelled search {}", id.0);
            self.active = None;
        }
    }

    /// Apply one provider batch. Batches tagged with a superseded or
    /// cancelled id are discarded.
    pub fn add_results(&mut self, id: SearchId, results: Vec<SearchResult>) {
        if self.active != Some(id) {
            debug!(
                "Discarding {} results for superseded search {}",
                results.len(),
                id.0
            );
            return;
        }

        let combine = self.config.search.combine_identical_results;
        for result in results {
            if combine {
                let (entry, merge) = self.collection.insert_and_combine(
                    result,
                    self.order_arrived,
                    &self.config.search.provider_order,
                );
                self.send(SearchUpdate::EntryAdded { id: entry });

                if let Some(merge) = merge {
                    self.decorations.invalidate(merge.removed);
                    self.send(SearchUpdate::EntryRemoved {
                        id: merge.removed,
                        merged_into: merge.kept,
                    });
                }
            } else {
                let entry = self.collection.insert(result, self.order_arrived);
                self.send(SearchUpdate::EntryAdded { id: entry });
            }
        }

        self.order_arrived += 1;
    }

    /// Replace the configuration. Affects subsequent batches and searches;
    /// the current collection is left as it is.
    pub fn reload_config(&mut self, config: Config) {
        info!("Configuration reloaded");
        self.config = config;
    }

    /// Entries of the active search in sort order.
    pub fn entries(&self) -> impl Iterator<Item = &CompositeEntry> {
        self.collection.iter()
    }

    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&CompositeEntry> {
        self.collection.get(id)
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.collection.len()
    }

    /// Pick among an entry's merged results by index, for dispatching an
    /// action on one specific provider's copy. Out of range yields `None`.
    #[must_use]
    pub fn result_choice(&self, id: EntryId, index: usize) -> Option<&SearchResult> {
        self.collection.get(id)?.results().get(index)
    }

    #[must_use]
    pub fn active_search(&self) -> Option<SearchId> {
        self.active
    }

    /// Begin an album art lookup for `entry`. An entry gets at most one
    /// lookup; unknown entries and repeated requests yield `None`.
    pub fn request_art(&mut self, entry: EntryId) -> Option<DecorationId> {
        self.collection.get(entry)?;
        self.decorations.request(entry)
    }

    /// Match a completed art lookup back to its entry. Lookups whose entry
    /// was merged away or cleared yield `None`.
    pub fn art_loaded(&mut self, id: DecorationId) -> Option<EntryId> {
        self.decorations.complete(id)
    }

    pub fn add_provider(&mut self, provider: ProviderInfo) {
        self.providers.add(provider);
    }

    pub fn remove_provider(&mut self, id: &str) {
        self.providers.remove(id);
    }

    pub fn set_provider_enabled(&mut self, id: &str, enabled: bool) {
        self.providers.set_enabled(id, enabled);
    }

    #[must_use]
    pub fn is_provider_enabled(&self, id: &str) -> bool {
        self.providers.is_enabled(id)
    }

    #[must_use]
    pub fn providers(&self) -> &[ProviderInfo] {
        self.providers.all()
    }

    fn send(&self, update: SearchUpdate) {
        // The receiver may already be gone during shutdown
        let _ = self.update_tx.send(update);
    }
}
