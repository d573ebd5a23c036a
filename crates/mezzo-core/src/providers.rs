use mezzo_types::ProviderInfo;
use tracing::error;

/// Registry of search providers known to the session.
///
/// The registry is bookkeeping only: result delivery happens out of process
/// from its point of view, so adding or removing a provider never touches
/// the result collection.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: Vec<ProviderInfo>,
}

impl ProviderRegistry {
    pub fn add(&mut self, provider: ProviderInfo) {
        if self.providers.iter().any(|p| p.id == provider.id) {
            error!(
                "Tried to add the same provider twice: {} ({})",
                provider.name, provider.id
            );
            return;
        }
        self.providers.push(provider);
    }

    pub fn remove(&mut self, id: &str) {
        let before = self.providers.len();
        self.providers.retain(|p| p.id != id);
        if self.providers.len() == before {
            error!("Tried to remove a provider that hadn't been added yet: {}", id);
        }
    }

    pub fn set_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(provider) = self.providers.iter_mut().find(|p| p.id == id) {
            provider.enabled = enabled;
        }
    }

    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        self.providers.iter().any(|p| p.id == id && p.enabled)
    }

    #[must_use]
    pub fn all(&self) -> &[ProviderInfo] {
        &self.providers
    }
}
