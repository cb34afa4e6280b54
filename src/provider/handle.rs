use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::error::{NavError, NavResult};

use super::TreeProvider;

/// Lazily activated, shareable reference to the tree provider.
///
/// Clones share one slot. The first `activate` runs the initialiser; callers
/// that arrive while it is running wait for it and then see the same provider.
#[derive(Clone, Default)]
pub struct ProviderHandle {
    slot: Arc<OnceCell<Arc<dyn TreeProvider>>>,
}

impl ProviderHandle {
    /// An inactive handle; `get` fails until `activate` succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that is already active, e.g. with a fake provider in tests
    pub fn ready(provider: Arc<dyn TreeProvider>) -> Self {
        Self {
            slot: Arc::new(OnceCell::new_with(Some(provider))),
        }
    }

    /// Activate the provider once. Later calls return the cached provider
    /// without running `init`. A failed activation leaves the slot empty.
    pub async fn activate<F, Fut>(&self, init: F) -> NavResult<Arc<dyn TreeProvider>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = NavResult<Arc<dyn TreeProvider>>>,
    {
        let provider = self
            .slot
            .get_or_try_init(|| async {
                log::info!(target: "stepstone::provider", "Activating tree provider");
                init().await
            })
            .await?;
        Ok(Arc::clone(provider))
    }

    /// The active provider, or `UninitializedProvider`
    pub fn get(&self) -> NavResult<Arc<dyn TreeProvider>> {
        self.slot
            .get()
            .cloned()
            .ok_or(NavError::UninitializedProvider)
    }

    pub fn is_active(&self) -> bool {
        self.slot.initialized()
    }
}
