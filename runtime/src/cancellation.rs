//! Registry of cancellable effects keyed by [`EffectId`].

use easy_event_core::effect::EffectId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// A registered cancellable effect
///
/// Several effects may run under the same id; `generation` tells them apart
/// so a finishing effect only forgets its own token.
#[derive(Debug, Clone)]
pub(crate) struct Registration {
    pub(crate) id: EffectId,
    pub(crate) generation: u64,
    pub(crate) token: CancellationToken,
}

/// Shared map of in-flight cancellable effects
#[derive(Debug, Clone, Default)]
pub(crate) struct CancellationRegistry {
    entries: Arc<Mutex<HashMap<EffectId, Vec<(u64, CancellationToken)>>>>,
    generations: Arc<AtomicU64>,
}

impl CancellationRegistry {
    /// Register a new effect under `id`.
    ///
    /// When `parent` is given the new token is its child, so cancelling an
    /// outer effect also cancels nested ones.
    pub(crate) fn register(
        &self,
        id: EffectId,
        parent: Option<&CancellationToken>,
    ) -> Registration {
        let token = parent.map_or_else(CancellationToken::new, CancellationToken::child_token);
        let generation = self.generations.fetch_add(1, Ordering::Relaxed);

        lock(&self.entries)
            .entry(id)
            .or_default()
            .push((generation, token.clone()));

        Registration {
            id,
            generation,
            token,
        }
    }

    /// Cancel every effect registered under `id`. Returns how many were running.
    pub(crate) fn cancel(&self, id: EffectId) -> usize {
        let removed = lock(&self.entries).remove(&id).unwrap_or_default();
        for (_, token) in &removed {
            token.cancel();
        }
        removed.len()
    }

    /// Cancel every registered effect
    pub(crate) fn cancel_all(&self) -> usize {
        let drained: Vec<_> = lock(&self.entries).drain().collect();
        drained
            .iter()
            .flat_map(|(_, running)| running)
            .map(|(_, token)| token.cancel())
            .count()
    }

    /// Forget a finished registration (no-op if it was cancelled meanwhile)
    pub(crate) fn release(&self, registration: &Registration) {
        let mut entries = lock(&self.entries);
        if let Some(running) = entries.get_mut(&registration.id) {
            running.retain(|(generation, _)| *generation != registration.generation);
            if running.is_empty() {
                entries.remove(&registration.id);
            }
        }
    }

    /// Whether at least one effect is currently registered under `id`
    pub(crate) fn is_running(&self, id: EffectId) -> bool {
        lock(&self.entries).contains_key(&id)
    }
}

// A poisoned map only means another effect panicked while holding the lock;
// the map itself is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
