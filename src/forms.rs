use std::collections::BTreeMap;

use tokio::sync::Mutex;
use tracing::debug;

use crate::form::FormState;

struct Inner {
    forms: BTreeMap<u64, FormState>,
    next_id: u64,
}

/// Live form instances, one per visitor. Ids only ever grow, so the first
/// entry of the map is always the oldest instance.
pub struct FormStore {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl FormStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                forms: BTreeMap::new(),
                next_id: 1,
            }),
            capacity: capacity.max(1),
        }
    }

    pub async fn create(&self) -> u64 {
        let mut inner = self.inner.lock().await;
        while inner.forms.len() >= self.capacity {
            if let Some((evicted, _)) = inner.forms.pop_first() {
                debug!(form_id = evicted, "evicting oldest form");
            }
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.forms.insert(id, FormState::default());
        id
    }

    /// Runs `f` against a form while holding the store lock. `None` if the
    /// form doesn't exist (or was evicted).
    pub async fn with<R>(&self, id: u64, f: impl FnOnce(&mut FormState) -> R) -> Option<R> {
        let mut inner = self.inner.lock().await;
        inner.forms.get_mut(&id).map(f)
    }
}
