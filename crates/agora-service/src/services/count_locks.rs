//! Striped locks serializing projection writes per parent

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use agora_core::ParentRef;
use tokio::sync::{Mutex, MutexGuard};

const STRIPES: usize = 64;

/// Fixed set of async mutexes; a parent always maps to the same stripe
///
/// A projection row is read from the ledger and written back under the
/// parent's stripe, so the last writer always stores the newest count.
pub(crate) struct CountLocks {
    stripes: Vec<Mutex<()>>,
}

impl CountLocks {
    pub(crate) fn new() -> Self {
        Self {
            stripes: (0..STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    pub(crate) async fn lock(&self, parent: ParentRef) -> MutexGuard<'_, ()> {
        self.stripes[Self::stripe(parent)].lock().await
    }

    fn stripe(parent: ParentRef) -> usize {
        let mut hasher = DefaultHasher::new();
        parent.hash(&mut hasher);
        (hasher.finish() % STRIPES as u64) as usize
    }
}

impl std::fmt::Debug for CountLocks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountLocks")
            .field("stripes", &self.stripes.len())
            .finish()
    }
}
