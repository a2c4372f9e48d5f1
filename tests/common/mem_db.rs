//! A simple, volatile, in-memory implementation of [`KVStore`].

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    vec,
};

use chain_store::block_store::pluggables::{KVError, KVGet, KVPair, KVStore, WriteBatch};

/// An in-memory implementation of [`KVStore`].
///
/// Besides the `KVStore` functionality, `MemDB` lets tests write raw bytes, make every operation fail,
/// and count how many of its prefix iterators are currently alive.
#[derive(Clone)]
pub(crate) struct MemDB {
    map: Arc<Mutex<BTreeMap<Vec<u8>, Vec<u8>>>>,
    failing: Arc<AtomicBool>,
    open_iterators: Arc<AtomicUsize>,
}

impl MemDB {
    /// Create a new, empty `MemDB`.
    pub(crate) fn new() -> MemDB {
        MemDB {
            map: Arc::new(Mutex::new(BTreeMap::new())),
            failing: Arc::new(AtomicBool::new(false)),
            open_iterators: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Write `value` at `key`, bypassing the block store.
    pub(crate) fn set_raw(&self, key: &[u8], value: &[u8]) {
        self.map.lock().unwrap().insert(key.to_vec(), value.to_vec());
    }

    /// Read the value at `key`, bypassing the block store.
    pub(crate) fn get_raw(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.map.lock().unwrap().get(key).cloned()
    }

    /// Get the number of key-value pairs stored.
    pub(crate) fn len(&self) -> usize {
        self.map.lock().unwrap().len()
    }

    /// Make every subsequent `get`, `prefix_iter`, and `write` fail (or succeed again).
    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get the number of iterators returned by `prefix_iter` that have not been dropped yet.
    pub(crate) fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::SeqCst)
    }

    fn check_failing(&self) -> Result<(), KVError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(KVError::new("injected MemDB failure"))
        } else {
            Ok(())
        }
    }
}

impl KVStore for MemDB {
    type WriteBatch = MemWriteBatch;

    fn write(&mut self, wb: Self::WriteBatch) -> Result<(), KVError> {
        self.check_failing()?;
        let mut map = self.map.lock().unwrap();
        for (key, value) in wb.insertions {
            map.insert(key, value);
        }
        Ok(())
    }
}

impl KVGet for MemDB {
    type PrefixIter<'a> = MemDBIter where Self: 'a;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVError> {
        self.check_failing()?;
        Ok(self.map.lock().unwrap().get(key).cloned())
    }

    fn prefix_iter(&self, prefix: &[u8]) -> Result<MemDBIter, KVError> {
        self.check_failing()?;
        let entries: Vec<KVPair> = self
            .map
            .lock()
            .unwrap()
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        self.open_iterators.fetch_add(1, Ordering::SeqCst);
        Ok(MemDBIter {
            entries: entries.into_iter(),
            open_iterators: self.open_iterators.clone(),
        })
    }
}

// A simple implementation of [`WriteBatch`].
pub(crate) struct MemWriteBatch {
    insertions: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl WriteBatch for MemWriteBatch {
    fn new() -> Self {
        MemWriteBatch {
            insertions: BTreeMap::new(),
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.insertions.insert(key.to_vec(), value.to_vec());
    }
}

/// Iterator over a copy of the entries under a prefix, taken when the iterator was created.
pub(crate) struct MemDBIter {
    entries: vec::IntoIter<KVPair>,
    open_iterators: Arc<AtomicUsize>,
}

impl Iterator for MemDBIter {
    type Item = Result<KVPair, KVError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(Ok)
    }
}

impl Drop for MemDBIter {
    fn drop(&mut self) {
        self.open_iterators.fetch_sub(1, Ordering::SeqCst);
    }
}
