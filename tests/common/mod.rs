pub(crate) mod logging;

pub(crate) mod mem_db;

use chain_store::{
    block_store::accessors::internal::BlockStore,
    config::Configuration,
    types::{block::Block, data_types::Data},
};

use mem_db::MemDB;

/// Create a block store on top of a fresh `MemDB`, returning both so that tests can tamper with the
/// key-value store directly.
pub(crate) fn new_block_store() -> (BlockStore<MemDB>, MemDB) {
    let kv_store = MemDB::new();
    let config = Configuration::builder().log_events(true).build();
    (BlockStore::new(kv_store.clone(), config), kv_store)
}

/// Create `Data` from a string, to keep test blocks readable.
pub(crate) fn data(s: &str) -> Data {
    Data::new(s.as_bytes().to_vec())
}

/// Create a block extending `parent` with `label` as its data.
pub(crate) fn child(parent: &Block, label: &str) -> Block {
    Block::child_of(parent, data(label)).unwrap()
}
