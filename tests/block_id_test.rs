//! Tests for the encoding of [`BlockID`]s into keys.
//!
//! Every scan the block store performs relies on two properties of the key encoding:
//! 1. Distinct blocks get distinct keys, none of which collide with the finality pointer's key.
//! 2. Keys sort by height first, numerically, then by hash.

use chain_store::{
    block_store::variables::{
        block_id_from_key, block_key, blocks_at_height_prefix, BLOCKS, BLOCK_KEY_LEN,
        LAST_FINALIZED_BLOCK,
    },
    types::{
        block::Block,
        data_types::{BlockHeight, BlockID, CryptoHash, Data, FinalityPointer},
    },
};

const HEIGHTS: [u64; 10] = [
    0,
    1,
    255,
    256,
    65_535,
    65_536,
    u32::MAX as u64,
    u32::MAX as u64 + 1,
    u64::MAX - 1,
    u64::MAX,
];

fn hashes() -> Vec<CryptoHash> {
    let mut last = [0u8; 32];
    last[31] = 1;
    vec![
        CryptoHash::new([0u8; 32]),
        CryptoHash::new(last),
        CryptoHash::new([0x80; 32]),
        CryptoHash::new([0xff; 32]),
    ]
}

fn all_ids() -> Vec<BlockID> {
    HEIGHTS
        .iter()
        .flat_map(|height| {
            hashes()
                .into_iter()
                .map(move |hash| BlockID::new(BlockHeight::new(*height), hash))
        })
        .collect()
}

#[test]
fn block_id_bytes_are_height_then_hash() {
    let hash = CryptoHash::new([0xab; 32]);
    let id = BlockID::new(BlockHeight::new(0x0102_0304_0506_0708), hash);
    let bytes = id.bytes();

    assert_eq!(bytes.len(), BlockID::ENCODED_LEN);
    assert_eq!(&bytes[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(&bytes[8..], &[0xab; 32]);
    assert_eq!(BlockID::from_bytes(&bytes), Some(id));
}

#[test]
fn block_id_from_bytes_rejects_wrong_lengths() {
    let bytes = BlockID::new(BlockHeight::new(7), CryptoHash::new([1u8; 32])).bytes();

    assert_eq!(BlockID::from_bytes(&[]), None);
    assert_eq!(BlockID::from_bytes(&bytes[..39]), None);
    let mut longer = bytes.to_vec();
    longer.push(0);
    assert_eq!(BlockID::from_bytes(&longer), None);
}

#[test]
fn key_order_matches_height_then_hash_order() {
    let mut by_value = all_ids();
    by_value.sort();

    let mut by_key = all_ids();
    by_key.sort_by_key(block_key);

    assert_eq!(by_value, by_key);
    for pair in by_value.windows(2) {
        assert!(block_key(&pair[0]) < block_key(&pair[1]));
    }
}

#[test]
fn keys_are_unique_and_never_collide_with_finality_key() {
    let ids = all_ids();
    for (i, a) in ids.iter().enumerate() {
        let key = block_key(a);
        assert_eq!(key.len(), BLOCK_KEY_LEN);
        assert_eq!(key[0], BLOCKS[0]);
        assert_ne!(key.as_slice(), LAST_FINALIZED_BLOCK.as_slice());
        assert!(!key.starts_with(&LAST_FINALIZED_BLOCK));
        assert_eq!(block_id_from_key(&key), Some(*a));

        for b in &ids[i + 1..] {
            assert_ne!(key, block_key(b), "{} and {} share a key", a, b);
        }
    }
}

#[test]
fn same_height_blocks_differ_only_by_hash() {
    let parent = Block::genesis(Data::new(b"genesis".to_vec()));
    let b1 = Block::child_of(&parent, Data::new(b"one".to_vec())).unwrap();
    let b2 = Block::child_of(&parent, Data::new(b"two".to_vec())).unwrap();
    let b1_again = Block::child_of(&parent, Data::new(b"one".to_vec())).unwrap();

    assert_ne!(b1.hash, b2.hash);
    assert_ne!(block_key(&b1.id()), block_key(&b2.id()));
    assert_eq!(block_key(&b1.id()), block_key(&b1_again.id()));
}

#[test]
fn height_prefix_covers_exactly_one_height() {
    for height in HEIGHTS {
        let prefix = blocks_at_height_prefix(BlockHeight::new(height));
        for id in all_ids() {
            let in_range = block_key(&id).starts_with(&prefix);
            assert_eq!(in_range, id.height.int() == height);
        }
    }
}

#[test]
fn block_id_from_key_rejects_non_block_keys() {
    assert_eq!(block_id_from_key(&LAST_FINALIZED_BLOCK), None);
    assert_eq!(block_id_from_key(&[]), None);

    let mut wrong_prefix = block_key(&BlockID::new(BlockHeight::new(1), CryptoHash::zero()));
    wrong_prefix[0] = LAST_FINALIZED_BLOCK[0];
    assert_eq!(block_id_from_key(&wrong_prefix), None);
}

#[test]
fn blocks_know_their_parents() {
    let genesis = Block::genesis(Data::new(b"genesis".to_vec()));
    let child = Block::child_of(&genesis, Data::new(b"child".to_vec())).unwrap();

    assert_eq!(genesis.parent_id(), None);
    assert_eq!(child.parent_id(), Some(genesis.id()));
    assert_eq!(child.height, BlockHeight::new(1));
    assert!(genesis.is_correct());
    assert!(child.is_correct());

    let mut tampered = child.clone();
    tampered.data = Data::new(b"something else".to_vec());
    assert!(!tampered.is_correct());
}

#[test]
fn encoded_blocks_decode_to_themselves() {
    let block = Block::new(
        BlockHeight::new(12),
        CryptoHash::new([4u8; 32]),
        Data::new(vec![0, 1, 2, 3]),
    );
    let bytes = block.encode().unwrap();

    assert_eq!(Block::decode(&bytes).unwrap(), block);
    assert!(Block::decode(&bytes[..bytes.len() - 1]).is_err());
    assert!(Block::decode(&[0xde, 0xad]).is_err());
}

#[test]
fn heights_stop_at_their_bounds() {
    assert_eq!(BlockHeight::new(0).checked_prev(), None);
    assert_eq!(BlockHeight::new(u64::MAX).checked_next(), None);
    assert_eq!(
        BlockHeight::new(u64::MAX - 1).checked_next(),
        Some(BlockHeight::new(u64::MAX))
    );

    let highest = Block::new(
        BlockHeight::new(u64::MAX),
        CryptoHash::new([2u8; 32]),
        Data::new(b"highest".to_vec()),
    );
    assert_eq!(Block::child_of(&highest, Data::new(b"above".to_vec())), None);
}

#[test]
fn data_reports_its_length() {
    let empty = Data::new(Vec::new());
    assert!(empty.is_empty());
    assert_eq!(empty.len(), 0);

    let data = Data::new(b"four".to_vec());
    assert!(!data.is_empty());
    assert_eq!(data.len(), 4);
    assert_eq!(data.bytes(), b"four");
}

#[test]
fn finality_pointer_exposes_its_block() {
    let id = BlockID::new(BlockHeight::new(3), CryptoHash::new([5u8; 32]));

    assert_eq!(FinalityPointer::Unset.block(), None);
    assert_eq!(FinalityPointer::Set(id).block(), Some(id));
}
