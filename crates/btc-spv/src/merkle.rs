//! Merkle inclusion proofs over double-SHA256 trees.

use tbtc_primitives::{Buf32, hash};

/// Recomputes the merkle root reached from `leaf` by the sibling path in
/// `proof`, returning [`None`] if the proof is not a whole number of
/// 32-byte nodes or `index` has bits beyond the path depth.
///
/// Bit `i` of `index` says whether the running hash is the right child at
/// level `i`.
pub fn compute_merkle_root(leaf: &Buf32, proof: &[u8], index: u64) -> Option<Buf32> {
    if proof.len() % 32 != 0 {
        return None;
    }
    let depth = proof.len() / 32;
    if depth < 64 && index >> depth != 0 {
        return None;
    }

    let mut current = *leaf;
    for (level, chunk) in proof.chunks_exact(32).enumerate() {
        let sibling = Buf32::try_from(chunk).ok()?;
        current = if (index >> level) & 1 == 1 {
            hash::sha256d_pair(&sibling, &current)
        } else {
            hash::sha256d_pair(&current, &sibling)
        };
    }
    Some(current)
}

/// Checks that `txid` sits at position `tx_index` of the tree committed to by
/// `merkle_root`.
///
/// `merkle_proof` is the concatenation of the sibling nodes from the leaf
/// level upward; neither the txid nor the root is included. An empty proof
/// only verifies a single-transaction block, where the txid is the root.
pub fn verify_merkle_inclusion(
    txid: &Buf32,
    merkle_proof: &[u8],
    tx_index: u64,
    merkle_root: &Buf32,
) -> bool {
    compute_merkle_root(txid, merkle_proof, tx_index).is_some_and(|root| root == *merkle_root)
}

/// Builds the sibling path for `leaves[index]` and the root of the tree.
///
/// Odd levels duplicate their last node, as Bitcoin does.
///
/// # Panics
///
/// If `index` is out of bounds.
pub fn build_merkle_path(leaves: &[Buf32], index: usize) -> (Vec<u8>, Buf32) {
    assert!(index < leaves.len(), "merkle: leaf index out of bounds");

    let mut level = leaves.to_vec();
    let mut pos = index;
    let mut path = Vec::new();
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            level.push(level[level.len() - 1]);
        }
        path.extend_from_slice(level[pos ^ 1].as_slice());
        level = level
            .chunks_exact(2)
            .map(|pair| hash::sha256d_pair(&pair[0], &pair[1]))
            .collect();
        pos /= 2;
    }
    (path, level[0])
}
