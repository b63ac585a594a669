//! Open-addressed hash table mapping edge-group fingerprints to arena offsets.

use log::debug;

use crate::edge_list::EdgeList;
use crate::error::{DawgError, DawgErrorKind};
use crate::node::{Node, MAX_OFFSET};

/// Prime chosen roughly 20% larger than the largest anticipated unique-state count.
pub const HASH_TABLE_SIZE: u32 = 240_007;

const INITIAL_INCREMENT: u32 = 9;
const INCREMENT_STEP: u32 = 8;

/// Number of slots reserved at the front of the arena for the root edge group.
/// Edge lists are never interned into this region, so offsets handed out by
/// `intern` already account for it and require no later adjustment once the
/// root group is written in place.
pub const ROOT_RESERVATION: usize = 256;

pub struct Interner {
    slots: Vec<u32>,
    arena: Vec<Node>,
    interned: u32,
}

impl Interner {
    pub fn new() -> Self {
        Interner {
            slots: vec![0; HASH_TABLE_SIZE as usize],
            arena: vec![Node::default(); ROOT_RESERVATION],
            interned: 0,
        }
    }

    pub fn arena(&self) -> &[Node] {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Vec<Node> {
        &mut self.arena
    }

    pub fn load_factor(&self) -> f64 {
        self.interned as f64 / HASH_TABLE_SIZE as f64
    }

    /// Insert-or-find `edges` in the table, returning its 1-based arena offset.
    pub fn intern(&mut self, edges: &EdgeList) -> Result<u32, DawgError> {
        let mut slot = (edges.hash() % HASH_TABLE_SIZE) as usize;
        let initial_slot = slot;
        let mut increment = INITIAL_INCREMENT;

        loop {
            let stored = self.slots[slot];
            if stored == 0 {
                let arena_index = self.arena.len();
                if arena_index as u64 + edges.len() as u64 > MAX_OFFSET as u64 {
                    return Err(DawgErrorKind::ArenaOverflow
                        .with_error(anyhow::anyhow!("arena offset exceeds 21-bit field")));
                }
                self.arena.extend_from_slice(edges.as_slice());
                self.slots[slot] = arena_index as u32 + 1;
                self.interned += 1;
                if self.interned % 4096 == 0 {
                    debug!(
                        "interner load factor now {:.4} ({} entries)",
                        self.load_factor(),
                        self.interned
                    );
                }
                return Ok(arena_index as u32 + 1);
            }

            let stored_index = stored as usize - 1;
            if edges.matches(&self.arena[stored_index..]) {
                return Ok(stored as u32);
            }

            slot = ((slot as u64 + increment as u64) % HASH_TABLE_SIZE as u64) as usize;
            increment = (increment + INCREMENT_STEP) % HASH_TABLE_SIZE;
            if slot == initial_slot {
                return Err(DawgErrorKind::HashTableFull
                    .with_error(anyhow::anyhow!("interner probe sequence exhausted")));
            }
        }
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
