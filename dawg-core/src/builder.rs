//! Online, single-pass DAWG construction with suffix interning.

use std::io::BufRead;

use log::{debug, info};

use crate::edge_list::EdgeList;
use crate::error::{DawgError, DawgErrorKind};
use crate::interner::{Interner, ROOT_RESERVATION};
use crate::node::Node;
use crate::word_reader::WordReader;

const ROOT_GROUP_SIZE: usize = ROOT_RESERVATION;

pub struct Builder {
    interner: Interner,
    spine: Vec<EdgeList>,
    word_count: u64,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            interner: Interner::new(),
            spine: vec![EdgeList::new()],
            word_count: 0,
        }
    }

    /// Consume every word from `reader`, returning the finished arena.
    pub fn build<R: BufRead>(mut self, input: R) -> Result<Vec<Node>, DawgError> {
        let mut reader = WordReader::new(input);
        loop {
            let (prefix_len, word) = reader.next_word()?;
            self.insert(prefix_len, &word)?;
            if word.is_empty() {
                break;
            }
        }
        let word_count = self.word_count;
        let load_factor = self.interner.load_factor();
        let arena = self.finish()?;
        info!(
            "build complete: {word_count} words, {} arena edges, load factor {load_factor:.4}",
            arena.len()
        );
        Ok(arena)
    }

    fn insert(&mut self, prefix_len: usize, word: &[u8]) -> Result<(), DawgError> {
        let depth = self.spine.len() - 1;
        if prefix_len > depth {
            return Err(DawgErrorKind::PrefixOverflow
                .with_error(anyhow::anyhow!("common prefix {prefix_len} exceeds spine depth {depth}")));
        }

        while self.spine.len() - 1 > prefix_len {
            self.fold_one()?;
        }

        if word.is_empty() {
            return if self.spine.len() == 1 {
                Ok(())
            } else {
                Err(DawgErrorKind::DanglingEdges
                    .with_error(anyhow::anyhow!("input ended with open spine")))
            };
        }

        self.word_count += 1;
        let mut idx = self.spine.len() - 1;
        while idx < word.len() {
            let letter = word[idx];
            let end_of_word = idx + 1 == word.len();
            self.spine.last_mut().unwrap().push(Node::new(letter, end_of_word, false, 0));
            self.spine.push(EdgeList::new());
            idx += 1;
        }
        Ok(())
    }

    fn fold_one(&mut self) -> Result<(), DawgError> {
        let ready = self.spine.pop().expect("spine never empties during fold");
        if !ready.is_empty() {
            let mut ready = ready;
            let last = ready.last_mut().unwrap();
            last.set_end_of_node(true);
            let offset = self.interner.intern(&ready)?;
            let parent = self.spine.last_mut().unwrap();
            parent.last_mut().unwrap().set_offset(offset);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Node>, DawgError> {
        while self.spine.len() > 1 {
            self.fold_one()?;
        }
        let root = self.spine.pop().expect("root edge list always present");

        let mut arena = std::mem::take(self.interner.arena_mut());
        if root.is_empty() {
            debug!("empty lexicon: arena stays empty, no root padding written");
            return Ok(Vec::new());
        }

        let mut root_edges = root.into_vec();
        root_edges.last_mut().unwrap().set_end_of_node(true);
        root_edges.resize(ROOT_GROUP_SIZE, Node::default());
        root_edges[ROOT_GROUP_SIZE - 1].set_end_of_node(true);

        arena[..ROOT_GROUP_SIZE].copy_from_slice(&root_edges);
        debug!("root group padded to {ROOT_GROUP_SIZE} entries");
        Ok(arena)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn build_words(text: &str) -> Vec<Node> {
        Builder::new().build(Cursor::new(text.as_bytes().to_vec())).unwrap()
    }

    fn root_edge(arena: &[Node], letter: u8) -> Node {
        arena[..ROOT_GROUP_SIZE]
            .iter()
            .copied()
            .find(|n| n.letter() == letter && (n.end_of_word() || n.end_of_node() || n.offset() != 0))
            .unwrap_or_else(|| panic!("no root edge for {letter}"))
    }

    #[test]
    fn empty_lexicon_produces_empty_arena() {
        assert!(build_words("").is_empty());
        assert!(build_words("a\n").is_empty());
    }

    #[test]
    fn single_word_produces_padded_root_plus_one_group() {
        let arena = build_words("at\n");
        assert_eq!(arena.len(), ROOT_GROUP_SIZE + 1);
        assert!(arena[ROOT_GROUP_SIZE - 1].end_of_node());
        let a_slot = root_edge(&arena, b'a');
        assert!(!a_slot.end_of_word());
        let child_index = a_slot.child_index().unwrap();
        let t_node = arena[child_index];
        assert_eq!(t_node.letter(), b't');
        assert!(t_node.end_of_word());
        assert!(t_node.end_of_node());
    }

    #[test]
    fn shared_suffix_is_interned_once() {
        let arena = build_words("cars jars\n");
        let c_slot = root_edge(&arena, b'c');
        let j_slot = root_edge(&arena, b'j');
        assert_eq!(c_slot.offset(), j_slot.offset());
        assert_ne!(c_slot.offset(), 0);
    }

    #[test]
    fn prefix_of_prefix_sets_both_end_of_word_and_offset() {
        let arena = build_words("car cars\n");
        let c_slot = root_edge(&arena, b'c');
        let a_index = c_slot.child_index().unwrap();
        let a_node = arena[a_index];
        assert_eq!(a_node.letter(), b'a');
        let r_index = a_node.child_index().unwrap();
        let r_node = arena[r_index];
        assert_eq!(r_node.letter(), b'r');
        assert!(r_node.end_of_word());
        assert!(r_node.offset() != 0);
    }

    #[test]
    fn out_of_order_input_fails_without_partial_commit() {
        let result = Builder::new().build(Cursor::new(b"bat apple\n".to_vec()));
        assert_eq!(result.unwrap_err().kind(), DawgErrorKind::OutOfOrder);
    }
}
