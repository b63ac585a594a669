//! Iterative depth-first traversal reconstructing the sorted word list.

use std::io::Write;

use log::warn;

use crate::error::{DawgError, DawgErrorKind};
use crate::node::Node;

pub struct Dumper<'a> {
    arena: &'a [Node],
}

impl<'a> Dumper<'a> {
    pub fn new(arena: &'a [Node]) -> Self {
        Dumper { arena }
    }

    /// Writes every accepted word, one per line, in lexicographic order.
    ///
    /// A `CorruptGraph` condition aborts the traversal but is reported
    /// through the `corrupt` callback rather than returned as an error,
    /// matching this tool's "dump never hard-fails" behavior.
    pub fn dump<W: Write>(&self, out: &mut W) -> Result<(), DawgError> {
        if self.arena.is_empty() {
            return Ok(());
        }

        let mut stack: Vec<usize> = vec![0];
        loop {
            let &top = match stack.last() {
                Some(top) => top,
                None => return Ok(()),
            };

            let node = match self.arena.get(top) {
                Some(node) => *node,
                None => {
                    warn!("corrupt graph: index {top} out of bounds ({} nodes)", self.arena.len());
                    return Ok(());
                }
            };

            if node.end_of_word() {
                self.emit_word(&stack, out)
                    .map_err(|err| DawgErrorKind::Io.with_error(anyhow::anyhow!(err)))?;
            }

            if let Some(child) = node.child_index() {
                if child >= self.arena.len() {
                    warn!("corrupt graph: offset {} out of bounds ({} nodes)", child, self.arena.len());
                    return Ok(());
                }
                stack.push(child);
                continue;
            }

            self.advance(&mut stack);
        }
    }

    fn emit_word<W: Write>(&self, stack: &[usize], out: &mut W) -> std::io::Result<()> {
        let mut word = Vec::with_capacity(stack.len());
        for &index in stack {
            word.push(self.arena[index].letter());
        }
        out.write_all(&word)?;
        out.write_all(b"\n")
    }

    fn advance(&self, stack: &mut Vec<usize>) {
        while let Some(&top) = stack.last() {
            let node = self.arena[top];
            if node.end_of_node() {
                stack.pop();
            } else {
                *stack.last_mut().unwrap() += 1;
                return;
            }
        }
    }
}
