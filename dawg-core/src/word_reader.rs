//! Reads whitespace-separated byte tokens from a `BufRead`, enforcing sort order.

use std::io::BufRead;

use crate::error::{DawgError, DawgErrorKind};

/// Smallest token length the builder will accept; shorter tokens are skipped.
const MIN_TOKEN_LEN: usize = 2;

pub struct WordReader<R> {
    inner: R,
    previous: Vec<u8>,
}

impl<R: BufRead> WordReader<R> {
    pub fn new(inner: R) -> Self {
        WordReader {
            inner,
            previous: Vec::new(),
        }
    }

    /// Returns the next `(common_prefix_length, word)` pair, or `(0, vec![])` at end of input.
    pub fn next_word(&mut self) -> Result<(usize, Vec<u8>), DawgError> {
        loop {
            let token = self.read_token()?;
            let Some(token) = token else {
                return Ok((0, Vec::new()));
            };
            if token.len() < MIN_TOKEN_LEN {
                continue;
            }

            let prefix_len = common_prefix_len(&self.previous, &token);
            if prefix_len == token.len()
                || (prefix_len < self.previous.len() && token[prefix_len] < self.previous[prefix_len])
            {
                return Err(DawgErrorKind::OutOfOrder.with_error(anyhow::anyhow!(
                    "token out of order: previous={:?}, token={:?}",
                    String::from_utf8_lossy(&self.previous),
                    String::from_utf8_lossy(&token)
                )));
            }

            self.previous = token.clone();
            return Ok((prefix_len, token));
        }
    }

    fn read_token(&mut self) -> Result<Option<Vec<u8>>, DawgError> {
        let mut token = Vec::new();
        loop {
            let buf = self
                .inner
                .fill_buf()
                .map_err(|err| DawgErrorKind::Io.with_error(anyhow::anyhow!(err)))?;
            if buf.is_empty() {
                return Ok(if token.is_empty() { None } else { Some(token) });
            }

            let mut consumed = 0;
            for &byte in buf {
                consumed += 1;
                if byte.is_ascii_whitespace() {
                    if !token.is_empty() {
                        self.inner.consume(consumed);
                        return Ok(Some(token));
                    }
                } else {
                    token.push(byte);
                }
            }
            self.inner.consume(consumed);
        }
    }
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}
