//! Binary file framing: a little-endian edge count followed by packed nodes.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{DawgError, DawgErrorKind};
use crate::node::Node;

pub fn write_arena<W: Write>(out: &mut W, arena: &[Node]) -> Result<(), DawgError> {
    out.write_u32::<LittleEndian>(arena.len() as u32)
        .map_err(|err| DawgErrorKind::Io.with_error(anyhow::anyhow!(err)))?;
    for node in arena {
        out.write_u32::<LittleEndian>(node.to_u32())
            .map_err(|err| DawgErrorKind::Io.with_error(anyhow::anyhow!(err)))?;
    }
    Ok(())
}

pub fn read_arena<R: Read>(input: &mut R) -> Result<Vec<Node>, DawgError> {
    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .map_err(|err| DawgErrorKind::Io.with_error(anyhow::anyhow!(err)))?;

    if bytes.len() < 4 {
        return Err(DawgErrorKind::CorruptFile
            .with_error(anyhow::anyhow!("file too short for a count header")));
    }
    let mut cursor = &bytes[..];
    let count = cursor
        .read_u32::<LittleEndian>()
        .map_err(|err| DawgErrorKind::CorruptFile.with_error(anyhow::anyhow!(err)))?;

    let expected_len = 4u64 + 4u64 * count as u64;
    if bytes.len() as u64 != expected_len {
        return Err(DawgErrorKind::CorruptFile.with_error(anyhow::anyhow!(
            "file length {} does not match header count {count} (expected {expected_len})",
            bytes.len()
        )));
    }

    let mut arena = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let value = cursor
            .read_u32::<LittleEndian>()
            .map_err(|err| DawgErrorKind::CorruptFile.with_error(anyhow::anyhow!(err)))?;
        arena.push(Node::from_u32(value));
    }
    Ok(arena)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trips_an_arena_through_a_buffer() {
        let arena = vec![Node::new(b'a', true, true, 0)];
        let mut buffer = Vec::new();
        write_arena(&mut buffer, &arena).unwrap();
        assert_eq!(buffer.len(), 4 + 4);
        let restored = read_arena(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(restored, arena);
    }

    #[test]
    fn empty_arena_round_trips_to_a_bare_header() {
        let mut buffer = Vec::new();
        write_arena(&mut buffer, &[]).unwrap();
        assert_eq!(buffer, vec![0, 0, 0, 0]);
        let restored = read_arena(&mut Cursor::new(buffer)).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn mismatched_length_is_corrupt_file() {
        let mut buffer = Vec::new();
        write_arena(&mut buffer, &[Node::new(b'a', true, true, 0)]).unwrap();
        buffer.push(0); // trailing garbage byte
        let err = read_arena(&mut Cursor::new(buffer)).unwrap_err();
        assert_eq!(err.kind(), DawgErrorKind::CorruptFile);
    }

    #[test]
    fn truncated_header_is_corrupt_file() {
        let err = read_arena(&mut Cursor::new(vec![1, 2])).unwrap_err();
        assert_eq!(err.kind(), DawgErrorKind::CorruptFile);
    }
}
