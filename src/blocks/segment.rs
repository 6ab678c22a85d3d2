use crate::config::BlockSize;
use crate::error::Result;
use tracing::debug;

/// A borrowed view of one block of a byte sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Zero-based position of the block in the sequence
    pub index: usize,
    /// Byte offset of the first byte, always a multiple of the block size
    pub offset: usize,
    pub bytes: &'a [u8],
}

impl<'a> Block<'a> {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// One-based block number as shown to the user
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Byte offsets covered by this block
    pub fn positions(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.bytes.len()
    }
}

/// Segment data into blocks of the specified size
/// The last block is left short; no padding bytes are added
pub fn segment(data: &[u8], block_size: usize) -> Result<Vec<Block<'_>>> {
    let size = BlockSize::new(block_size)?;
    let blocks: Vec<Block<'_>> = data
        .chunks(size.get())
        .enumerate()
        .map(|(index, bytes)| Block {
            index,
            offset: index * size.get(),
            bytes,
        })
        .collect();

    debug!(len = data.len(), block_size, blocks = blocks.len(), "segmented");
    Ok(blocks)
}

/// Join blocks back into the original data
pub fn unsegment(blocks: &[Block<'_>]) -> Vec<u8> {
    let mut result = Vec::with_capacity(blocks.iter().map(Block::len).sum());
    for block in blocks {
        result.extend_from_slice(block.bytes);
    }
    result
}

/// Calculate number of blocks needed for data of given size
pub fn block_count(length: usize, block_size: usize) -> Result<usize> {
    let size = BlockSize::new(block_size)?.get();
    Ok(length.div_ceil(size))
}

/// Bytes required to complete the last block, in `0..block_size`
pub fn padding_needed(length: usize, block_size: usize) -> Result<usize> {
    let size = BlockSize::new(block_size)?.get();
    Ok(match length % size {
        0 => 0,
        rem => size - rem,
    })
}

/// Additional blocks caused by prepending `injected` bytes to a target
pub fn injection_block_delta(
    target_length: usize,
    injected: usize,
    block_size: usize,
) -> Result<usize> {
    let before = block_count(target_length, block_size)?;
    let after = block_count(target_length.saturating_add(injected), block_size)?;
    Ok(after - before)
}
