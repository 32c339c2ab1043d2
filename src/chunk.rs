//! Raw video chunk splitting.
//!
//! A raw PlayStation motion-video file is an ordered run of fixed-size
//! bitstream chunks, one per frame. Splitting is a pure slicing operation:
//! a chunk's position in the output is its frame index.

/// Size of one raw frame chunk in bytes.
pub const CHUNK_SIZE: usize = 0x2000;

/// Split raw video bytes into per-frame chunks.
///
/// Every chunk is exactly [`CHUNK_SIZE`] bytes except the last, which holds
/// whatever remains. Concatenating the returned slices reconstructs `data`
/// exactly. Empty input yields no chunks.
///
/// # Example
///
/// ```
/// use psxframes::chunk;
///
/// let data = vec![0u8; chunk::CHUNK_SIZE + 100];
/// let chunks = chunk::split(&data);
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].len(), chunk::CHUNK_SIZE);
/// assert_eq!(chunks[1].len(), 100);
/// ```
pub fn split(data: &[u8]) -> Vec<&[u8]> {
    data.chunks(CHUNK_SIZE).collect()
}

/// Number of chunks (and therefore frames) a source of `len` bytes holds.
pub fn chunk_count(len: usize) -> usize {
    len.div_ceil(CHUNK_SIZE)
}
