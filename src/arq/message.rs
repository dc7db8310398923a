//! Message fragmentation and reassembly.
//!
//! An application message is sliced into fixed-capacity chunks for the
//! single-frame Stop-and-Wait exchanges. The final chunk always carries a
//! zero terminator byte so the receiver sees an unambiguous end marker:
//! a short final slice is extended with one zero byte and zero-padded to
//! capacity; a message whose length is an exact multiple of the chunk size
//! (including the empty message) gets an extra all-zero terminator chunk.
//!
//! `reassemble(fragment(d, n)) == d` for every message `d` free of interior
//! zero bytes, including the empty message.

/// Slice `data` into `chunk_size`-byte chunks with a zero end marker.
///
/// # Panics
///
/// Panics if `chunk_size` is zero.
pub fn fragment(data: &[u8], chunk_size: usize) -> Vec<Vec<u8>> {
    assert!(chunk_size > 0, "chunk_size must be nonzero");
    let mut chunks: Vec<Vec<u8>> = Vec::with_capacity(data.len() / chunk_size + 1);
    for piece in data.chunks(chunk_size) {
        if piece.len() == chunk_size {
            chunks.push(piece.to_vec());
        } else {
            let mut last = Vec::with_capacity(chunk_size);
            last.extend_from_slice(piece);
            last.push(0);
            last.resize(chunk_size, 0);
            chunks.push(last);
        }
    }
    if data.len() % chunk_size == 0 {
        // Exact multiple (or empty): the end marker needs its own chunk.
        chunks.push(vec![0u8; chunk_size]);
    }
    chunks
}

/// Concatenate `chunks` in arrival order and truncate at the first zero
/// byte (the end marker written by [`fragment`]).
pub fn reassemble<C: AsRef<[u8]>>(chunks: &[C]) -> Vec<u8> {
    let mut data: Vec<u8> = chunks
        .iter()
        .flat_map(|c| c.as_ref().iter().copied())
        .collect();
    if let Some(end) = data.iter().position(|&b| b == 0) {
        data.truncate(end);
    }
    data
}

/// Whether `chunk` is the final chunk of a message (carries the zero end
/// marker).
pub fn is_final_chunk(chunk: &[u8]) -> bool {
    chunk.contains(&0)
}
