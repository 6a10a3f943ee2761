//! Size-bounded line chunker.
//!
//! Packs the merged line sequence into [`Chunk`]s whose raw text stays at or
//! under a byte threshold, so each output file remains within its encoded
//! size budget after base64 expansion. Packing is greedy and single-pass:
//! lines fill the current chunk until the next line would push it over the
//! threshold, at which point the chunk is closed and a new one started.
//! Lines are never split across chunks.
//!
//! Each chunk opens with a `# Generated on: ...` header line recording the
//! generation timestamp.

use chrono::{DateTime, Utc};

use crate::models::Chunk;

/// Format the header line that opens every chunk.
pub fn header_line(generated_at: DateTime<Utc>) -> String {
    format!(
        "# Generated on: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S %Z")
    )
}

/// Pack `lines` into chunks whose raw size stays at or under `threshold`
/// bytes, counting one separator byte per line. Returns chunks with
/// contiguous 1-based indices. Empty input yields no chunks.
///
/// A single line larger than the threshold is not split: it occupies a chunk
/// by itself (plus the header line), and that chunk exceeds the nominal
/// threshold.
pub fn pack_lines(lines: &[String], threshold: usize, generated_at: DateTime<Utc>) -> Vec<Chunk> {
    let header = header_line(generated_at);

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = vec![&header];
    let mut current_size = header.len();

    for line in lines {
        let would_be = current_size + 1 + line.len(); // +1 for \n separator

        // Close the chunk only if it already holds a real line; otherwise
        // the oversized line lands alone in this chunk.
        if would_be > threshold && current.len() > 1 {
            chunks.push(make_chunk(chunks.len() + 1, &current));
            current.truncate(1);
            current_size = header.len();
        }

        current.push(line);
        current_size += 1 + line.len();
    }

    // Flush the trailing chunk, unless it holds nothing but the header.
    if current.len() > 1 {
        chunks.push(make_chunk(chunks.len() + 1, &current));
    }

    chunks
}

fn make_chunk(index: usize, lines: &[&str]) -> Chunk {
    Chunk {
        index,
        text: lines.join("\n"),
        line_count: lines.len() - 1,
    }
}
