use std::ops::Range;

use memchr::{memchr, memchr_iter};
use rayon::prelude::*;
use thiserror::Error;

use crate::column::StringColumn;

/// Minimum character-buffer size for parallel extraction (1MB).
/// Rayon overhead is ~5-10μs per task; below this, a single-threaded
/// pass finishes before the pool has fanned out.
const PARALLEL_THRESHOLD: usize = 1024 * 1024;

/// Rows per work item. Matches the 256-unit launch groups of the GPU
/// formulation this kernel derives from; here it amortizes rayon's
/// per-task overhead across enough rows to stay under 10%.
pub const GROUP_SIZE: usize = 256;

/// Configuration for one extraction pass, immutable for its duration.
pub struct ExtractConfig {
    /// Field separator. A single byte: rows are treated as byte sequences,
    /// so a delimiter byte inside a multi-byte encoded character splits it.
    pub delimiter: u8,
    /// Which delimiter-separated segment to extract, 0-based.
    pub field_index: usize,
    /// Output slot width in bytes. Segments longer than this are silently
    /// truncated; must be at least 1 (validated before launch).
    pub max_len: usize,
}

/// Configuration errors, surfaced by [`validate_config`] before a pass is
/// launched. The pass itself never fails: missing fields and oversized
/// segments are value-level outcomes (zero length, truncation).
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("max-len must be at least 1")]
    ZeroMaxLen,
}

/// Check a configuration before launching a pass. The kernel assumes these
/// invariants hold and does not re-check them on its hot path.
pub fn validate_config(cfg: &ExtractConfig) -> Result<(), ExtractError> {
    if cfg.max_len == 0 {
        return Err(ExtractError::ZeroMaxLen);
    }
    Ok(())
}

/// Fixed-stride output of an extraction pass.
///
/// `chars` holds `row_count * max_len` bytes; row `i` owns the slot
/// `[i*max_len, (i+1)*max_len)` exclusively. `lens[i]` is the number of
/// valid bytes at the start of slot `i` (0 ≤ lens[i] ≤ max_len). Bytes past
/// `lens[i]` are never written by the kernel and keep their allocation-time
/// value — length-tagged, not padded or terminated. Consumers must go
/// through `lens` (or [`FieldOutput::field`]) rather than scan slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutput {
    max_len: usize,
    chars: Vec<u8>,
    lens: Vec<u32>,
}

impl FieldOutput {
    /// A zero-initialized output for `row_count` rows of width `max_len`.
    pub fn zeroed(row_count: usize, max_len: usize) -> Self {
        FieldOutput {
            max_len,
            chars: vec![0u8; row_count * max_len],
            lens: vec![0u32; row_count],
        }
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.lens.len()
    }

    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// The valid bytes of row `i`'s extracted field (empty if the field was
    /// missing). Panics if `i >= row_count()`.
    #[inline]
    pub fn field(&self, i: usize) -> &[u8] {
        let start = i * self.max_len;
        &self.chars[start..start + self.lens[i] as usize]
    }

    /// The raw fixed-stride character buffer.
    #[inline]
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// Valid-prefix lengths, one per row.
    #[inline]
    pub fn lens(&self) -> &[u32] {
        &self.lens
    }

    /// Iterate over extracted fields in row order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.row_count()).map(move |i| self.field(i))
    }
}

/// Locate the `field_index`-th delimiter-separated segment of `row` in a
/// single left-to-right scan, without materializing the other segments.
/// Returns the segment's byte range within `row`, or `None` if the row has
/// fewer segments. Empty segments (consecutive delimiters, or an empty row
/// at index 0) are real segments and are returned as empty ranges.
#[inline(always)]
pub fn locate_field(row: &[u8], delimiter: u8, field_index: usize) -> Option<Range<usize>> {
    // Fast path for the first field: a single memchr decides everything.
    if field_index == 0 {
        return Some(0..memchr(delimiter, row).unwrap_or(row.len()));
    }

    let mut field_idx = 0;
    let mut field_start = 0;

    // SIMD delimiter scan; stops as soon as the target's end is known.
    for pos in memchr_iter(delimiter, row) {
        if field_idx == field_index {
            return Some(field_start..pos);
        }
        field_idx += 1;
        field_start = pos + 1;
    }

    if field_idx == field_index {
        // Target is the final segment (no trailing delimiter).
        return Some(field_start..row.len());
    }

    // Fewer segments than requested.
    None
}

/// Run an extraction pass into a caller-provided output buffer.
///
/// The output must have been allocated for exactly `col.row_count()` rows of
/// width `cfg.max_len` (see [`FieldOutput::zeroed`]); the configuration must
/// have passed [`validate_config`]. Each row's slot is written by exactly one
/// worker and no two workers share any output bytes, so the pass needs no
/// synchronization beyond the final join. Returns only once every row has
/// been processed; given equal inputs the output is byte-identical across
/// runs and thread counts.
pub fn extract_into(col: &StringColumn, cfg: &ExtractConfig, out: &mut FieldOutput) {
    debug_assert!(cfg.max_len >= 1);
    debug_assert_eq!(out.row_count(), col.row_count());
    debug_assert_eq!(out.max_len, cfg.max_len);

    if col.total_bytes() >= PARALLEL_THRESHOLD && rayon::current_num_threads() > 1 {
        // Disjoint &mut chunks prove slot ownership to the compiler:
        // each work item gets GROUP_SIZE rows' slots and lens, nothing else.
        out.chars
            .par_chunks_mut(GROUP_SIZE * cfg.max_len)
            .zip(out.lens.par_chunks_mut(GROUP_SIZE))
            .enumerate()
            .for_each(|(group, (chars, lens))| {
                extract_group(col, cfg, group * GROUP_SIZE, chars, lens);
            });
    } else {
        extract_group(col, cfg, 0, &mut out.chars, &mut out.lens);
    }
}

/// Allocate a zeroed output and run an extraction pass into it.
pub fn extract(col: &StringColumn, cfg: &ExtractConfig) -> FieldOutput {
    let mut out = FieldOutput::zeroed(col.row_count(), cfg.max_len);
    extract_into(col, cfg, &mut out);
    out
}

/// Process one group of rows: locate each row's target segment and copy its
/// (possibly truncated) bytes into the row's slot. `lens.len()` bounds the
/// group, so the tail group is simply shorter.
fn extract_group(
    col: &StringColumn,
    cfg: &ExtractConfig,
    base_row: usize,
    chars: &mut [u8],
    lens: &mut [u32],
) {
    let max_len = cfg.max_len;
    for (r, len_slot) in lens.iter_mut().enumerate() {
        let row = col.row(base_row + r);
        let copied = match locate_field(row, cfg.delimiter, cfg.field_index) {
            Some(seg) => {
                let n = seg.len().min(max_len);
                let slot_start = r * max_len;
                chars[slot_start..slot_start + n].copy_from_slice(&row[seg.start..seg.start + n]);
                n
            }
            None => 0,
        };
        *len_slot = copied as u32;
    }
}

/// Reference implementation: split every row into a full segment list, then
/// index it. Byte-identical output to [`extract`]; exists as the correctness
/// oracle for tests and the performance baseline for the criterion bench.
pub fn extract_split_baseline(col: &StringColumn, cfg: &ExtractConfig) -> FieldOutput {
    let mut out = FieldOutput::zeroed(col.row_count(), cfg.max_len);
    let mut segments: Vec<Range<usize>> = Vec::new();

    for i in 0..col.row_count() {
        let row = col.row(i);

        // The eager split the lazy kernel avoids: every segment, up front.
        segments.clear();
        let mut start = 0;
        for pos in memchr_iter(cfg.delimiter, row) {
            segments.push(start..pos);
            start = pos + 1;
        }
        segments.push(start..row.len());

        if let Some(seg) = segments.get(cfg.field_index) {
            let n = seg.len().min(cfg.max_len);
            let slot_start = i * cfg.max_len;
            out.chars[slot_start..slot_start + n]
                .copy_from_slice(&row[seg.start..seg.start + n]);
            out.lens[i] = n as u32;
        }
    }

    out
}
