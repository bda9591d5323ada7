use memchr::memchr_iter;
use thiserror::Error;

/// Errors raised while building a column.
#[derive(Debug, Error)]
pub enum ColumnError {
    /// The flat character buffer is addressed by 32-bit offsets, so a single
    /// column can hold at most `u32::MAX` bytes of character data.
    #[error("character data exceeds the 4 GiB column limit")]
    Overflow,
}

/// A column of variable-length byte strings stored as two flat buffers:
/// `offsets` (N+1 monotonically non-decreasing values, `offsets[0] == 0`)
/// and `chars` (all rows' bytes, contiguous). Row `i` spans
/// `chars[offsets[i]..offsets[i+1]]`. This is the standard columnar string
/// layout (Arrow/cuDF), which is why offsets are 32-bit.
///
/// Rows are only ever addressed through `offsets`; the column is immutable
/// once handed to the extraction kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringColumn {
    offsets: Vec<u32>,
    chars: Vec<u8>,
}

impl Default for StringColumn {
    fn default() -> Self {
        Self::new()
    }
}

impl StringColumn {
    /// An empty column (zero rows).
    pub fn new() -> Self {
        StringColumn {
            offsets: vec![0],
            chars: Vec::new(),
        }
    }

    /// An empty column with space reserved for `rows` rows of roughly
    /// `bytes` total character data.
    pub fn with_capacity(rows: usize, bytes: usize) -> Self {
        let mut offsets = Vec::with_capacity(rows + 1);
        offsets.push(0);
        StringColumn {
            offsets,
            chars: Vec::with_capacity(bytes),
        }
    }

    /// Append one row. Fails only if the character buffer would outgrow
    /// its 32-bit offset space.
    pub fn push(&mut self, row: &[u8]) -> Result<(), ColumnError> {
        let end = self
            .chars
            .len()
            .checked_add(row.len())
            .filter(|&e| e <= u32::MAX as usize)
            .ok_or(ColumnError::Overflow)?;
        self.chars.extend_from_slice(row);
        self.offsets.push(end as u32);
        Ok(())
    }

    /// Build a column from an iterator of rows.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, ColumnError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut col = StringColumn::new();
        for row in rows {
            col.push(row.as_ref())?;
        }
        Ok(col)
    }

    /// Build a column from a line-delimited byte buffer, one row per line.
    /// A trailing `line_delim` terminates the last row rather than opening
    /// an empty one, so `b"a\nb\n"` yields two rows.
    pub fn from_delimited(data: &[u8], line_delim: u8) -> Result<Self, ColumnError> {
        let rows = memchr_iter(line_delim, data).count() + 1;
        let mut col = StringColumn::with_capacity(rows, data.len());
        col.extend_delimited(data, line_delim)?;
        Ok(col)
    }

    /// Append the rows of a line-delimited byte buffer to this column.
    pub fn extend_delimited(&mut self, data: &[u8], line_delim: u8) -> Result<(), ColumnError> {
        let mut start = 0;
        for end in memchr_iter(line_delim, data) {
            self.push(&data[start..end])?;
            start = end + 1;
        }
        if start < data.len() {
            self.push(&data[start..])?;
        }
        Ok(())
    }

    /// Number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Total bytes of character data across all rows.
    #[inline]
    pub fn total_bytes(&self) -> usize {
        self.chars.len()
    }

    /// The bytes of row `i`. Panics if `i >= row_count()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[u8] {
        let start = self.offsets[i] as usize;
        let end = self.offsets[i + 1] as usize;
        &self.chars[start..end]
    }

    /// The raw offsets buffer (length `row_count() + 1`).
    #[inline]
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// The raw character buffer.
    #[inline]
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// Iterate over row byte slices in order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.row_count()).map(move |i| self.row(i))
    }
}
