use crate::column::{ColumnError, StringColumn};

/// A simple seeded random number generator for synthetic columns.
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn from_seed(seed: u64) -> Self {
        let state = if seed == 0 { 0x12345678_9abcdef0 } else { seed };
        Rng { state }
    }

    /// xorshift64 PRNG
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Return a random index in [0, n) using rejection sampling to avoid modulo bias
    pub fn gen_range(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        let n = n as u64;
        let threshold = u64::MAX - (u64::MAX % n);
        loop {
            let r = self.next_u64();
            if r < threshold {
                return (r % n) as usize;
            }
        }
    }
}

/// Generate `rows` synthetic log identifiers of the form `user_id_<n>_log`
/// with `n` in [1000, 9999], the workload the kernel was tuned on.
/// Deterministic for a given seed.
pub fn synthetic_log_column(rows: usize, seed: u64) -> Result<StringColumn, ColumnError> {
    let mut rng = Rng::from_seed(seed);
    let mut buf = itoa::Buffer::new();
    // "user_id_" + 4 digits + "_log" = 16 bytes per row
    let mut col = StringColumn::with_capacity(rows, rows * 16);
    let mut row = Vec::with_capacity(16);

    for _ in 0..rows {
        let n = 1000 + rng.gen_range(9000);
        row.clear();
        row.extend_from_slice(b"user_id_");
        row.extend_from_slice(buf.format(n).as_bytes());
        row.extend_from_slice(b"_log");
        col.push(&row)?;
    }

    Ok(col)
}
