use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};

/// Holds file data — either zero-copy mmap or an owned Vec.
/// Dereferences to `&[u8]` for transparent use.
pub enum FileData {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Deref for FileData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileData::Mmap(m) => m,
            FileData::Owned(v) => v,
        }
    }
}

/// Threshold below which we use read() instead of mmap.
/// Under 1MB the mmap setup/teardown (page tables, TLB flush on munmap)
/// costs more than the copy it saves.
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Read a file with zero-copy mmap for large regular files, plain read()
/// otherwise.
pub fn read_file(path: &Path) -> io::Result<FileData> {
    let file = File::open(path)?;
    let metadata = file.metadata()?;
    let len = metadata.len();

    if len == 0 {
        return Ok(FileData::Owned(Vec::new()));
    }

    if metadata.file_type().is_file() && len >= MMAP_THRESHOLD {
        // SAFETY: read-only mapping of a regular file.
        if let Ok(mmap) = unsafe { MmapOptions::new().map(&file) } {
            #[cfg(target_os = "linux")]
            {
                if len >= 2 * 1024 * 1024 {
                    let _ = mmap.advise(memmap2::Advice::HugePage);
                }
                let _ = mmap.advise(memmap2::Advice::Sequential);
                let _ = mmap.advise(memmap2::Advice::WillNeed);
            }
            return Ok(FileData::Mmap(mmap));
        }
        // mmap failed — fall through to read
    }

    let mut buf = Vec::with_capacity(len as usize);
    let mut reader = file;
    reader.read_to_end(&mut buf)?;
    Ok(FileData::Owned(buf))
}

/// Read all bytes from stdin into a Vec. Pre-allocates generously so a
/// multi-megabyte pipe doesn't churn through Vec growth reallocations.
pub fn read_stdin() -> io::Result<Vec<u8>> {
    const PREALLOC: usize = 16 * 1024 * 1024;
    let mut buf = Vec::with_capacity(PREALLOC);
    io::stdin().lock().read_to_end(&mut buf)?;
    Ok(buf)
}
