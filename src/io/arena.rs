// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Memory-mapped file arena.
//!
//! The arena owns the mapping; decoders borrow the bytes for as long as the
//! arena lives and never copy the record array.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use cyclecodec::io::arena::MmapArena;
//!
//! let arena = MmapArena::open("cell_01.nda")?;
//! let data: &[u8] = arena.data();
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use crate::core::{CodecError, Result};

/// Read-only memory map of one file.
pub struct MmapArena {
    mmap: memmap2::Mmap,
    /// File path for diagnostics
    path: String,
}

impl MmapArena {
    /// Open and map a file.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Io` if the file cannot be opened or mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        let file = File::open(path_ref).map_err(|e| CodecError::io(&path_str, &e))?;

        // The mapping is owned by the arena and only lent out behind `&self`.
        let mmap =
            unsafe { memmap2::Mmap::map(&file) }.map_err(|e| CodecError::io(&path_str, &e))?;

        Ok(Self {
            mmap,
            path: path_str,
        })
    }

    /// File path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Mapped bytes.
    pub fn data(&self) -> &[u8] {
        &self.mmap
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }
}

impl Deref for MmapArena {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.mmap
    }
}

impl std::fmt::Debug for MmapArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MmapArena")
            .field("path", &self.path)
            .field("len", &self.mmap.len())
            .finish()
    }
}
