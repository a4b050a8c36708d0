//! Replay archive access.
//!
//! A `.bbrz` file is a zip container; each entry is one replay document.
//! [`ReplayArchive::open`] reads every entry into memory and closes the
//! container before returning, so no file handle outlives the call even when
//! an entry fails to decompress.
//!
//! # Example
//!
//! ```no_run
//! use bbrz_dice::archive::walk_archives;
//! use std::path::Path;
//!
//! for (path, archive) in walk_archives(Path::new("replays"))? {
//!     match archive.and_then(|a| a.block_rolls()) {
//!         Ok(rolls) => println!("{}: {} block rolls", path.display(), rolls.len()),
//!         Err(e) => eprintln!("{}: {e}", path.display()),
//!     }
//! }
//! # Ok::<(), bbrz_dice::error::ParserError>(())
//! ```

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::block::BlockRoll;
use crate::error::{ParserError, Result};
use crate::format::is_replay_archive;
use crate::replay::{parse_block_rolls_str, Replay};

/// One decompressed archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayEntry {
    /// Entry name inside the container.
    pub name: String,

    /// Decompressed document text.
    pub text: String,
}

impl ReplayEntry {
    /// Parses the entry as a replay document.
    ///
    /// # Errors
    ///
    /// `ParserError::XmlError` if the entry is not well-formed XML.
    pub fn replay(&self) -> Result<Replay<'_>> {
        Replay::parse(&self.text)
    }

    /// Collects the block rolls of this entry.
    ///
    /// # Errors
    ///
    /// See [`parse_block_rolls_str`].
    pub fn block_rolls(&self) -> Result<Vec<BlockRoll>> {
        parse_block_rolls_str(&self.text)
    }
}

/// A replay archive with all entries decompressed.
#[derive(Debug, Clone)]
pub struct ReplayArchive {
    path: PathBuf,
    entries: Vec<ReplayEntry>,
}

impl ReplayArchive {
    /// Opens a `.bbrz` file and decompresses every entry.
    ///
    /// # Errors
    ///
    /// - `ParserError::IoError` if the file cannot be read
    /// - `ParserError::ArchiveError` if it is not a valid zip container
    /// - `ParserError::InvalidEncoding` if an entry is not UTF-8
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(path, BufReader::new(file))
    }

    /// Reads an archive from any seekable reader.
    ///
    /// `path` is only recorded for reporting.
    ///
    /// # Errors
    ///
    /// Same as [`ReplayArchive::open`].
    pub fn from_reader<R: Read + Seek>(path: &Path, reader: R) -> Result<Self> {
        let mut zip = zip::ZipArchive::new(reader)?;
        let mut entries = Vec::with_capacity(zip.len());

        for i in 0..zip.len() {
            let mut file = zip.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;

            let text = String::from_utf8(bytes)
                .map_err(|_| ParserError::InvalidEncoding {
                    entry: name.clone(),
                })?
                .trim_start_matches('\u{feff}')
                .to_string();
            debug!(entry = %name, bytes = text.len(), "decompressed replay entry");
            entries.push(ReplayEntry { name, text });
        }

        Ok(ReplayArchive {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Returns the archive path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the archive file name, or the full path if it has none.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// Returns the decompressed entries in container order.
    #[must_use]
    pub fn entries(&self) -> &[ReplayEntry] {
        &self.entries
    }

    /// Collects the block rolls of every entry, in entry order.
    ///
    /// # Errors
    ///
    /// The first entry error aborts the archive.
    pub fn block_rolls(&self) -> Result<Vec<BlockRoll>> {
        let mut rolls = Vec::new();
        for entry in &self.entries {
            let replay = entry.replay()?;
            debug!(
                entry = %entry.name,
                completed_block_orders = replay.completed_block_orders(),
                "scanning replay entry"
            );
            for roll in replay.block_rolls() {
                rolls.push(roll?);
            }
        }
        Ok(rolls)
    }
}

/// Lists the `.bbrz` files directly inside `dir`.
///
/// Order is the directory listing order.
///
/// # Errors
///
/// `ParserError::IoError` if the directory cannot be read.
pub fn find_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archives = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_replay_archive(&path) {
            archives.push(path);
        }
    }
    Ok(archives)
}

/// Opens the archives of `dir` one at a time.
///
/// Each item pairs the archive path with the outcome of opening it, so a
/// broken file can be skipped without ending the walk.
///
/// # Errors
///
/// `ParserError::IoError` if the directory cannot be read.
pub fn walk_archives(
    dir: &Path,
) -> Result<impl Iterator<Item = (PathBuf, Result<ReplayArchive>)>> {
    let archives = find_archives(dir)?;
    debug!(count = archives.len(), dir = %dir.display(), "found replay archives");
    Ok(archives.into_iter().map(|path| {
        let archive = ReplayArchive::open(&path);
        (path, archive)
    }))
}
