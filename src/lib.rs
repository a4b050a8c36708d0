//! # BBRZ Dice
//!
//! Extracts block dice outcomes from Blood Bowl 2 replay archives (`.bbrz`).
//!
//! A replay archive is a zip container of XML documents, one per match log.
//! This library finds every block roll in those documents, attributes it to
//! the acting player's coach, and decodes the packed dice into labels:
//!
//! | Code | Label | Face |
//! |------|-------|------|
//! | 0 | `AD` | Attacker down |
//! | 1 | `BD` | Both down |
//! | 2 | `P` | Push |
//! | 3 | `DS` | Defender stumbles |
//! | 4 | `DD` | Defender down |
//!
//! ## Quick Start
//!
//! ```no_run
//! use bbrz_dice::archive::ReplayArchive;
//! use bbrz_dice::error::Result;
//! use std::path::Path;
//!
//! fn print_blocks(path: &Path) -> Result<()> {
//!     let archive = ReplayArchive::open(path)?;
//!     for roll in archive.block_rolls()? {
//!         print!("{}", roll.to_line());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`error`] - Error types and result alias
//! - [`format`] - Element names, roll codes and the archive extension
//! - [`tree`] - Descending tag paths across node lists
//! - [`dice`] - Packed dice payload decoding
//! - [`identity`] - Player to coach name resolution
//! - [`block`] - Block roll extraction from board actions
//! - [`replay`] - Whole-document parsing
//! - [`archive`] - `.bbrz` container access and directory walking
//! - [`report`] - Text and JSON report rendering

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod block;
pub mod dice;
pub mod error;
pub mod format;
pub mod identity;
pub mod replay;
pub mod report;
pub mod tree;

// Re-export commonly used types at the crate root
pub use archive::{find_archives, walk_archives, ReplayArchive, ReplayEntry};
pub use block::{extract_block_rolls, is_block_roll, ActionResult, BlockRoll};
pub use dice::{decode_dice_list, BlockDie};
pub use error::{ParserError, Result};
pub use identity::{Identities, IdentityStatus};
pub use replay::{parse_block_rolls, Replay};
pub use report::{parse_line, Report, ReportMode};
