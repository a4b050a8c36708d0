//! Text and JSON reports of block rolls.
//!
//! Every roll renders as one line: the coach name followed by the dice
//! labels, all separated by `", "`:
//!
//! ```text
//! Alice, BD, DS
//! ```
//!
//! A [`Report`] collects the rolls of several replays and writes them in one
//! of three layouts (see [`ReportMode`]).
//!
//! # Example
//!
//! ```
//! use bbrz_dice::block::BlockRoll;
//! use bbrz_dice::dice::BlockDie;
//! use bbrz_dice::report::{Report, ReportMode};
//!
//! let roll = BlockRoll {
//!     name: "Alice".to_string(),
//!     player_id: "11".to_string(),
//!     dice: vec![BlockDie::BothDown, BlockDie::DefenderStumbles],
//! };
//! assert_eq!(roll.to_line(), "Alice, BD, DS\n");
//!
//! let mut report = Report::new(ReportMode::Merged);
//! report.add_replay("match.bbrz", vec![roll]);
//! let mut out = Vec::new();
//! report.write_text(&mut out).unwrap();
//! assert_eq!(out, b"Alice, BD, DS\n");
//! ```

use std::io::{self, Write};

use serde::Serialize;

use crate::block::BlockRoll;
use crate::dice::{BlockDie, UnknownLabel};

/// Separator line framing each replay in [`ReportMode::ByReplay`].
pub const SEPARATOR: &str = "----------------------------------------------";

impl BlockRoll {
    /// Renders this roll as one report line, newline included.
    #[must_use]
    pub fn to_line(&self) -> String {
        render_line(&self.name, &self.dice)
    }
}

/// Renders a name and its dice as one report line, newline included.
#[must_use]
pub fn render_line(name: &str, dice: &[BlockDie]) -> String {
    let mut line = String::from(name);
    for die in dice {
        line.push_str(", ");
        line.push_str(die.label());
    }
    line.push('\n');
    line
}

/// A report line split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    /// Coach name.
    pub name: String,
    /// Dice in line order.
    pub dice: Vec<BlockDie>,
}

/// Parses one rendered report line.
///
/// Recovers the name exactly as long as it contains no `", "`.
///
/// # Errors
///
/// [`UnknownLabel`] if a field after the name is not a die label.
pub fn parse_line(line: &str) -> Result<ReportLine, UnknownLabel> {
    let line = line.trim_end_matches(['\n', '\r']);
    let mut fields = line.split(", ");
    let name = fields.next().unwrap_or_default().to_string();
    let dice = fields
        .map(str::parse::<BlockDie>)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ReportLine { name, dice })
}

/// Layout of a text report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// One line per roll across all replays, sorted.
    #[default]
    Merged,
    /// Per replay: its name, a separator, its sorted lines, a separator.
    ByReplay,
    /// One line per coach with every die they rolled, coaches in first-seen
    /// order.
    Raw,
}

/// Rolls of one replay archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayRolls {
    /// Replay archive name.
    pub replay: String,
    /// Rolls in document order.
    pub rolls: Vec<BlockRoll>,
}

impl ReplayRolls {
    /// Returns the rolls sorted by their rendered line.
    #[must_use]
    pub fn sorted(&self) -> Vec<&BlockRoll> {
        let mut rolls: Vec<&BlockRoll> = self.rolls.iter().collect();
        rolls.sort_by_cached_key(|roll| roll.to_line());
        rolls
    }
}

/// All dice one coach rolled, used by [`ReportMode::Raw`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachDice {
    /// Coach name.
    pub name: String,
    /// Dice in report order.
    pub dice: Vec<BlockDie>,
}

/// Accumulates the rolls of several replays and renders them.
#[derive(Debug, Clone, Default)]
pub struct Report {
    mode: ReportMode,
    replays: Vec<ReplayRolls>,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub fn new(mode: ReportMode) -> Self {
        Report {
            mode,
            replays: Vec::new(),
        }
    }

    /// Adds the rolls of one replay archive.
    pub fn add_replay(&mut self, replay: impl Into<String>, rolls: Vec<BlockRoll>) {
        self.replays.push(ReplayRolls {
            replay: replay.into(),
            rolls,
        });
    }

    /// Returns the report layout.
    #[must_use]
    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    /// Returns the replays added so far.
    #[must_use]
    pub fn replays(&self) -> &[ReplayRolls] {
        &self.replays
    }

    /// Returns the total number of rolls.
    #[must_use]
    pub fn roll_count(&self) -> usize {
        self.replays.iter().map(|r| r.rolls.len()).sum()
    }

    /// Returns every roll sorted by rendered line.
    #[must_use]
    pub fn merged(&self) -> Vec<&BlockRoll> {
        let mut rolls: Vec<&BlockRoll> = self.replays.iter().flat_map(|r| &r.rolls).collect();
        rolls.sort_by_cached_key(|roll| roll.to_line());
        rolls
    }

    /// Aggregates dice per coach.
    ///
    /// Each replay's rolls are taken in sorted order; coaches appear in the
    /// order they are first met.
    #[must_use]
    pub fn per_coach(&self) -> Vec<CoachDice> {
        let mut coaches: Vec<CoachDice> = Vec::new();
        for roll in self.replays.iter().flat_map(ReplayRolls::sorted) {
            match coaches.iter_mut().find(|c| c.name == roll.name) {
                Some(coach) => coach.dice.extend_from_slice(&roll.dice),
                None => coaches.push(CoachDice {
                    name: roll.name.clone(),
                    dice: roll.dice.clone(),
                }),
            }
        }
        coaches
    }

    /// Writes the text report.
    ///
    /// # Errors
    ///
    /// Any error from `out`.
    pub fn write_text<W: Write>(&self, mut out: W) -> io::Result<()> {
        match self.mode {
            ReportMode::Merged => {
                for roll in self.merged() {
                    out.write_all(roll.to_line().as_bytes())?;
                }
            }
            ReportMode::ByReplay => {
                for replay in &self.replays {
                    writeln!(out, "{}", replay.replay)?;
                    writeln!(out, "{SEPARATOR}")?;
                    for roll in replay.sorted() {
                        out.write_all(roll.to_line().as_bytes())?;
                    }
                    writeln!(out, "{SEPARATOR}")?;
                }
            }
            ReportMode::Raw => {
                for coach in self.per_coach() {
                    out.write_all(render_line(&coach.name, &coach.dice).as_bytes())?;
                }
            }
        }
        out.flush()
    }

    /// Writes the report as pretty-printed JSON.
    ///
    /// `Merged` writes an array of rolls, `ByReplay` an array of
    /// `{replay, rolls}` objects, `Raw` an array of `{name, dice}` objects.
    ///
    /// # Errors
    ///
    /// Any error from `out` or from serialization.
    pub fn write_json<W: Write>(&self, mut out: W) -> io::Result<()> {
        match self.mode {
            ReportMode::Merged => serde_json::to_writer_pretty(&mut out, &self.merged())?,
            ReportMode::ByReplay => serde_json::to_writer_pretty(&mut out, &self.replays)?,
            ReportMode::Raw => serde_json::to_writer_pretty(&mut out, &self.per_coach())?,
        }
        writeln!(out)?;
        out.flush()
    }
}
