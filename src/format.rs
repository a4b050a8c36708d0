//! Replay format constants.
//!
//! Blood Bowl 2 replays (`.bbrz`) are zip containers. Each entry is an XML
//! document whose root holds an ordered list of `ReplayStep` elements. Only
//! a handful of element paths are interesting for dice extraction:
//!
//! | Path | Meaning |
//! |------|---------|
//! | `ReplayStep/RulesEventBoardAction` | One board action |
//! | `.../PlayerId` | Acting player |
//! | `.../Results/BoardActionResult` | One roll of that action |
//! | `.../RollType`, `.../ResultType` | Roll classification codes |
//! | `.../CoachChoices/ListDices` | Packed dice payload |
//! | `ReplayStep/RulesEventGameFinished/MatchResult` | Final identities |
//!
//! Codes are compared as raw text, never parsed, so `"05"` is not a block
//! roll even though it has the same numeric value.
//!
//! # Example
//!
//! ```
//! use bbrz_dice::format::{is_replay_archive, BBRZ_EXTENSION};
//! use std::path::Path;
//!
//! assert_eq!(BBRZ_EXTENSION, "bbrz");
//! assert!(is_replay_archive(Path::new("Coach-1_2018-04-17.bbrz")));
//! assert!(!is_replay_archive(Path::new("notes.txt")));
//! ```

use std::path::Path;

/// File extension of replay archives.
pub const BBRZ_EXTENSION: &str = "bbrz";

/// Name reported for players or coaches missing from the identity records.
pub const UNKNOWN_NAME: &str = "Unknown";

/// `RollType` code of a block roll.
pub const BLOCK_ROLL_TYPE: &str = "5";

/// `ResultType` code of a roll that carries dice results.
pub const DICE_RESULT_TYPE: &str = "2";

/// `IsOrderCompleted` value of a confirmed coach order.
pub const ORDER_COMPLETED: &str = "1";

/// Element names used by the replay schema.
pub mod tags {
    /// Top-level step, direct child of the document root.
    pub const REPLAY_STEP: &str = "ReplayStep";
    /// Board action event inside a step.
    pub const BOARD_ACTION: &str = "RulesEventBoardAction";
    /// Acting player of a board action.
    pub const PLAYER_ID: &str = "PlayerId";
    /// Container of the results of a board action.
    pub const RESULTS: &str = "Results";
    /// One result of a board action.
    pub const BOARD_ACTION_RESULT: &str = "BoardActionResult";
    /// Roll classification code.
    pub const ROLL_TYPE: &str = "RollType";
    /// Result classification code.
    pub const RESULT_TYPE: &str = "ResultType";
    /// Order completion flag.
    pub const IS_ORDER_COMPLETED: &str = "IsOrderCompleted";
    /// Container of coach choices.
    pub const COACH_CHOICES: &str = "CoachChoices";
    /// Packed dice payload.
    pub const LIST_DICES: &str = "ListDices";

    /// Game-finished event inside a step.
    pub const GAME_FINISHED: &str = "RulesEventGameFinished";
    /// Match result subtree of the game-finished event.
    pub const MATCH_RESULT: &str = "MatchResult";
    /// Summary row of the match result.
    pub const ROW: &str = "Row";
    /// Home coach ID in the summary row.
    pub const ID_COACH_HOME: &str = "IdCoachHome";
    /// Home coach name in the summary row.
    pub const COACH_HOME_NAME: &str = "CoachHomeName";
    /// Away coach ID in the summary row.
    pub const ID_COACH_AWAY: &str = "IdCoachAway";
    /// Away coach name in the summary row.
    pub const COACH_AWAY_NAME: &str = "CoachAwayName";
    /// List of per-coach results.
    pub const COACH_RESULTS: &str = "CoachResults";
    /// One coach's result.
    pub const COACH_RESULT: &str = "CoachResult";
    /// Coach data of a coach result.
    pub const COACH_DATA: &str = "CoachData";
    /// Coach ID inside coach data.
    pub const ID_COACH: &str = "IdCoach";
    /// Roster of a coach result.
    pub const PLAYER_RESULTS: &str = "PlayerResults";
    /// One player of a roster.
    pub const PLAYER_RESULT: &str = "PlayerResult";
    /// Player data of a player result.
    pub const PLAYER_DATA: &str = "PlayerData";
    /// Player ID inside player data.
    pub const ID: &str = "Id";
}

/// Returns whether `path` names a replay archive.
///
/// The extension match is exact: `replay.BBRZ` is not recognized.
#[must_use]
pub fn is_replay_archive(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == BBRZ_EXTENSION)
}
