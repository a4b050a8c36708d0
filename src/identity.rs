//! Coach and player identity resolution.
//!
//! Board actions only name the acting player by ID. The coach behind that
//! player is recorded once per document, in the game-finished event:
//!
//! ```text
//! ReplayStep/RulesEventGameFinished/MatchResult
//!     Row                          home/away coach IDs and names
//!     CoachResults/CoachResult     one per coach
//!         CoachData/IdCoach
//!         PlayerResults/PlayerResult/PlayerData/Id
//! ```
//!
//! [`Identities::resolve`] turns this into two immutable maps: coach ID to
//! coach name ([`CoachDirectory`]) and player ID to coach name
//! ([`PlayerDirectory`]). Both are rebuilt for every document.

use std::collections::HashMap;

use roxmltree::Node;
use tracing::{debug, warn};

use crate::format::{tags, UNKNOWN_NAME};
use crate::tree::{child_text, descend, descend_path};

/// Coach ID to coach display name, read from the match result row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoachDirectory {
    names: HashMap<String, String>,
}

impl CoachDirectory {
    /// Reads the home and away coaches from a `MatchResult/Row` node.
    ///
    /// A side whose ID or name is missing is left out.
    #[must_use]
    pub fn from_row(row: Node<'_, '_>) -> Self {
        let mut names = HashMap::new();
        let sides = [
            (tags::ID_COACH_HOME, tags::COACH_HOME_NAME),
            (tags::ID_COACH_AWAY, tags::COACH_AWAY_NAME),
        ];
        for (id_tag, name_tag) in sides {
            match (child_text(row, id_tag), child_text(row, name_tag)) {
                (Some(id), Some(name)) => {
                    names
                        .entry(id.to_string())
                        .or_insert_with(|| name.to_string());
                }
                _ => debug!(id_tag, "match result row lacks coach identity"),
            }
        }
        CoachDirectory { names }
    }

    /// Returns the name of a coach, if known.
    #[must_use]
    pub fn get(&self, coach_id: &str) -> Option<&str> {
        self.names.get(coach_id).map(String::as_str)
    }

    /// Returns the name of a coach, or `"Unknown"`.
    #[must_use]
    pub fn name_or_unknown(&self, coach_id: &str) -> &str {
        self.get(coach_id).unwrap_or(UNKNOWN_NAME)
    }

    /// Returns the number of known coaches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether no coach is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Player ID to the display name of the player's coach.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerDirectory {
    coaches: HashMap<String, String>,
}

impl PlayerDirectory {
    /// Builds the directory from `CoachResult` nodes.
    ///
    /// Each coach result's players are attributed to the coach named by its
    /// `CoachData/IdCoach`; an unknown coach yields `"Unknown"`. A player ID
    /// listed twice keeps its first coach.
    #[must_use]
    pub fn from_coach_results<'a, 'input, I>(coach_results: I, coaches: &CoachDirectory) -> Self
    where
        'input: 'a,
        I: IntoIterator<Item = Node<'a, 'input>>,
    {
        let mut map = HashMap::new();
        for coach_result in coach_results {
            let coach_name = descend([coach_result], tags::COACH_DATA)
                .into_iter()
                .find_map(|data| child_text(data, tags::ID_COACH))
                .map_or(UNKNOWN_NAME, |id| coaches.name_or_unknown(id));

            let players = descend_path(
                [coach_result],
                &[tags::PLAYER_RESULTS, tags::PLAYER_RESULT, tags::PLAYER_DATA],
            );
            for player in players {
                if let Some(player_id) = child_text(player, tags::ID) {
                    map.entry(player_id.to_string())
                        .or_insert_with(|| coach_name.to_string());
                }
            }
        }
        PlayerDirectory { coaches: map }
    }

    /// Returns the coach name of a player, if the player is known.
    #[must_use]
    pub fn get(&self, player_id: &str) -> Option<&str> {
        self.coaches.get(player_id).map(String::as_str)
    }

    /// Returns the number of known players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coaches.len()
    }

    /// Returns whether no player is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coaches.is_empty()
    }
}

/// Whether the document carried identity records at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStatus {
    /// A game-finished event with a match result was found.
    Resolved,
    /// No game-finished event (or no match result in it); every player
    /// resolves to `"Unknown"`.
    Missing,
}

/// Identity lookup tables for one replay document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identities {
    coaches: CoachDirectory,
    players: PlayerDirectory,
    status: IdentityStatus,
}

impl Identities {
    /// Identities of a document without identity records.
    #[must_use]
    pub fn missing() -> Self {
        Identities {
            coaches: CoachDirectory::default(),
            players: PlayerDirectory::default(),
            status: IdentityStatus::Missing,
        }
    }

    /// Resolves identities from the `ReplayStep` nodes of one document.
    ///
    /// Only the first game-finished event, its first match result and that
    /// result's first row are consulted.
    #[must_use]
    pub fn resolve(steps: &[Node<'_, '_>]) -> Self {
        let finished = descend(steps.iter().copied(), tags::GAME_FINISHED);
        if finished.len() > 1 {
            debug!(count = finished.len(), "multiple game-finished events, using the first");
        }

        let Some(match_result) = finished
            .first()
            .and_then(|event| descend([*event], tags::MATCH_RESULT).into_iter().next())
        else {
            warn!("replay has no match result, all players resolve to {UNKNOWN_NAME}");
            return Self::missing();
        };

        let coaches = descend([match_result], tags::ROW)
            .into_iter()
            .next()
            .map(CoachDirectory::from_row)
            .unwrap_or_default();

        let coach_results =
            descend_path([match_result], &[tags::COACH_RESULTS, tags::COACH_RESULT]);
        let players = PlayerDirectory::from_coach_results(coach_results, &coaches);

        debug!(
            coaches = coaches.len(),
            players = players.len(),
            "resolved replay identities"
        );

        Identities {
            coaches,
            players,
            status: IdentityStatus::Resolved,
        }
    }

    /// Returns the coach name for a player ID, or `"Unknown"`.
    #[must_use]
    pub fn coach_for_player(&self, player_id: &str) -> &str {
        self.players.get(player_id).unwrap_or(UNKNOWN_NAME)
    }

    /// Returns the coach directory.
    #[must_use]
    pub fn coaches(&self) -> &CoachDirectory {
        &self.coaches
    }

    /// Returns the player directory.
    #[must_use]
    pub fn players(&self) -> &PlayerDirectory {
        &self.players
    }

    /// Returns whether identity records were found.
    #[must_use]
    pub fn status(&self) -> IdentityStatus {
        self.status
    }
}
