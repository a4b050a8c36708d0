//! Block roll extraction from board actions.
//!
//! A `RulesEventBoardAction` names its acting player and lists the rolls it
//! caused under `Results/BoardActionResult`. A result is a block roll when
//! its `RollType` is `5` and its `ResultType` is `2`; its dice sit in
//! `CoachChoices/ListDices`.
//!
//! # Example
//!
//! ```
//! use bbrz_dice::block::extract_block_rolls;
//! use bbrz_dice::dice::BlockDie;
//! use bbrz_dice::identity::Identities;
//!
//! let doc = roxmltree::Document::parse(
//!     "<RulesEventBoardAction><PlayerId>7</PlayerId><Results><BoardActionResult>\
//!      <RollType>5</RollType><ResultType>2</ResultType>\
//!      <CoachChoices><ListDices>(0,1,2,3)</ListDices></CoachChoices>\
//!      </BoardActionResult></Results></RulesEventBoardAction>",
//! ).unwrap();
//!
//! let rolls = extract_block_rolls(doc.root_element(), &Identities::missing()).unwrap();
//! assert_eq!(rolls.len(), 1);
//! assert_eq!(rolls[0].name, "Unknown");
//! assert_eq!(rolls[0].dice, vec![BlockDie::BothDown, BlockDie::DefenderStumbles]);
//! ```

use roxmltree::Node;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dice::{decode_dice_list, BlockDie};
use crate::error::Result;
use crate::format::{tags, BLOCK_ROLL_TYPE, DICE_RESULT_TYPE, ORDER_COMPLETED};
use crate::identity::Identities;
use crate::tree::{child_text, descend, descend_path};

/// One decoded block roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRoll {
    /// Display name of the acting player's coach, or `"Unknown"`.
    pub name: String,

    /// ID of the acting player as written in the replay.
    pub player_id: String,

    /// Reported block die faces, in payload order.
    pub dice: Vec<BlockDie>,
}

impl BlockRoll {
    /// Returns the report labels of the dice.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.dice.iter().map(|die| die.label()).collect()
    }
}

/// Read-only view of one `BoardActionResult` node.
#[derive(Debug, Clone, Copy)]
pub struct ActionResult<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> ActionResult<'a, 'input> {
    /// Wraps a `BoardActionResult` node.
    #[must_use]
    pub fn new(node: Node<'a, 'input>) -> Self {
        ActionResult { node }
    }

    /// Returns the underlying node.
    #[must_use]
    pub fn node(&self) -> Node<'a, 'input> {
        self.node
    }

    /// Raw `RollType` text.
    #[must_use]
    pub fn roll_type(&self) -> Option<&'a str> {
        child_text(self.node, tags::ROLL_TYPE)
    }

    /// Raw `ResultType` text.
    #[must_use]
    pub fn result_type(&self) -> Option<&'a str> {
        child_text(self.node, tags::RESULT_TYPE)
    }

    /// Whether `IsOrderCompleted` is set. Missing counts as not set.
    #[must_use]
    pub fn is_order_completed(&self) -> bool {
        child_text(self.node, tags::IS_ORDER_COMPLETED) == Some(ORDER_COMPLETED)
    }

    /// Whether this result is a block roll carrying dice.
    #[must_use]
    pub fn is_block_roll(&self) -> bool {
        matches!(
            (self.roll_type(), self.result_type()),
            (Some(BLOCK_ROLL_TYPE), Some(DICE_RESULT_TYPE))
        )
    }

    /// Whether this result is a block order the coach confirmed.
    #[must_use]
    pub fn is_completed_block_order(&self) -> bool {
        self.roll_type() == Some(BLOCK_ROLL_TYPE) && self.is_order_completed()
    }

    /// Packed dice payloads under `CoachChoices/ListDices`.
    ///
    /// Empty or whitespace-only `ListDices` elements are skipped.
    #[must_use]
    pub fn dice_payloads(&self) -> Vec<&'a str> {
        descend_path([self.node], &[tags::COACH_CHOICES, tags::LIST_DICES])
            .into_iter()
            .filter_map(|list| {
                let text = list.text().filter(|t| !t.trim().is_empty());
                if text.is_none() {
                    trace!("skipping empty dice list");
                }
                text
            })
            .collect()
    }
}

/// Returns whether a `BoardActionResult` node is a block roll.
///
/// False when `RollType` or `ResultType` is missing.
#[must_use]
pub fn is_block_roll(node: Node<'_, '_>) -> bool {
    ActionResult::new(node).is_block_roll()
}

/// Returns the `BoardActionResult` children of a board action.
#[must_use]
pub fn action_results<'a, 'input>(action: Node<'a, 'input>) -> Vec<ActionResult<'a, 'input>> {
    descend(descend([action], tags::RESULTS), tags::BOARD_ACTION_RESULT)
        .into_iter()
        .map(ActionResult::new)
        .collect()
}

/// Extracts every block roll of one `RulesEventBoardAction` node.
///
/// An action without a `PlayerId` yields no rolls. Each dice payload of each
/// block roll result becomes one [`BlockRoll`], attributed to the acting
/// player's coach via `identities`.
///
/// # Errors
///
/// `ParserError::MalformedDiceList` if a payload cannot be decoded.
pub fn extract_block_rolls(
    action: Node<'_, '_>,
    identities: &Identities,
) -> Result<Vec<BlockRoll>> {
    let Some(player_id) = child_text(action, tags::PLAYER_ID) else {
        debug!("board action without player ID, skipping");
        return Ok(Vec::new());
    };
    let name = identities.coach_for_player(player_id);

    let mut rolls = Vec::new();
    for result in action_results(action).into_iter().filter(ActionResult::is_block_roll) {
        for payload in result.dice_payloads() {
            rolls.push(BlockRoll {
                name: name.to_string(),
                player_id: player_id.to_string(),
                dice: decode_dice_list(payload)?,
            });
        }
    }
    Ok(rolls)
}
