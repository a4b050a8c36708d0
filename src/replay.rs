//! Replay document parsing.
//!
//! [`Replay`] owns one parsed document together with its identity tables and
//! hands out the document's block rolls in document order.
//!
//! # Example
//!
//! ```
//! use bbrz_dice::replay::Replay;
//!
//! let xml = "<Replay><ReplayStep><RulesEventBoardAction>\
//!     <PlayerId>4</PlayerId><Results><BoardActionResult>\
//!     <RollType>5</RollType><ResultType>2</ResultType>\
//!     <CoachChoices><ListDices>(0,4,0,2)</ListDices></CoachChoices>\
//!     </BoardActionResult></Results></RulesEventBoardAction></ReplayStep></Replay>";
//!
//! let replay = Replay::parse(xml)?;
//! for roll in replay.block_rolls() {
//!     let roll = roll?;
//!     println!("{}: {:?}", roll.name, roll.labels());
//! }
//! # Ok::<(), bbrz_dice::error::ParserError>(())
//! ```

use std::io::Read;

use roxmltree::{Document, Node};
use tracing::debug;

use crate::block::{action_results, extract_block_rolls, BlockRoll};
use crate::error::Result;
use crate::format::tags;
use crate::identity::Identities;
use crate::tree::descend;

/// One parsed replay document.
pub struct Replay<'input> {
    document: Document<'input>,
    identities: Identities,
}

impl<'input> Replay<'input> {
    /// Parses a replay document and resolves its identities.
    ///
    /// # Errors
    ///
    /// `ParserError::XmlError` if `text` is not well-formed XML.
    pub fn parse(text: &'input str) -> Result<Self> {
        let document = Document::parse(text)?;
        let identities = {
            let steps = descend([document.root_element()], tags::REPLAY_STEP);
            debug!(steps = steps.len(), "parsed replay document");
            Identities::resolve(&steps)
        };

        Ok(Replay {
            document,
            identities,
        })
    }

    /// Returns the `ReplayStep` nodes in document order.
    #[must_use]
    pub fn steps(&self) -> Vec<Node<'_, 'input>> {
        descend([self.document.root_element()], tags::REPLAY_STEP)
    }

    /// Returns every `ReplayStep/RulesEventBoardAction` node in document order.
    #[must_use]
    pub fn board_actions(&self) -> Vec<Node<'_, 'input>> {
        descend(self.steps(), tags::BOARD_ACTION)
    }

    /// Returns the identity tables of this document.
    #[must_use]
    pub fn identities(&self) -> &Identities {
        &self.identities
    }

    /// Returns an iterator over the block rolls of this document.
    #[must_use]
    pub fn block_rolls(&self) -> BlockRollIter<'_, 'input> {
        BlockRollIter {
            actions: self.board_actions().into_iter(),
            pending: Vec::new().into_iter(),
            identities: &self.identities,
            failed: false,
        }
    }

    /// Counts block orders the coaches confirmed.
    #[must_use]
    pub fn completed_block_orders(&self) -> usize {
        self.board_actions()
            .into_iter()
            .flat_map(action_results)
            .filter(|result| result.is_completed_block_order())
            .count()
    }
}

/// Iterator over the block rolls of a [`Replay`].
///
/// Yields rolls in document order. Board actions without a player ID are
/// skipped. A malformed dice payload yields one `Err` and ends iteration.
pub struct BlockRollIter<'a, 'input> {
    actions: std::vec::IntoIter<Node<'a, 'input>>,
    pending: std::vec::IntoIter<BlockRoll>,
    identities: &'a Identities,
    failed: bool,
}

impl Iterator for BlockRollIter<'_, '_> {
    type Item = Result<BlockRoll>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(roll) = self.pending.next() {
                return Some(Ok(roll));
            }
            if self.failed {
                return None;
            }
            let action = self.actions.next()?;
            match extract_block_rolls(action, self.identities) {
                Ok(rolls) => self.pending = rolls.into_iter(),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Parses a replay document held in memory and collects its block rolls.
///
/// # Errors
///
/// `ParserError::XmlError` for malformed XML, `ParserError::MalformedDiceList`
/// for an undecodable dice payload.
pub fn parse_block_rolls_str(text: &str) -> Result<Vec<BlockRoll>> {
    let replay = Replay::parse(text)?;
    let rolls = replay.block_rolls().collect::<Result<Vec<_>>>()?;
    Ok(rolls)
}

/// Reads a replay document from `reader` and collects its block rolls.
///
/// The stream is read to the end before parsing.
///
/// # Errors
///
/// `ParserError::IoError` if reading fails or the stream is not UTF-8, plus
/// everything [`parse_block_rolls_str`] returns.
pub fn parse_block_rolls<R: Read>(mut reader: R) -> Result<Vec<BlockRoll>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_block_rolls_str(&text)
}
