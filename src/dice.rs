//! Block dice decoding.
//!
//! A block roll stores its dice as a packed text payload such as
//! `(0,1,2,3)`. The tokens interleave two dice categories: even positions
//! hold the category that is not reported, odd positions hold the block die
//! faces. Decoding keeps the odd positions only:
//!
//! ```text
//! (0,1,2,3)
//!    ^   ^      -> [BD, DS]
//! ```
//!
//! # Example
//!
//! ```
//! use bbrz_dice::dice::{decode_dice_list, BlockDie};
//!
//! let dice = decode_dice_list("(0,1,2,3)").unwrap();
//! assert_eq!(dice, vec![BlockDie::BothDown, BlockDie::DefenderStumbles]);
//! assert_eq!(dice[0].label(), "BD");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParserError, Result};

/// One face of a block die.
///
/// The discriminant is the code stored in the replay; the serde name is the
/// report label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockDie {
    /// Attacker down (code 0).
    #[serde(rename = "AD")]
    AttackerDown = 0,
    /// Both down (code 1).
    #[serde(rename = "BD")]
    BothDown = 1,
    /// Push (code 2).
    #[serde(rename = "P")]
    Push = 2,
    /// Defender stumbles (code 3).
    #[serde(rename = "DS")]
    DefenderStumbles = 3,
    /// Defender down (code 4).
    #[serde(rename = "DD")]
    DefenderDown = 4,
}

impl BlockDie {
    /// All faces in code order.
    pub const ALL: [BlockDie; 5] = [
        BlockDie::AttackerDown,
        BlockDie::BothDown,
        BlockDie::Push,
        BlockDie::DefenderStumbles,
        BlockDie::DefenderDown,
    ];

    /// Maps a replay code to a face.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Returns the replay code of this face.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the short report label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BlockDie::AttackerDown => "AD",
            BlockDie::BothDown => "BD",
            BlockDie::Push => "P",
            BlockDie::DefenderStumbles => "DS",
            BlockDie::DefenderDown => "DD",
        }
    }
}

impl fmt::Display for BlockDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a report label is not one of `AD`, `BD`, `P`, `DS`, `DD`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown block die label {0:?}")]
pub struct UnknownLabel(pub String);

impl FromStr for BlockDie {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|die| die.label() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Parses a packed payload into its raw integer tokens.
///
/// Surrounding whitespace and whitespace around tokens are ignored. `()` is
/// an empty list.
///
/// # Errors
///
/// `ParserError::MalformedDiceList` when the parentheses are missing, a
/// token is not an integer, or the token count is odd.
pub fn parse_raw_dice_list(payload: &str) -> Result<Vec<i64>> {
    let inner = payload
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| ParserError::malformed_dice(payload, "expected a parenthesized list"))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let tokens = inner
        .split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<i64>().map_err(|_| {
                ParserError::malformed_dice(payload, format!("non-numeric token {token:?}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if tokens.len() % 2 != 0 {
        return Err(ParserError::malformed_dice(
            payload,
            format!("odd token count {}", tokens.len()),
        ));
    }

    Ok(tokens)
}

/// Decodes a packed payload into the reported block die faces.
///
/// Returns the tokens at positions 1, 3, 5, ... in order, so a payload of
/// `n` tokens yields `n / 2` faces.
///
/// # Errors
///
/// Everything [`parse_raw_dice_list`] rejects, plus a reported token
/// outside `0..=4`.
pub fn decode_dice_list(payload: &str) -> Result<Vec<BlockDie>> {
    parse_raw_dice_list(payload)?
        .into_iter()
        .skip(1)
        .step_by(2)
        .map(|code| {
            BlockDie::from_code(code).ok_or_else(|| {
                ParserError::malformed_dice(payload, format!("die code {code} out of range"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_decode_selects_odd_positions() {
        let dice = decode_dice_list("(0,1,2,3)").unwrap();
        assert_eq!(dice, vec![BlockDie::BothDown, BlockDie::DefenderStumbles]);

        let labels: Vec<_> = dice.iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["BD", "DS"]);
    }

    #[test]
    fn test_decode_all_faces() {
        let dice = decode_dice_list("(9,0,9,1,9,2,9,3,9,4,-1,4)").unwrap();
        assert_eq!(
            dice,
            vec![
                BlockDie::AttackerDown,
                BlockDie::BothDown,
                BlockDie::Push,
                BlockDie::DefenderStumbles,
                BlockDie::DefenderDown,
                BlockDie::DefenderDown,
            ]
        );
    }

    #[test]
    fn test_decode_tolerates_whitespace() {
        let dice = decode_dice_list("  ( 2 , 4 ,1, 0 )\n").unwrap();
        assert_eq!(dice, vec![BlockDie::DefenderDown, BlockDie::AttackerDown]);
    }

    #[test]
    fn test_decode_empty_list() {
        assert!(decode_dice_list("()").unwrap().is_empty());
        assert!(decode_dice_list("( )").unwrap().is_empty());
    }

    #[test]
    fn test_decode_missing_parentheses() {
        for payload in ["0,1", "(0,1", "0,1)", ""] {
            let err = decode_dice_list(payload).unwrap_err();
            assert!(
                matches!(err, ParserError::MalformedDiceList { .. }),
                "{payload:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_decode_odd_length() {
        let err = decode_dice_list("(0,1,2)").unwrap_err();
        assert!(err.to_string().contains("odd token count 3"));
    }

    #[test]
    fn test_decode_non_numeric() {
        let err = decode_dice_list("(0,x)").unwrap_err();
        assert!(err.to_string().contains("non-numeric"));

        // Unreported positions are still validated
        assert!(decode_dice_list("(a,1)").is_err());
        assert!(decode_dice_list("(0,,1,2)").is_err());
    }

    #[test]
    fn test_decode_out_of_range() {
        assert!(decode_dice_list("(0,5)").is_err());
        assert!(decode_dice_list("(0,-1)").is_err());
        // Unreported positions may hold any integer
        assert!(decode_dice_list("(6,4)").is_ok());
    }

    #[test]
    fn test_raw_dice_list() {
        assert_eq!(parse_raw_dice_list("(-1,2,30,4)").unwrap(), vec![-1, 2, 30, 4]);
    }

    #[test]
    fn test_block_die_codes_and_labels() {
        for (code, die) in BlockDie::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(die.code()), code);
            assert_eq!(BlockDie::from_code(code as i64), Some(die));
            assert_eq!(die.label().parse::<BlockDie>(), Ok(die));
            assert_eq!(die.to_string(), die.label());
        }
        assert_eq!(BlockDie::from_code(5), None);
        assert!("X".parse::<BlockDie>().is_err());
    }

    #[test]
    fn test_block_die_serializes_as_label() {
        let json = serde_json::to_string(&vec![BlockDie::Push, BlockDie::DefenderDown]).unwrap();
        assert_eq!(json, r#"["P","DD"]"#);
    }

    #[quickcheck]
    fn decode_returns_odd_positioned_tokens(pairs: Vec<(i8, u8)>) -> bool {
        let expected: Vec<BlockDie> = pairs
            .iter()
            .filter_map(|&(_, face)| BlockDie::from_code(i64::from(face % 5)))
            .collect();
        let tokens: Vec<String> = pairs
            .iter()
            .flat_map(|&(other, face)| [other.to_string(), (face % 5).to_string()])
            .collect();
        let payload = format!("({})", tokens.join(","));

        match decode_dice_list(&payload) {
            Ok(dice) => dice.len() == pairs.len() && dice == expected,
            Err(_) => false,
        }
    }
}
