//! Shared fixtures for integration tests.
//!
//! Replays are generated on the fly: each test writes small `.bbrz`
//! archives into a temporary directory.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A board action with the given acting player and block dice payloads.
pub fn block_action(player_id: &str, payloads: &[&str]) -> String {
    let dice: String = payloads
        .iter()
        .map(|p| format!("<ListDices>{p}</ListDices>"))
        .collect();
    format!(
        "<RulesEventBoardAction>\n\
         \x20 <PlayerId>{player_id}</PlayerId>\n\
         \x20 <Results>\n\
         \x20   <BoardActionResult>\n\
         \x20     <RollType>5</RollType>\n\
         \x20     <ResultType>2</ResultType>\n\
         \x20     <IsOrderCompleted>0</IsOrderCompleted>\n\
         \x20     <CoachChoices>{dice}</CoachChoices>\n\
         \x20   </BoardActionResult>\n\
         \x20 </Results>\n\
         </RulesEventBoardAction>"
    )
}

/// A non-block board action (a dodge roll) for the given player.
pub fn dodge_action(player_id: &str) -> String {
    format!(
        "<RulesEventBoardAction><PlayerId>{player_id}</PlayerId><Results>\
         <BoardActionResult><RollType>2</RollType><ResultType>2</ResultType>\
         <CoachChoices><ListDices>(3,6)</ListDices></CoachChoices>\
         </BoardActionResult></Results></RulesEventBoardAction>"
    )
}

/// A game-finished event for a home coach (ID 100) and an away coach
/// (ID 200) with the given player IDs.
pub fn game_finished(
    home_name: &str,
    home_players: &[&str],
    away_name: &str,
    away_players: &[&str],
) -> String {
    fn coach_result(coach_id: &str, players: &[&str]) -> String {
        let players: String = players
            .iter()
            .map(|id| {
                format!("<PlayerResult><PlayerData><Id>{id}</Id></PlayerData></PlayerResult>")
            })
            .collect();
        format!(
            "<CoachResult><CoachData><IdCoach>{coach_id}</IdCoach></CoachData>\
             <PlayerResults>{players}</PlayerResults></CoachResult>"
        )
    }

    format!(
        "<RulesEventGameFinished><MatchResult>\
         <Row><IdCoachHome>100</IdCoachHome><CoachHomeName>{}</CoachHomeName>\
         <IdCoachAway>200</IdCoachAway><CoachAwayName>{}</CoachAwayName></Row>\
         <CoachResults>{}{}</CoachResults>\
         </MatchResult></RulesEventGameFinished>",
        home_name,
        away_name,
        coach_result("100", home_players),
        coach_result("200", away_players),
    )
}

/// Wraps events into a replay document, one `ReplayStep` per event.
pub fn replay(events: &[String]) -> String {
    let steps: String = events
        .iter()
        .map(|e| format!("  <ReplayStep>\n{e}\n  </ReplayStep>\n"))
        .collect();
    format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Replay>\n{steps}</Replay>\n")
}

/// Builds a deflated zip container holding the given entries.
pub fn bbrz_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, text) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(text.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Writes a `.bbrz` archive into `dir`.
pub fn write_bbrz(dir: &Path, file_name: &str, entries: &[(&str, &str)]) {
    std::fs::write(dir.join(file_name), bbrz_bytes(entries)).unwrap();
}

/// A complete match between Alice (players 11, 12) and Bob (player 21).
pub fn sample_match() -> String {
    replay(&[
        block_action("11", &["(0,1,2,3)"]),
        dodge_action("21"),
        block_action("21", &["(0,4)", "(1,2,1,0)"]),
        block_action("99", &["(0,2)"]),
        game_finished("Alice", &["11", "12"], "Bob", &["21"]),
    ])
}
