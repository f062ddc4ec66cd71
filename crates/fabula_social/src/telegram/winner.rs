//! Poll winner selection.

use super::dto::WirePollOption;
use crate::PollOutcome;

/// Pick the winning option of a closed poll.
///
/// Highest vote count wins; on a tie the first-listed option (original
/// ordering) is selected deterministically. Zero votes across the board
/// means no winner.
pub fn decide_winner(options: &[WirePollOption]) -> Option<PollOutcome> {
    let max_votes = options.iter().map(|opt| opt.voter_count).max()?;
    if max_votes == 0 {
        return None;
    }
    options
        .iter()
        .find(|opt| opt.voter_count == max_votes)
        .map(|opt| PollOutcome {
            winner: opt.text.clone(),
            votes: max_votes,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(text: &str, votes: u32) -> WirePollOption {
        WirePollOption {
            text: text.to_string(),
            voter_count: votes,
        }
    }

    #[test]
    fn plurality_wins() {
        let options = vec![option("Left", 1), option("Right", 5), option("Wait", 2)];
        let outcome = decide_winner(&options).unwrap();
        assert_eq!(outcome.winner, "Right");
        assert_eq!(outcome.votes, 5);
    }

    #[test]
    fn tie_resolves_to_first_listed() {
        let options = vec![option("Left", 3), option("Right", 3), option("Wait", 1)];
        let outcome = decide_winner(&options).unwrap();
        assert_eq!(outcome.winner, "Left");
    }

    #[test]
    fn zero_votes_yield_no_winner() {
        let options = vec![option("Left", 0), option("Right", 0)];
        assert!(decide_winner(&options).is_none());
    }

    #[test]
    fn empty_option_list_yields_no_winner() {
        assert!(decide_winner(&[]).is_none());
    }
}
