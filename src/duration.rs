use regex::Regex;
use std::sync::OnceLock;

use crate::error::{HarvestError, Result};

fn digit_runs() -> &'static Regex {
    static DIGIT_RUNS: OnceLock<Regex> = OnceLock::new();
    DIGIT_RUNS.get_or_init(|| Regex::new(r"\d+").expect("digit pattern compiles"))
}

/// Parse an ISO 8601-style video duration token (e.g. "PT4M30S") into
/// seconds.
///
/// The token is read as its embedded digit runs in order: two runs are
/// minutes and seconds, a single run is seconds only. Anything else (no
/// digits at all, or an hours-and-up token with three or more runs) is
/// rejected as malformed rather than guessed at.
pub fn parse_duration(token: &str) -> Result<u64> {
    let groups: Vec<u64> = digit_runs()
        .find_iter(token)
        .map(|m| {
            m.as_str()
                .parse::<u64>()
                .map_err(|_| HarvestError::MalformedDuration(token.to_string()))
        })
        .collect::<Result<_>>()?;

    match groups.as_slice() {
        [seconds] => Ok(*seconds),
        [minutes, seconds] => Ok(minutes * 60 + seconds),
        _ => Err(HarvestError::MalformedDuration(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_group_token() {
        assert_eq!(parse_duration("PT4M30S").unwrap(), 270);
        assert_eq!(parse_duration("PT1M59S").unwrap(), 119);
    }

    #[test]
    fn test_single_group_token() {
        assert_eq!(parse_duration("PT45S").unwrap(), 45);
        assert_eq!(parse_duration("PT2M").unwrap(), 2);
    }

    #[test]
    fn test_no_digit_groups_rejected() {
        assert!(matches!(
            parse_duration("PT"),
            Err(HarvestError::MalformedDuration(_))
        ));
    }

    #[test]
    fn test_three_or_more_groups_rejected() {
        assert!(matches!(
            parse_duration("PT1H2M3S"),
            Err(HarvestError::MalformedDuration(_))
        ));
    }

    #[test]
    fn test_malformed_error_carries_the_token() {
        let err = parse_duration("P1DT2H3M4S").unwrap_err();
        assert!(err.to_string().contains("P1DT2H3M4S"));
    }
}
