//! Recorded twists and move logs.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use regex::Regex;

use crate::{CubeError, GroupKey};

/// Twist expressed in user-facing notation, such as `R`, `2-3Rw2`, or `x'`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TwistAction {
    /// Notation for the group being twisted.
    pub notation: String,
    /// Whether the twist is counterclockwise.
    pub reverse: bool,
    /// Number of quarter turns.
    pub times: u32,
}
impl fmt::Display for TwistAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation)?;
        if self.times != 1 {
            write!(f, "{}", self.times)?;
        }
        if self.reverse {
            write!(f, "'")?;
        }
        Ok(())
    }
}
impl FromStr for TwistAction {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const TWIST_PATTERN: &str = r"^(.+?)(\d*)('?)$";
        // match the whole string   ^            $
        // capture the group          (.+?)
        //   as few symbols as possible
        // then the number of turns        (\d*)
        // then an optional prime               ('?)

        lazy_static! {
            static ref TWIST_REGEX: Regex = Regex::new(TWIST_PATTERN).expect("bad regex");
        }

        // Canonical keys may end in digits, which are not a number of turns.
        let body = s.strip_suffix('\'').unwrap_or(s);
        if body.parse::<GroupKey>().is_ok() {
            return Ok(Self {
                notation: body.to_owned(),
                reverse: body.len() != s.len(),
                times: 1,
            });
        }

        let unknown = || CubeError::UnknownNotation(s.to_owned());
        let captures = TWIST_REGEX.captures(s).ok_or_else(unknown)?;
        let notation = captures.get(1).ok_or_else(unknown)?.as_str().to_owned();
        let times = match captures.get(2).map_or("", |m| m.as_str()) {
            "" => 1,
            digits => digits.parse().map_err(|_| unknown())?,
        };
        let reverse = captures.get(3).is_some_and(|m| !m.as_str().is_empty());
        Ok(Self {
            notation,
            reverse,
            times,
        })
    }
}
impl TwistAction {
    /// Returns the signed angle of the twist in quarter turns, positive for
    /// counterclockwise.
    pub fn quarter_turns(&self) -> i64 {
        let times = i64::from(self.times);
        if self.reverse { times } else { -times }
    }
}

/// Log of twists applied to a cube.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MoveLog {
    actions: Vec<TwistAction>,
}
impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.actions.iter().join(" "))
    }
}
impl MoveLog {
    /// Constructs an empty move log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a twist to the log.
    pub fn record(&mut self, action: TwistAction) {
        log::trace!("recorded twist {action}");
        self.actions.push(action);
    }
    /// Removes every twist from the log.
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Returns the recorded twists, oldest first.
    pub fn actions(&self) -> &[TwistAction] {
        &self.actions
    }
    /// Returns the most recent twist.
    pub fn last(&self) -> Option<&TwistAction> {
        self.actions.last()
    }
    /// Returns the number of recorded twists.
    pub fn len(&self) -> usize {
        self.actions.len()
    }
    /// Returns whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn action(notation: &str, reverse: bool, times: u32) -> TwistAction {
        TwistAction {
            notation: notation.to_owned(),
            reverse,
            times,
        }
    }

    #[test]
    fn test_twist_action_display() {
        assert_eq!(action("R", false, 1).to_string(), "R");
        assert_eq!(action("R", true, 1).to_string(), "R'");
        assert_eq!(action("2-3Rw", false, 2).to_string(), "2-3Rw2");
        assert_eq!(action("x", true, 2).to_string(), "x2'");
    }

    #[test]
    fn test_twist_action_parse() {
        assert_eq!("R".parse(), Ok(action("R", false, 1)));
        assert_eq!("R2'".parse(), Ok(action("R", true, 2)));
        assert_eq!("2R".parse(), Ok(action("2R", false, 1)));
        assert_eq!("2-3Rw2".parse(), Ok(action("2-3Rw", false, 2)));
        assert_eq!("x:1:2'".parse(), Ok(action("x:1:2", true, 1)));
        assert_eq!("-z:3:3".parse(), Ok(action("-z:3:3", false, 1)));
        assert_eq!(".".parse(), Ok(action(".", false, 1)));
        assert_eq!(
            "".parse::<TwistAction>(),
            Err(CubeError::UnknownNotation(String::new())),
        );
    }

    #[test]
    fn test_move_log() {
        let mut log = MoveLog::new();
        assert!(log.is_empty());
        log.record(action("R", false, 1));
        log.record(action("U", true, 2));
        assert_eq!(log.len(), 2);
        assert_eq!(log.to_string(), "R U2'");
        assert_eq!(log.last(), Some(&action("U", true, 2)));
        assert_eq!(
            log.actions(),
            &[action("R", false, 1), action("U", true, 2)],
        );
        log.clear();
        assert_eq!(log.to_string(), "");
    }
}
