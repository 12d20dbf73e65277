use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("deadline {0} is not a positive number of time units")]
/// A deadline that is zero, negative, not finite, or past the largest representable time
pub struct InvalidDeadline(pub f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
/// The time a game is played until
///
/// The clock only takes whole values, so a fractional deadline behaves the same wherever it lies
/// between two whole times: people can be collected up to the whole time below it and the game is
/// over at the whole time above it. A deadline of `2.5` (or `2.2`) keeps the game running at time
/// 2 without rescuing anyone at time 3. A whole deadline `d` both ends the game and allows
/// collection at time `d`.
pub struct Deadline {
    last_collection: u32,
    fractional: bool,
}

impl Deadline {
    /// A whole deadline. Returns None for 0, which means the game has no deadline
    pub fn at(time: u32) -> Option<Self> {
        (time > 0).then_some(Deadline {
            last_collection: time,
            fractional: false,
        })
    }

    /// The first time at which the game is over
    pub fn reached_at(self) -> u32 {
        self.last_collection + u32::from(self.fractional)
    }

    /// The last time at which arriving agents still rescue people
    pub fn last_collection(self) -> u32 {
        self.last_collection
    }

    #[allow(missing_docs)]
    pub fn is_fractional(self) -> bool {
        self.fractional
    }

    /// Whether the game is over at `time`
    pub fn is_reached(self, time: u32) -> bool {
        time >= self.reached_at()
    }

    /// Whether people are still rescued at `time`
    pub fn allows_collection(self, time: u32) -> bool {
        time <= self.last_collection
    }
}

impl TryFrom<f64> for Deadline {
    type Error = InvalidDeadline;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value <= 0.0 || value.ceil() > f64::from(u32::MAX) {
            return Err(InvalidDeadline(value));
        }

        Ok(Deadline {
            last_collection: value.floor() as u32,
            fractional: value.fract() != 0.0,
        })
    }
}

impl From<Deadline> for f64 {
    fn from(deadline: Deadline) -> Self {
        let whole = f64::from(deadline.last_collection);
        if deadline.fractional {
            whole + 0.5
        } else {
            whole
        }
    }
}

impl Display for Deadline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.fractional {
            write!(f, "{}.5", self.last_collection)
        } else {
            write!(f, "{}", self.last_collection)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_deadline() {
        let deadline = Deadline::at(3).unwrap();

        assert!(!deadline.is_reached(2));
        assert!(deadline.is_reached(3));
        assert!(deadline.allows_collection(3));
        assert!(!deadline.allows_collection(4));
        assert_eq!(deadline.to_string(), "3");
        assert_eq!(Deadline::at(0), None);
    }

    #[test]
    fn test_fractional_deadline_splits_reached_and_collection() {
        let deadline = Deadline::try_from(2.5).unwrap();

        assert!(!deadline.is_reached(2));
        assert!(deadline.allows_collection(2));
        assert!(deadline.is_reached(3));
        assert!(!deadline.allows_collection(3));
        assert_eq!(deadline.to_string(), "2.5");
        assert_eq!(Deadline::try_from(2.2), Ok(deadline));

        let below_one = Deadline::try_from(0.5).unwrap();
        assert_eq!(below_one.reached_at(), 1);
        assert_eq!(below_one.last_collection(), 0);
    }

    #[test]
    fn test_rejects_invalid() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY, 5e9] {
            assert!(Deadline::try_from(value).is_err(), "{value} was accepted");
        }
    }

    #[test]
    fn test_json() {
        let deadline: Deadline = serde_json::from_str("9").unwrap();
        assert_eq!(Some(deadline), Deadline::at(9));

        let deadline: Deadline = serde_json::from_str("2.5").unwrap();
        assert_eq!(serde_json::to_string(&deadline).unwrap(), "2.5");

        assert!(serde_json::from_str::<Deadline>("0").is_err());
    }
}
