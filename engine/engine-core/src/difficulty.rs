//! Difficulty presets.

use std::fmt;
use std::str::FromStr;

use negamax::NegamaxConfig;

use crate::error::EngineError;
use crate::strategy::Strategy;

/// Player-facing difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Random legal columns.
    Easy,
    /// Negamax, five plies.
    Medium,
    /// Negamax, six plies.
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn strategy(self) -> Strategy {
        match self {
            Difficulty::Easy => Strategy::Random,
            Difficulty::Medium => Strategy::Negamax(NegamaxConfig::default().with_depth(5)),
            Difficulty::Hard => Strategy::Negamax(NegamaxConfig::default().with_depth(6)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(matches!(Difficulty::Easy.strategy(), Strategy::Random));

        match Difficulty::Medium.strategy() {
            Strategy::Negamax(config) => assert_eq!(config.depth, Some(5)),
            other => panic!("unexpected strategy {}", other),
        }
        match Difficulty::Hard.strategy() {
            Strategy::Negamax(config) => assert_eq!(config.depth, Some(6)),
            other => panic!("unexpected strategy {}", other),
        }
    }

    #[test]
    fn test_parse() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.as_str().parse::<Difficulty>().unwrap(), difficulty);
        }
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(
            "insane".parse::<Difficulty>(),
            Err(EngineError::UnknownDifficulty("insane".to_string()))
        );
    }
}
