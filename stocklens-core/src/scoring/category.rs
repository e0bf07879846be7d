//! Score-to-category ladder used for presentation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    VeryStrong,
    Strong,
    Good,
    Neutral,
    Weak,
    VeryWeak,
}

impl ScoreCategory {
    /// Six-bucket ladder: >=80, >=70, >=60, >=50, >=40, else.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::VeryStrong
        } else if score >= 70.0 {
            Self::Strong
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Neutral
        } else if score >= 40.0 {
            Self::Weak
        } else {
            Self::VeryWeak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryStrong => "매우 강함",
            Self::Strong => "강함",
            Self::Good => "양호",
            Self::Neutral => "보통",
            Self::Weak => "약함",
            Self::VeryWeak => "매우 약함",
        }
    }
}

impl std::fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
