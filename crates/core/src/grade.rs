use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rating::RatingBucket;

/// Score used when no grade (or an unrecognised one) is available.
pub const UNKNOWN_GRADE_SCORE: u8 = 5;

/// Letter grade for relative crime level, A+ (safest) through F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CrimeGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "F")]
    F,
}

impl CrimeGrade {
    pub const ALL: [CrimeGrade; 13] = [
        CrimeGrade::APlus,
        CrimeGrade::A,
        CrimeGrade::AMinus,
        CrimeGrade::BPlus,
        CrimeGrade::B,
        CrimeGrade::BMinus,
        CrimeGrade::CPlus,
        CrimeGrade::C,
        CrimeGrade::CMinus,
        CrimeGrade::DPlus,
        CrimeGrade::D,
        CrimeGrade::DMinus,
        CrimeGrade::F,
    ];

    /// Parse a grade label, case-insensitively and ignoring surrounding
    /// whitespace. `"E"`, `"F+"` and the like are not grades.
    pub fn parse(label: &str) -> Option<Self> {
        let grade = match label.trim().to_ascii_uppercase().as_str() {
            "A+" => Self::APlus,
            "A" => Self::A,
            "A-" => Self::AMinus,
            "B+" => Self::BPlus,
            "B" => Self::B,
            "B-" => Self::BMinus,
            "C+" => Self::CPlus,
            "C" => Self::C,
            "C-" => Self::CMinus,
            "D+" => Self::DPlus,
            "D" => Self::D,
            "D-" => Self::DMinus,
            "F" => Self::F,
            _ => return None,
        };
        Some(grade)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::F => "F",
        }
    }

    /// Numeric score on the 1–10 scale.
    pub fn score(&self) -> u8 {
        match self {
            Self::APlus => 10,
            Self::A => 9,
            Self::AMinus => 8,
            Self::BPlus | Self::B => 7,
            Self::BMinus => 6,
            Self::CPlus | Self::C => 5,
            Self::CMinus => 4,
            Self::DPlus | Self::D => 3,
            Self::DMinus => 2,
            Self::F => 1,
        }
    }

    /// Bucket by letter: A-range excellent, B good, C fair, D below average, F poor.
    pub fn bucket(&self) -> RatingBucket {
        match self {
            Self::APlus | Self::A | Self::AMinus => RatingBucket::Excellent,
            Self::BPlus | Self::B | Self::BMinus => RatingBucket::Good,
            Self::CPlus | Self::C | Self::CMinus => RatingBucket::Fair,
            Self::DPlus | Self::D | Self::DMinus => RatingBucket::BelowAverage,
            Self::F => RatingBucket::Poor,
        }
    }
}

/// Score for an optional grade; absent grades sit in the middle of the scale.
pub fn grade_score(grade: Option<CrimeGrade>) -> u8 {
    grade.map_or(UNKNOWN_GRADE_SCORE, |g| g.score())
}

impl fmt::Display for CrimeGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGrade(pub String);

impl fmt::Display for InvalidGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a crime grade: '{}'", self.0)
    }
}

impl std::error::Error for InvalidGrade {}

impl FromStr for CrimeGrade {
    type Err = InvalidGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidGrade(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_grade_scores_within_scale() {
        for grade in CrimeGrade::ALL {
            let score = grade.score();
            assert!((1..=10).contains(&score), "{grade} scored {score}");
        }
    }

    #[test]
    fn scores_never_increase_down_the_scale() {
        for pair in CrimeGrade::ALL.windows(2) {
            assert!(pair[0].score() >= pair[1].score());
        }
    }

    #[test]
    fn labels_round_trip() {
        for grade in CrimeGrade::ALL {
            assert_eq!(CrimeGrade::parse(grade.as_str()), Some(grade));
            assert_eq!(grade.as_str().parse::<CrimeGrade>(), Ok(grade));
        }
        assert_eq!(CrimeGrade::parse(" b- "), Some(CrimeGrade::BMinus));
    }

    #[test]
    fn unknown_labels_default_to_middle() {
        assert_eq!(grade_score(CrimeGrade::parse("E")), 5);
        assert_eq!(grade_score(CrimeGrade::parse("")), 5);
        assert_eq!(grade_score(CrimeGrade::parse("F+")), 5);
        assert_eq!(grade_score(None), 5);
        assert!("Z".parse::<CrimeGrade>().is_err());
    }

    #[test]
    fn buckets_follow_letter() {
        assert_eq!(CrimeGrade::AMinus.bucket(), RatingBucket::Excellent);
        assert_eq!(CrimeGrade::BPlus.bucket(), RatingBucket::Good);
        assert_eq!(CrimeGrade::C.bucket(), RatingBucket::Fair);
        assert_eq!(CrimeGrade::DMinus.bucket(), RatingBucket::BelowAverage);
        assert_eq!(CrimeGrade::F.bucket(), RatingBucket::Poor);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&CrimeGrade::BPlus).unwrap();
        assert_eq!(json, "\"B+\"");
        let back: CrimeGrade = serde_json::from_str("\"D-\"").unwrap();
        assert_eq!(back, CrimeGrade::DMinus);
    }
}
