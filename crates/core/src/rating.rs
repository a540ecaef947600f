use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grade::CrimeGrade;

/// Coarse neighborhood-quality classification, best first.
///
/// Variant order is quality order: `Excellent < Good < … < Poor` under
/// `Ord`, so "better" means "smaller".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBucket {
    Excellent,
    Good,
    Fair,
    BelowAverage,
    Poor,
}

impl RatingBucket {
    pub const ALL: [RatingBucket; 5] = [
        RatingBucket::Excellent,
        RatingBucket::Good,
        RatingBucket::Fair,
        RatingBucket::BelowAverage,
        RatingBucket::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::BelowAverage => "below_average",
            Self::Poor => "poor",
        }
    }

    /// Title-cased name for display ("Below Average").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::BelowAverage => "Below Average",
            Self::Poor => "Poor",
        }
    }

    /// Map pin colour used by the geospatial output.
    pub fn icon_color(&self) -> &'static str {
        match self {
            Self::Excellent => "green",
            Self::Good => "ltblue",
            Self::Fair => "yellow",
            Self::BelowAverage => "orange",
            Self::Poor => "red",
        }
    }
}

impl fmt::Display for RatingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which evidence tier decided the rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// A crime grade was found; score blended with the income estimate.
    #[serde(rename = "crimegrade")]
    CrimeGrade,
    /// Static income estimate only.
    IncomeEstimate,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrimeGrade => "crimegrade",
            Self::IncomeEstimate => "income_estimate",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived neighborhood rating for one ZIP code.
///
/// A value type: every lookup builds a fresh one, cached evidence is
/// never mutated through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodRating {
    pub zip_code: String,
    pub state: String,
    pub city: String,
    /// Estimated median household income, USD.
    pub estimated_income: u32,
    pub rating: RatingBucket,
    /// 1–10.
    pub score: u8,
    pub description: String,
    pub crime_grade: Option<CrimeGrade>,
    pub data_source: DataSource,
}

impl NeighborhoodRating {
    pub fn icon_color(&self) -> &'static str {
        self.rating.icon_color()
    }

    /// One-line human summary, e.g.
    /// `Good (7/10) - Crime: B - $66,000 income - Below average crime ...`.
    /// Income-only ratings are tagged `[est]`.
    pub fn summary(&self) -> String {
        let income = thousands(self.estimated_income);
        match self.crime_grade {
            Some(grade) => format!(
                "{} ({}/10) - Crime: {} - ${} income - {}",
                self.rating.label(),
                self.score,
                grade,
                income,
                self.description
            ),
            None => format!(
                "{} ({}/10) - ${} median income - {} [est]",
                self.rating.label(),
                self.score,
                income,
                self.description
            ),
        }
    }
}

fn thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
