//! Static income estimate: the always-available baseline tier.
//!
//! State medians are 2023 ACS household medians rounded to $1000. Known
//! ZIP prefixes scale the state figure; multipliers are kept as integer
//! percentages so the result is an exact floor.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use salemap_core::{sanitize_state, sanitize_zip, zip_prefix, RatingBucket};

/// Used when the state is not in the table.
pub const DEFAULT_MEDIAN_INCOME: u32 = 70_000;

static STATE_MEDIAN_INCOME: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("AL", 59_000), ("AK", 86_000), ("AZ", 72_000), ("AR", 56_000), ("CA", 91_000),
        ("CO", 87_000), ("CT", 90_000), ("DE", 79_000), ("FL", 67_000), ("GA", 71_000),
        ("HI", 94_000), ("ID", 70_000), ("IL", 78_000), ("IN", 67_000), ("IA", 72_000),
        ("KS", 69_000), ("KY", 60_000), ("LA", 57_000), ("ME", 68_000), ("MD", 98_000),
        ("MA", 96_000), ("MI", 68_000), ("MN", 84_000), ("MS", 52_000), ("MO", 65_000),
        ("MT", 66_000), ("NE", 74_000), ("NV", 71_000), ("NH", 90_000), ("NJ", 97_000),
        ("NM", 58_000), ("NY", 81_000), ("NC", 66_000), ("ND", 73_000), ("OH", 66_000),
        ("OK", 61_000), ("OR", 76_000), ("PA", 73_000), ("RI", 78_000), ("SC", 63_000),
        ("SD", 69_000), ("TN", 64_000), ("TX", 73_000), ("UT", 86_000), ("VT", 74_000),
        ("VA", 87_000), ("WA", 91_000), ("WV", 53_000), ("WI", 72_000), ("WY", 72_000),
        ("DC", 101_000),
    ])
});

// Percent of the state median. Consulted before the lower-income table.
static AFFLUENT_ZIP_PREFIXES: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        // CA
        ("902", 150), ("906", 140), ("941", 130), ("943", 150), ("945", 130),
        // NY
        ("100", 140), ("104", 160), ("105", 150), ("106", 140),
        // NJ
        ("070", 140), ("074", 130), ("076", 150),
        // MA
        ("024", 140), ("017", 130),
        // CT
        ("068", 150), ("069", 130),
        // TX
        ("752", 130), ("770", 120), ("787", 120),
        // FL
        ("331", 130), ("334", 120), ("335", 120),
        // IL
        ("600", 120), ("604", 140), ("605", 130),
        // OH (Toledo metro)
        ("434", 100), ("435", 110), ("436", 90), ("433", 120),
        // MI
        ("480", 100), ("481", 130), ("482", 140), ("483", 160), ("484", 120),
        // GA
        ("300", 120), ("303", 100), ("305", 110),
        // VA
        ("201", 130), ("220", 150), ("221", 140), ("222", 160),
        // MD
        ("208", 120), ("210", 90), ("212", 80), ("217", 140),
        // PA
        ("190", 130), ("191", 90), ("193", 120), ("194", 140),
        // CO
        ("801", 120), ("802", 110), ("803", 130),
        // WA
        ("980", 130), ("981", 140), ("982", 120),
    ])
});

static LOWER_INCOME_ZIP_PREFIXES: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("436", 80),
        ("482", 70),
        ("191", 75),
        ("212", 70),
        ("303", 80),
        ("606", 75),
    ])
});

/// Income-derived baseline rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeRating {
    pub income: u32,
    pub bucket: RatingBucket,
    pub score: u8,
    pub description: &'static str,
}

/// Bucket, score and description for an estimated income.
pub fn income_rating(income: u32) -> IncomeRating {
    let (bucket, score, description) = match income {
        i if i >= 100_000 => (RatingBucket::Excellent, 9, "Upscale area - likely high-value items"),
        i if i >= 80_000 => (RatingBucket::Good, 7, "Nice suburban area - quality items expected"),
        i if i >= 65_000 => (RatingBucket::Fair, 5, "Average area - mixed quality"),
        i if i >= 50_000 => (RatingBucket::BelowAverage, 4, "Working class area - exercise caution"),
        _ => (RatingBucket::Poor, 2, "Lower income area - be aware of surroundings"),
    };
    IncomeRating {
        income,
        bucket,
        score,
        description,
    }
}

/// Table-driven income estimate. Pure, total and never cached.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticEstimate;

impl StaticEstimate {
    pub fn new() -> Self {
        Self
    }

    /// Estimated median household income for a ZIP in a state.
    pub fn estimate(&self, zip: &str, state: &str) -> u32 {
        let zip = sanitize_zip(zip);
        let state = sanitize_state(state);
        let base = STATE_MEDIAN_INCOME
            .get(state.as_str())
            .copied()
            .unwrap_or(DEFAULT_MEDIAN_INCOME);

        let prefix = zip_prefix(&zip);
        let percent = AFFLUENT_ZIP_PREFIXES
            .get(prefix)
            .or_else(|| LOWER_INCOME_ZIP_PREFIXES.get(prefix))
            .copied();

        match percent {
            Some(p) => (u64::from(base) * u64::from(p) / 100) as u32,
            None => base,
        }
    }

    pub fn baseline(&self, zip: &str, state: &str) -> IncomeRating {
        income_rating(self.estimate(zip, state))
    }
}
