//! Folds crime evidence into the income baseline.

use salemap_core::grade::grade_score;
use salemap_core::{sanitize_state, sanitize_zip, CrimeGrade, DataSource, NeighborhoodRating, RatingBucket};

use crate::cache::EvidenceCache;
use crate::chain::ProviderChain;
use crate::income::{IncomeRating, StaticEstimate};

/// Crime grades weigh 70%, the income score 30%, rounded half up.
pub fn blended_score(grade_points: u8, income_score: u8) -> u8 {
    let weighted = 7 * u32::from(grade_points) + 3 * u32::from(income_score);
    ((weighted + 5) / 10).clamp(1, 10) as u8
}

fn crime_description(bucket: RatingBucket, grade: CrimeGrade) -> String {
    match bucket {
        RatingBucket::Excellent => format!("Low crime area (Grade {grade}) - safe neighborhood"),
        RatingBucket::Good => format!("Below average crime (Grade {grade}) - generally safe"),
        RatingBucket::Fair => format!("Average crime rate (Grade {grade}) - typical area"),
        RatingBucket::BelowAverage => format!("Above average crime (Grade {grade}) - use caution"),
        RatingBucket::Poor => format!("High crime area (Grade {grade}) - exercise caution"),
    }
}

/// Build a rating from a baseline and an optional crime grade. Pure.
pub fn rate(
    zip: &str,
    state: &str,
    city: &str,
    baseline: &IncomeRating,
    grade: Option<CrimeGrade>,
) -> NeighborhoodRating {
    let grade_points = grade_score(grade);
    let (rating, score, description, data_source) = match grade {
        Some(grade) => {
            let bucket = grade.bucket();
            (
                bucket,
                blended_score(grade_points, baseline.score),
                crime_description(bucket, grade),
                DataSource::CrimeGrade,
            )
        }
        None => (
            baseline.bucket,
            baseline.score,
            baseline.description.to_string(),
            DataSource::IncomeEstimate,
        ),
    };

    NeighborhoodRating {
        zip_code: zip.to_string(),
        state: state.to_string(),
        city: city.to_string(),
        estimated_income: baseline.income,
        rating,
        score,
        description,
        crime_grade: grade,
        data_source,
    }
}

pub struct ScoreBlender {
    estimate: StaticEstimate,
    chain: ProviderChain,
    crime_lookups: bool,
}

impl ScoreBlender {
    pub fn new(chain: ProviderChain, crime_lookups: bool) -> Self {
        Self {
            estimate: StaticEstimate::new(),
            chain,
            crime_lookups,
        }
    }

    /// Income estimate only; never touches the cache or network.
    pub fn income_only() -> Self {
        Self::new(ProviderChain::offline(), false)
    }

    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    pub fn crime_lookups(&self) -> bool {
        self.crime_lookups
    }

    /// Never fails: without a grade the income baseline is returned as is.
    pub fn blend(&self, cache: &EvidenceCache, zip: &str, state: &str, city: &str) -> NeighborhoodRating {
        let zip = sanitize_zip(zip);
        let state = sanitize_state(state);
        let baseline = self.estimate.baseline(&zip, &state);

        let grade = if self.crime_lookups {
            self.chain.resolve_crime_grade(cache, &zip)
        } else {
            None
        };

        rate(&zip, &state, city, &baseline, grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::CrimeEvidence;
    use crate::income::income_rating;

    #[test]
    fn income_only_example() {
        let blender = ScoreBlender::income_only();
        let r = blender.blend(&EvidenceCache::in_memory(), "45501", "OH", "Springfield");
        assert_eq!(r.estimated_income, 66_000);
        assert_eq!(r.rating, RatingBucket::Fair);
        assert_eq!(r.score, 5);
        assert_eq!(r.description, "Average area - mixed quality");
        assert_eq!(r.data_source, DataSource::IncomeEstimate);
        assert_eq!(r.crime_grade, None);
        assert_eq!(r.icon_color(), "yellow");
    }

    #[test]
    fn grade_b_with_good_income() {
        let baseline = income_rating(85_000);
        assert_eq!(baseline.score, 7);
        let r = rate("20001", "DC", "Washington", &baseline, Some(CrimeGrade::B));
        assert_eq!(r.score, 7);
        assert_eq!(r.rating, RatingBucket::Good);
        assert_eq!(r.data_source, DataSource::CrimeGrade);
        assert_eq!(r.description, "Below average crime (Grade B) - generally safe");
    }

    #[test]
    fn grade_overrides_bucket() {
        // Wealthy baseline, poor grade: bucket follows the grade.
        let baseline = income_rating(150_000);
        let r = rate("10001", "NY", "", &baseline, Some(CrimeGrade::F));
        assert_eq!(r.rating, RatingBucket::Poor);
        assert_eq!(r.score, blended_score(1, 9));
        assert_eq!(r.score, 3);
        assert_eq!(r.estimated_income, 150_000);
    }

    #[test]
    fn blended_score_rounds() {
        assert_eq!(blended_score(10, 9), 10); // 9.7
        assert_eq!(blended_score(1, 2), 1); // 1.3
        assert_eq!(blended_score(5, 4), 5); // 4.7
        assert_eq!(blended_score(3, 4), 3); // 3.3
        assert_eq!(blended_score(6, 2), 5); // 4.8
    }

    #[test]
    fn cached_grade_is_used_when_lookups_enabled() {
        let cache = EvidenceCache::in_memory();
        cache.crime.put(
            "43551",
            CrimeEvidence {
                violent_grade: Some(CrimeGrade::AMinus),
                ..Default::default()
            },
        );

        let blender = ScoreBlender::new(ProviderChain::offline(), true);
        let r = blender.blend(&cache, "43551", "oh", "Perrysburg");
        assert_eq!(r.crime_grade, Some(CrimeGrade::AMinus));
        assert_eq!(r.rating, RatingBucket::Excellent);
        assert_eq!(r.state, "OH");

        let disabled = ScoreBlender::new(ProviderChain::offline(), false);
        assert_eq!(disabled.blend(&cache, "43551", "OH", "").data_source, DataSource::IncomeEstimate);
    }

    #[test]
    fn all_none_evidence_falls_back_to_income() {
        let cache = EvidenceCache::in_memory();
        cache.crime.put("43551", CrimeEvidence::default());
        let blender = ScoreBlender::new(ProviderChain::offline(), true);
        assert_eq!(blender.blend(&cache, "43551", "OH", "").data_source, DataSource::IncomeEstimate);
    }
}
