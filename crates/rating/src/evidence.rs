use salemap_core::CrimeGrade;
use serde::{Deserialize, Serialize};

/// What a crime page yielded. Every field is optional; a page that gave
/// no grade at all is not evidence.
///
/// Field names match the on-disk crime cache document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeEvidence {
    #[serde(default)]
    pub overall_grade: Option<CrimeGrade>,
    #[serde(default)]
    pub violent_grade: Option<CrimeGrade>,
    #[serde(default)]
    pub property_grade: Option<CrimeGrade>,
    /// Free-text rate sentence, e.g. "crime rate is 23% lower than average".
    #[serde(default)]
    pub crime_description: Option<String>,
}

impl CrimeEvidence {
    /// Grade that drives the rating: overall, else violent.
    pub fn primary_grade(&self) -> Option<CrimeGrade> {
        self.overall_grade.or(self.violent_grade)
    }

    pub fn has_any_grade(&self) -> bool {
        self.overall_grade.is_some() || self.violent_grade.is_some() || self.property_grade.is_some()
    }
}
