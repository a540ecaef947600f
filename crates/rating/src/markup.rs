//! Crime-page markup heuristics.
//!
//! The page layout is not ours and changes without notice, so the parser
//! sits behind [`MarkupParser`] and the chain only ever sees
//! `Option<CrimeEvidence>`.

use once_cell::sync::Lazy;
use regex::Regex;
use salemap_core::CrimeGrade;

use crate::evidence::CrimeEvidence;

/// Turns fetched markup into evidence. `None` means the page carried no
/// usable grade, even if it was fetched fine.
pub trait MarkupParser: Send + Sync {
    fn parse(&self, markup: &str) -> Option<CrimeEvidence>;
}

// Grade letters are matched upper-case only and must not run into a
// following word character, so "grade: average" is not an A.

static OVERALL_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i:overall|total)\s*(?i:crime)?\s*(?i:grade)[:\s]*(?:<[^>]*>[:\s]*)*([A-F][+-]?)(?:[^A-Za-z0-9+\-]|$)",
    )
    .expect("invalid overall label regex")
});

static GRADE_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i:<[^>]*class="[^"]*grade[^"]*"[^>]*>)\s*([A-F][+-]?)\s*<"#).expect("invalid grade class regex")
});

static GENERIC_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:grade)[:\s]+(?:<[^>]*>\s*)*([A-F][+-]?)(?:[^A-Za-z0-9+\-]|$)").expect("invalid generic label regex")
});

static VIOLENT_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i:violent\s*crime)[^A-F<]{0,40}?(?:<[^>]*>[^A-F<]{0,40}?)*([A-F][+-]?)(?:[^A-Za-z0-9+\-]|$)",
    )
    .expect("invalid violent label regex")
});

static PROPERTY_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i:property\s*crime)[^A-F<]{0,40}?(?:<[^>]*>[^A-F<]{0,40}?)*([A-F][+-]?)(?:[^A-Za-z0-9+\-]|$)",
    )
    .expect("invalid property label regex")
});

static RATE_SENTENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)crime\s+(?:rate\s+)?(?:is\s+)?(?:\d+%?\s+)?(?:lower|higher|average|below|above)[^.<]*")
        .expect("invalid rate sentence regex")
});

fn first_grade(pattern: &Regex, markup: &str) -> Option<CrimeGrade> {
    pattern
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1))
        .find_map(|m| CrimeGrade::parse(m.as_str()))
}

/// Default heuristics for the per-ZIP crime page.
///
/// Overall grade comes from the first of: an "overall/total crime grade"
/// label, an element whose class mentions `grade`, a bare `grade:` label.
/// Violent and property grades come from their own labels.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrimePageParser;

impl CrimePageParser {
    pub fn new() -> Self {
        Self
    }

    fn overall(markup: &str) -> Option<CrimeGrade> {
        [&*OVERALL_LABEL, &*GRADE_CLASS, &*GENERIC_LABEL]
            .into_iter()
            .find_map(|pattern| first_grade(pattern, markup))
    }

    fn description(markup: &str) -> Option<String> {
        RATE_SENTENCE
            .find(markup)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

impl MarkupParser for CrimePageParser {
    fn parse(&self, markup: &str) -> Option<CrimeEvidence> {
        let evidence = CrimeEvidence {
            overall_grade: Self::overall(markup),
            violent_grade: first_grade(&VIOLENT_LABEL, markup),
            property_grade: first_grade(&PROPERTY_LABEL, markup),
            crime_description: Self::description(markup),
        };

        if evidence.has_any_grade() {
            Some(evidence)
        } else {
            log::debug!("crime page carried no grade ({} bytes)", markup.len());
            None
        }
    }
}
