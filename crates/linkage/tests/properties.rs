// Property tests for address normalization and linkage.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use salemap_core::{CandidateListing, SaleRecord};
use salemap_linkage::{find_url, link, normalize, CandidateIndex, MatchKind};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Address-ish text with messy spacing, commas and mixed case.
fn arb_raw_address() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"[0-9]{1,5}[ \t,]{1,3}[A-Za-z]{2,10}( [A-Za-z]{2,6})?[ ,\n]{0,3}",
        1 => r"[ -~\t\n]{0,40}",
        1 => Just(String::new()),
    ]
}

fn arb_street() -> impl Strategy<Value = String> {
    r"[1-9][0-9]{0,4} [A-Z][a-z]{2,9} (St|Ave|Rd|Ln|Dr)"
}

fn arb_city() -> impl Strategy<Value = String> {
    r"[A-Z][a-z]{3,11}"
}

fn arb_state() -> impl Strategy<Value = String> {
    r"[A-Z]{2}"
}

fn arb_zip() -> impl Strategy<Value = String> {
    r"[0-9]{5}"
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn normalized_has_no_commas_or_double_spaces(raw in arb_raw_address()) {
        let key = normalize(&raw);
        prop_assert!(!key.as_str().contains(','));
        prop_assert!(!key.as_str().contains("  "));
        prop_assert!(!key.as_str().chars().any(|c| c.is_whitespace() && c != ' '));
        prop_assert_eq!(key.as_str().trim(), key.as_str());
    }

    #[test]
    fn normalization_is_idempotent(raw in arb_raw_address()) {
        let once = normalize(&raw);
        let twice = normalize(once.as_str());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalization_ignores_case(raw in arb_raw_address()) {
        prop_assert_eq!(normalize(&raw.to_uppercase()), normalize(&raw.to_lowercase()));
    }
}

// ---------------------------------------------------------------------------
// Linkage
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn full_key_links_exactly(
        street in arb_street(),
        city in arb_city(),
        state in arb_state(),
        zip in arb_zip(),
    ) {
        let target = SaleRecord::new("Sale", street.clone(), city.clone(), state.clone(), zip.clone());
        let listing = CandidateListing::new(
            format!("{street}, {city}, {state} {zip}"),
            "https://x.test/full",
        );
        let index = CandidateIndex::from_listings([&listing]);
        let m = link(&target, &index).unwrap();
        prop_assert_eq!(m.url, "https://x.test/full");
        prop_assert_eq!(m.kind, MatchKind::Exact);
    }

    #[test]
    fn street_alone_links_by_containment(
        street in arb_street(),
        city in arb_city(),
        other_city in arb_city(),
        state in arb_state(),
        zip in arb_zip(),
    ) {
        prop_assume!(city != other_city);
        let target = SaleRecord::new("Sale", street.clone(), city, state.clone(), zip.clone());
        let listing = CandidateListing::new(
            format!("{street}, {other_city}, {state} {zip}"),
            "https://x.test/street",
        );
        let index = CandidateIndex::from_listings([&listing]);
        let m = link(&target, &index).unwrap();
        prop_assert_eq!(m.url, "https://x.test/street");
        prop_assert_eq!(m.kind, MatchKind::Contained);
    }
}

// ---------------------------------------------------------------------------
// Worked example
// ---------------------------------------------------------------------------

#[test]
fn springfield_example() {
    let key = normalize("123 Main St, Springfield, OH 45501");
    assert_eq!(key.as_str(), "123 main st springfield oh 45501");

    let mut index = CandidateIndex::new();
    index.insert("123 main st springfield oh 45501", "https://x.test/1");

    let sale = SaleRecord::new("Springfield Estate", "123 Main St", "Springfield", "OH", "45501");
    assert_eq!(find_url(&sale, &index), Some("https://x.test/1"));
}
