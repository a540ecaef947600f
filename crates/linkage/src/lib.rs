//! `salemap-linkage`: joins tabular sale records to narrative listings.
//!
//! Pure engine crate: receives pre-parsed records and listings, returns
//! matched URLs. No IO. Two addresses are the same place only through
//! their [`AddressKey`].

pub mod index;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod summary;

pub use index::CandidateIndex;
pub use matcher::{find_url, link, link_all};
pub use model::{LinkMatch, LinkOutcome, MatchKind};
pub use normalize::{normalize, AddressKey};
pub use summary::{compute_summary, LinkSummary};
