//! `salemap-core`: shared data model for record linkage and neighborhood ratings.
//!
//! No IO. Every other crate in the workspace speaks in these types.

pub mod grade;
pub mod rating;
pub mod record;
pub mod zip;

pub use grade::CrimeGrade;
pub use rating::{DataSource, NeighborhoodRating, RatingBucket};
pub use record::{CandidateListing, SaleRecord};
pub use zip::{sanitize_state, sanitize_zip, zip_prefix};
