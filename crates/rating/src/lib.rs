//! `salemap-rating`: neighborhood rating resolution.
//!
//! A ZIP code goes through the [`ProviderChain`] (cache, then headless
//! browser, then direct fetch) for a crime grade, and the
//! [`ScoreBlender`] folds whatever came back into a
//! [`NeighborhoodRating`](salemap_core::NeighborhoodRating) on top of the
//! static income estimate. Nothing here fails the caller: missing evidence
//! degrades to the next tier.

pub mod batch;
pub mod blend;
pub mod cache;
pub mod chain;
mod engine;
pub mod error;
pub mod evidence;
pub mod income;
pub mod markup;
pub mod places;
pub mod politeness;
pub mod providers;

pub use batch::{resolve_batch, BatchOutcome, Location};
pub use blend::ScoreBlender;
pub use cache::{EvidenceCache, Partition};
pub use chain::{ProviderChain, Resolution};
pub use engine::NeighborhoodEngine;
pub use error::{CacheError, FetchError};
pub use evidence::CrimeEvidence;
pub use income::{IncomeRating, StaticEstimate};
pub use markup::{CrimePageParser, MarkupParser};
pub use places::{Place, PlaceInfo, PlaceLookup};
pub use politeness::Throttle;
pub use providers::{DirectFetch, EvidenceProvider, HeadlessBrowser, ProviderRegistry};
