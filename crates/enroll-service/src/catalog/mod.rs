//! Candidate course listing.

pub mod listing;

pub use listing::CatalogService;
