//! URL handling module for doc-scraper
//!
//! This module provides base URL normalization, link canonicalization,
//! network-location comparison and the domain label used in output file names.

mod domain;
mod normalize;

pub use domain::{domain_label, same_netloc};
pub use normalize::{canonicalize_url, normalize_base_url};
