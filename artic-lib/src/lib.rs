//! Artwork table browser library
//!
//! A Rust async library for browsing the Art Institute of Chicago public
//! artworks API as a lazily fetched, paginated record set with globally
//! consistent selection: a user can request "select the first N records"
//! across the whole collection, then override individual rows, and the
//! two stay reconciled as pages load on demand.

pub mod api;
pub mod cache;
pub mod error;
pub mod model;
pub mod pager;
pub mod select;
pub mod view;

pub use error::Error;
