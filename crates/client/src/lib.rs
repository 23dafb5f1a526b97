//! Client code for gridpick.
//!
//! This crate provides the image search provider client, the thumbnail fetch
//! pipeline, grid rendering and the search orchestrator used by the server.

pub mod fetch;
pub mod provider;
pub mod render;
pub mod search;

pub use fetch::{FetchClient, FetchConfig, ThumbnailFetcher};
pub use provider::{ImageFilter, ImageQuery, ImageSearchClient, ImageSource, ProviderConfig, ProviderError};
pub use render::GridRenderer;
pub use search::{Finder, Listing, NextPage, dedupe};
