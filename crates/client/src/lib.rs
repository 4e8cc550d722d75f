//! Retrieval client for c2pa-docs.
//!
//! This crate provides the HTTP fetch pipeline, the lazily built
//! specification index, the lexical ranker, and the GitHub repository
//! contents accessor shared by the server.

pub mod fetch;
pub mod github;
pub mod index;
pub mod rank;

pub use fetch::{ALLOWED_HOSTS, FetchClient, FetchConfig};
pub use github::{DirectoryListing, EntryInfo, FileContent, RepoEntry, RepoKey};
pub use index::{Chunk, SpecIndex, spec_html_url};
pub use rank::{MAX_MATCHES, MAX_SNIPPET_CHARS, RankConfig, rank, score, snippet};
