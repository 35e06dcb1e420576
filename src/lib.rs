//! # webwords
//!
//! Highlight the vocabulary on a page by how well you know each word, and
//! keep those learning statuses in a Fieldbook sheet.
//!
//! Words are normalized and deduplicated into a per-session dictionary
//! ([`webwords_core::WordRegistry`]). Every occurrence on the page is tagged
//! with class `L2` plus one of `known`, `unknown`, or `unverified`, and the
//! statuses are read from and written back to Fieldbook over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌────────────┐
//! │   Page   │──▶│ WordRegistry │──▶│  project() │──▶ highlighted HTML
//! │ (tokens) │   │  (core)      │   │ L2 + class │
//! └──────────┘   └──────┬───────┘   └────────────┘
//!                       │ pull / push
//!                       ▼
//!               ┌────────────────┐
//!               │ FieldbookClient│──▶ Fieldbook REST API
//!               └────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! ww check                          # show settings and credential status
//! ww scan article.txt --out a.html  # highlight a page
//! ww words --status unknown         # list words still to learn
//! ww mark serendipity known         # record progress
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`fieldbook`] | Fieldbook REST client |
//! | [`page`] | Page tokenization and HTML rendering |
//! | [`progress`] | Sync progress on stderr |
//! | [`scan`] | `ww scan` |
//! | [`words`] | `ww words` / `ww mark` |
//! | [`check`] | `ww check` |

pub mod check;
pub mod config;
pub mod fieldbook;
pub mod page;
pub mod progress;
pub mod scan;
pub mod words;
