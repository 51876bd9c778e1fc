//! Chapters module - one assembler per book chapter
//!
//! Each assembler composes the loader primitives into the fixed-shape
//! bundle of datasets its chapter's charts consume. Calls share no state;
//! every invocation re-reads and re-fetches from scratch.

pub mod introduction;
pub mod markov;
pub mod production;

pub use introduction::IntroductionData;
pub use markov::MarkovChainsData;
pub use production::{ProductionData, SectorAccounts};

/// Placeholder for chapters that have no chart data.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyChapter;
