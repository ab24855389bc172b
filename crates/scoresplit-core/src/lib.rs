//! Scoresplit Core Library
//!
//! Splits a student's exam total across named subjects: integer scores
//! that sum to the total, respect per-subject floors and caps, follow
//! subject weights, and vary plausibly from student to student.
//!
//! The [`allocator`] module is the whole algorithm; the rest reads rosters,
//! picks seeds, and renders results around it.

pub mod allocator;
pub mod batch;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod records;
pub mod report;
pub mod roster;
pub mod seed;
