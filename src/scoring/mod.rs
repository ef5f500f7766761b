// src/scoring/mod.rs

//! Assignment scoring and leaderboard aggregation.
//!
//! Everything in here is a pure function of its arguments: no database access,
//! no configuration lookups. Handlers load the data, call in, and persist the
//! results.

pub mod answers;
pub mod leaderboard;
pub mod question;
pub mod scorer;

pub use answers::SubmittedAnswers;
pub use leaderboard::{LeaderboardEntry, SubmissionSummary, award_points, leaderboard};
pub use question::{Question, QuestionKind};
pub use scorer::{LetterGrade, QuestionOutcome, ScoringResult, score};
