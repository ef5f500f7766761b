// src/handlers/mod.rs

pub mod assignment;
pub mod leaderboard;
pub mod submission;
