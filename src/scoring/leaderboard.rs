// src/scoring/leaderboard.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::scorer::percentage;

/// One stored submission, as read for leaderboard aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub student_id: i64,
    pub student_name: String,
    pub score: i64,
    pub total_points: i64,
}

/// A student's row on a class leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub student_id: i64,
    pub name: String,
    pub total_score: i64,
    pub total_possible: i64,
    pub percentage: f64,
    pub assignments_completed: u32,
}

/// Gamification points for a raw score.
///
/// Rounds half away from zero, so `award_points(7, 1.5) == 11`. A negative or
/// non-finite product awards nothing.
pub fn award_points(raw_score: u64, multiplier: f64) -> u64 {
    let product = (raw_score as f64 * multiplier).round();
    if !product.is_finite() || product <= 0.0 {
        return 0;
    }
    // `as` saturates at u64::MAX.
    product as u64
}

/// Builds a ranked class leaderboard from the full submission history.
///
/// Students are ordered by cumulative score, highest first. Ties keep the
/// order in which students first appear in `submissions`, and ranks are plain
/// positions. `top_n` below 1 is treated as 1.
pub fn leaderboard(submissions: &[SubmissionSummary], top_n: i64) -> Vec<LeaderboardEntry> {
    struct Tally<'a> {
        student_id: i64,
        name: &'a str,
        score: i64,
        possible: i64,
        completed: u32,
    }

    let mut tallies: Vec<Tally<'_>> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for submission in submissions {
        let slot = *index.entry(submission.student_id).or_insert_with(|| {
            tallies.push(Tally {
                student_id: submission.student_id,
                name: &submission.student_name,
                score: 0,
                possible: 0,
                completed: 0,
            });
            tallies.len() - 1
        });
        let tally = &mut tallies[slot];
        tally.score += submission.score;
        tally.possible += submission.total_points;
        tally.completed += 1;
    }

    // Stable sort: equal scores stay in first-seen order.
    tallies.sort_by(|a, b| b.score.cmp(&a.score));

    let limit = usize::try_from(top_n.max(1)).unwrap_or(usize::MAX);

    tallies
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(position, tally)| LeaderboardEntry {
            rank: position + 1,
            student_id: tally.student_id,
            name: tally.name.to_string(),
            total_score: tally.score,
            total_possible: tally.possible,
            percentage: ratio_percentage(tally.score, tally.possible),
            assignments_completed: tally.completed,
        })
        .collect()
}

fn ratio_percentage(score: i64, possible: i64) -> f64 {
    match (u64::try_from(score), u64::try_from(possible)) {
        (Ok(score), Ok(possible)) => percentage(score, possible),
        _ => 0.0,
    }
}
