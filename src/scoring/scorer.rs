// src/scoring/scorer.rs

use std::collections::HashSet;

use serde::Serialize;

use super::{
    answers::SubmittedAnswers,
    question::{Question, QuestionKind},
};

/// Verdict for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOutcome {
    pub question_id: i64,
    /// The submitted answer as received, empty when unanswered.
    pub answer: String,
    /// `None` while an essay is waiting for manual grading.
    pub correct: Option<bool>,
    pub points_earned: u32,
    pub max_points: u32,
}

/// Result of scoring one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoringResult {
    pub outcomes: Vec<QuestionOutcome>,
    pub score: u64,
    pub total_points: u64,
    /// Answered question ids that are not part of the assignment, ascending.
    /// They are not scored.
    pub ignored_answers: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 90.0 => LetterGrade::A,
            p if p >= 80.0 => LetterGrade::B,
            p if p >= 70.0 => LetterGrade::C,
            p if p >= 60.0 => LetterGrade::D,
            _ => LetterGrade::F,
        }
    }
}

/// `part / whole * 100` rounded to two decimals, `0.0` when `whole` is zero.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_2dp(part as f64 / whole as f64 * 100.0)
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl ScoringResult {
    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.total_points)
    }

    pub fn grade(&self) -> LetterGrade {
        if self.total_points == 0 {
            return LetterGrade::F;
        }
        LetterGrade::from_percentage(self.score as f64 / self.total_points as f64 * 100.0)
    }

    /// Essays still waiting for a teacher.
    pub fn pending_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.correct.is_none()).count()
    }
}

/// Scores a submission against an assignment's questions.
///
/// Questions are scored independently and accumulated in the given order.
/// Answers for questions outside `questions` are skipped and listed in
/// `ignored_answers`.
pub fn score(questions: &[Question], submitted: &SubmittedAnswers) -> ScoringResult {
    let known: HashSet<i64> = questions.iter().map(|q| q.id).collect();
    let mut ignored_answers: Vec<i64> = submitted
        .question_ids()
        .filter(|id| !known.contains(id))
        .collect();
    ignored_answers.sort_unstable();

    let mut outcomes = Vec::with_capacity(questions.len());
    let mut score: u64 = 0;
    let mut total_points: u64 = 0;

    for question in questions {
        let answer = submitted.get(question.id);
        let correct = match question.kind {
            QuestionKind::Essay => None,
            _ => Some(answer.is_some_and(|a| is_correct(question, a))),
        };
        let points_earned = if correct == Some(true) {
            question.points
        } else {
            0
        };

        score += u64::from(points_earned);
        total_points += u64::from(question.points);
        outcomes.push(QuestionOutcome {
            question_id: question.id,
            answer: answer.unwrap_or_default().to_string(),
            correct,
            points_earned,
            max_points: question.points,
        });
    }

    ScoringResult {
        outcomes,
        score,
        total_points,
        ignored_answers,
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Applies the matching rule for the question's kind to a non-empty answer.
fn is_correct(question: &Question, answer: &str) -> bool {
    let accepted = &question.accepted_answers;

    match question.kind {
        QuestionKind::MultipleChoice => accepted.iter().any(|a| a == answer),
        QuestionKind::Identification | QuestionKind::ProblemSolving => accepted
            .first()
            .is_some_and(|a| normalize(a) == normalize(answer)),
        // One free-text answer checked against a set, not a list of items.
        QuestionKind::Enumeration => {
            let answer = normalize(answer);
            accepted.iter().any(|a| normalize(a) == answer)
        }
        QuestionKind::FillInTheBlanks => {
            if accepted.is_empty() {
                return false;
            }
            let parts: Vec<String> = answer.split('|').map(normalize).collect();
            parts.len() == accepted.len()
                && parts.iter().zip(accepted).all(|(p, a)| *p == normalize(a))
        }
        QuestionKind::YesNo => accepted.first().is_some_and(|a| a.trim() == answer.trim()),
        QuestionKind::Essay => false,
    }
}
