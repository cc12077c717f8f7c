//! Multiple-choice quiz engine.
//!
//! A [`Quiz`] walks a validated [`QuestionBank`] one question at a time.
//! Each question accepts exactly one answer; after the last question the quiz
//! shows the final score until it is restarted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    /// The bank file could not be read.
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    /// The bank file is not valid YAML for a question list.
    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The bank has no questions.
    #[error("question bank is empty")]
    EmptyBank,

    /// A question violates the bank rules.
    #[error("question {number} is invalid: {reason}")]
    InvalidQuestion { number: usize, reason: &'static str },

    /// An answer was already chosen for the current question.
    #[error("question already answered")]
    AlreadyAnswered,

    /// Advancing requires answering the current question first.
    #[error("answer the current question first")]
    NotAnswered,

    /// The chosen answer index does not exist.
    #[error("answer {0} does not exist")]
    AnswerOutOfRange(usize),

    /// The quiz is over; restart to play again.
    #[error("quiz is finished")]
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub answers: Vec<Answer>,
}

impl Question {
    fn new(prompt: &str, answers: &[&str], correct: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            answers: answers
                .iter()
                .enumerate()
                .map(|(i, text)| Answer {
                    text: (*text).to_string(),
                    correct: i == correct,
                })
                .collect(),
        }
    }

    fn correct_index(&self) -> Option<usize> {
        self.answers.iter().position(|a| a.correct)
    }
}

/// A validated list of questions.
///
/// Every question has a non-empty prompt, at least two answers, and exactly
/// one correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Validate a list of questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyBank` or `QuizError::InvalidQuestion`.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyBank);
        }

        for (i, q) in questions.iter().enumerate() {
            let number = i + 1;
            if q.prompt.trim().is_empty() {
                return Err(QuizError::InvalidQuestion {
                    number,
                    reason: "prompt is empty",
                });
            }
            if q.answers.len() < 2 {
                return Err(QuizError::InvalidQuestion {
                    number,
                    reason: "needs at least two answers",
                });
            }
            if q.answers.iter().filter(|a| a.correct).count() != 1 {
                return Err(QuizError::InvalidQuestion {
                    number,
                    reason: "needs exactly one correct answer",
                });
            }
        }

        Ok(Self { questions })
    }

    /// Parse and validate a YAML list of questions.
    ///
    /// ```yaml
    /// - prompt: "Which keyword declares an immutable binding?"
    ///   answers:
    ///     - { text: "let", correct: true }
    ///     - { text: "mut" }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Parse` on malformed YAML, or a validation error.
    pub fn from_yaml(yaml: &str) -> Result<Self, QuizError> {
        let questions: Vec<Question> = serde_yaml::from_str(yaml)?;
        Self::new(questions)
    }

    /// Read a YAML bank from disk.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Io` if the file cannot be read, otherwise as
    /// [`QuestionBank::from_yaml`].
    pub fn from_path(path: &Path) -> Result<Self, QuizError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// The bank used when none is configured.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            questions: vec![
                Question::new(
                    "Which HTML element embeds a stylesheet directly in the page?",
                    &["<script>", "<style>", "<css>", "<link>"],
                    1,
                ),
                Question::new(
                    "Which of these is not a valid CSS position value?",
                    &["static", "fixed", "sticky", "float"],
                    3,
                ),
                Question::new(
                    "What does the CSS z-index property control?",
                    &[
                        "Element size",
                        "Stacking order of overlapping elements",
                        "Element opacity",
                        "Element visibility",
                    ],
                    1,
                ),
                Question::new(
                    "Which DOM method looks up a single element by its id?",
                    &[
                        "querySelectorAll()",
                        "getElementsByClassName()",
                        "getElementById()",
                        "getElementsByTagName()",
                    ],
                    2,
                ),
                Question::new(
                    "What is flexbox mainly used for?",
                    &[
                        "Animations",
                        "Aligning and distributing items",
                        "Network requests",
                        "Handling input events",
                    ],
                    1,
                ),
            ],
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a validated bank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Feedback for a selected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub selected: usize,
    pub correct_index: usize,
}

/// What the quiz currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuizView {
    Question {
        /// 1-based position.
        number: usize,
        total: usize,
        prompt: String,
        answers: Vec<String>,
        /// Present once the question has been answered.
        outcome: Option<AnswerOutcome>,
    },
    Score {
        score: u32,
        total: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Asking { outcome: Option<AnswerOutcome> },
    Finished,
}

/// Quiz progress over a question bank.
#[derive(Debug, Clone)]
pub struct Quiz {
    bank: QuestionBank,
    index: usize,
    score: u32,
    state: State,
}

impl Quiz {
    /// Start at the first question with a zero score.
    #[must_use]
    pub const fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            index: 0,
            score: 0,
            state: State::Asking { outcome: None },
        }
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.state, State::Finished)
    }

    /// Go back to the first question and reset the score.
    pub fn restart(&mut self) {
        self.index = 0;
        self.score = 0;
        self.state = State::Asking { outcome: None };
    }

    /// Choose an answer for the current question. Only the first choice
    /// counts; answers are locked afterwards.
    ///
    /// # Errors
    ///
    /// Returns `Finished`, `AlreadyAnswered`, or `AnswerOutOfRange`.
    pub fn select_answer(&mut self, selected: usize) -> Result<AnswerOutcome, QuizError> {
        let State::Asking { outcome } = self.state else {
            return Err(QuizError::Finished);
        };
        if outcome.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }

        let question = self
            .bank
            .questions
            .get(self.index)
            .ok_or(QuizError::Finished)?;
        if selected >= question.answers.len() {
            return Err(QuizError::AnswerOutOfRange(selected));
        }
        let correct_index = question
            .correct_index()
            .ok_or(QuizError::InvalidQuestion {
                number: self.index + 1,
                reason: "needs exactly one correct answer",
            })?;

        let result = AnswerOutcome {
            correct: selected == correct_index,
            selected,
            correct_index,
        };
        if result.correct {
            self.score += 1;
        }
        self.state = State::Asking {
            outcome: Some(result),
        };
        Ok(result)
    }

    /// Advance past an answered question. On the score screen this starts a
    /// new round.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswered` if the current question is unanswered.
    pub fn next(&mut self) -> Result<QuizView, QuizError> {
        match self.state {
            State::Finished => self.restart(),
            State::Asking { outcome: None } => return Err(QuizError::NotAnswered),
            State::Asking { outcome: Some(_) } => {
                self.index += 1;
                self.state = if self.index < self.bank.len() {
                    State::Asking { outcome: None }
                } else {
                    State::Finished
                };
            }
        }
        Ok(self.view())
    }

    /// Snapshot of the current screen.
    #[must_use]
    pub fn view(&self) -> QuizView {
        match (self.state, self.bank.questions.get(self.index)) {
            (State::Asking { outcome }, Some(q)) => QuizView::Question {
                number: self.index + 1,
                total: self.bank.len(),
                prompt: q.prompt.clone(),
                answers: q.answers.iter().map(|a| a.text.clone()).collect(),
                outcome,
            },
            _ => QuizView::Score {
                score: self.score,
                total: self.bank.len(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TWO_QUESTIONS: &str = r#"
- prompt: "Which keyword declares an immutable binding?"
  answers:
    - { text: "let", correct: true }
    - { text: "mut" }
- prompt: "Which type owns a growable string?"
  answers:
    - { text: "&str" }
    - { text: "String", correct: true }
    - { text: "char" }
"#;

    fn quiz() -> Quiz {
        Quiz::new(QuestionBank::from_yaml(TWO_QUESTIONS).unwrap())
    }

    #[test]
    fn test_builtin_bank_is_valid() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 5);
        assert!(QuestionBank::new(bank.questions().to_vec()).is_ok());
    }

    #[test]
    fn test_bank_validation() {
        assert!(matches!(QuestionBank::new(vec![]), Err(QuizError::EmptyBank)));

        let no_correct = "- prompt: q\n  answers: [{text: a}, {text: b}]\n";
        assert!(matches!(
            QuestionBank::from_yaml(no_correct),
            Err(QuizError::InvalidQuestion { number: 1, .. })
        ));

        let two_correct =
            "- prompt: q\n  answers: [{text: a, correct: true}, {text: b, correct: true}]\n";
        assert!(matches!(
            QuestionBank::from_yaml(two_correct),
            Err(QuizError::InvalidQuestion { .. })
        ));

        let one_answer = "- prompt: q\n  answers: [{text: a, correct: true}]\n";
        assert!(matches!(
            QuestionBank::from_yaml(one_answer),
            Err(QuizError::InvalidQuestion { .. })
        ));

        assert!(matches!(
            QuestionBank::from_yaml("{not: [a list"),
            Err(QuizError::Parse(_))
        ));
    }

    #[test]
    fn test_full_round() {
        let mut quiz = quiz();
        let QuizView::Question { number, total, .. } = quiz.view() else {
            panic!("expected a question");
        };
        assert_eq!((number, total), (1, 2));

        let outcome = quiz.select_answer(0).unwrap();
        assert!(outcome.correct);
        quiz.next().unwrap();

        let outcome = quiz.select_answer(0).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.correct_index, 1);

        assert_eq!(quiz.next().unwrap(), QuizView::Score { score: 1, total: 2 });
        assert!(quiz.is_finished());
    }

    #[test]
    fn test_answer_locks_question() {
        let mut quiz = quiz();
        quiz.select_answer(1).unwrap();
        assert!(matches!(quiz.select_answer(0), Err(QuizError::AlreadyAnswered)));
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn test_next_requires_answer() {
        let mut quiz = quiz();
        assert!(matches!(quiz.next(), Err(QuizError::NotAnswered)));
    }

    #[test]
    fn test_out_of_range_answer() {
        let mut quiz = quiz();
        assert!(matches!(quiz.select_answer(2), Err(QuizError::AnswerOutOfRange(2))));
        assert!(quiz.select_answer(0).is_ok());
    }

    #[test]
    fn test_next_on_score_screen_restarts() {
        let mut quiz = quiz();
        for _ in 0..2 {
            quiz.select_answer(1).unwrap();
            quiz.next().unwrap();
        }
        assert!(matches!(quiz.select_answer(0), Err(QuizError::Finished)));

        let view = quiz.next().unwrap();
        assert!(matches!(view, QuizView::Question { number: 1, outcome: None, .. }));
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn test_view_serializes_with_state_tag() {
        let json = serde_json::to_value(quiz().view()).unwrap();
        assert_eq!(json["state"], "question");
        assert_eq!(json["answers"][1], "mut");
    }
}
