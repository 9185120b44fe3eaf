//! Project tests written by mentors and taken by mentees.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::project::{missing_field, required_text};
use super::{Error, ProjectId, TestId, UserId};

/// Question kinds supported by the test creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Question {
    /// Pick one of several options.
    #[serde(rename_all = "camelCase")]
    MultipleChoice {
        prompt: String,
        options: Vec<String>,
        correct_option: usize,
    },
    /// Answer true or false.
    TrueFalse { prompt: String, answer: bool },
    /// Free text, optionally with an expected answer for auto-marking.
    #[serde(rename_all = "camelCase")]
    Text {
        prompt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expected_answer: Option<String>,
    },
}

impl Question {
    /// Validate a question; `index` is used in error details.
    pub fn validate(self, index: usize) -> Result<Self, Error> {
        let invalid = |message: &str, code: &str| {
            Error::invalid_request(format!("question {}: {message}", index + 1)).with_details(
                serde_json::json!({ "field": "questions", "index": index, "code": code }),
            )
        };
        let missing_prompt = || invalid("prompt is required", "missing_prompt");
        match self {
            Self::MultipleChoice {
                prompt,
                options,
                correct_option,
            } => {
                let prompt = trimmed_prompt(&prompt).ok_or_else(missing_prompt)?;
                let options: Vec<String> = options.iter().map(|o| o.trim().to_owned()).collect();
                if options.len() < 2 || options.iter().any(String::is_empty) {
                    return Err(invalid("at least two non-empty options are required", "invalid_options"));
                }
                if correct_option >= options.len() {
                    return Err(invalid("correct option is out of range", "invalid_correct_option"));
                }
                Ok(Self::MultipleChoice {
                    prompt,
                    options,
                    correct_option,
                })
            }
            Self::TrueFalse { prompt, answer } => {
                let prompt = trimmed_prompt(&prompt).ok_or_else(missing_prompt)?;
                Ok(Self::TrueFalse { prompt, answer })
            }
            Self::Text {
                prompt,
                expected_answer,
            } => {
                let prompt = trimmed_prompt(&prompt).ok_or_else(missing_prompt)?;
                Ok(Self::Text {
                    prompt,
                    expected_answer: expected_answer.as_deref().and_then(trimmed_prompt),
                })
            }
        }
    }

    /// Question as shown to a mentee, with answers removed.
    pub fn public_view(&self) -> PublicQuestion {
        match self {
            Self::MultipleChoice {
                prompt, options, ..
            } => PublicQuestion::MultipleChoice {
                prompt: prompt.clone(),
                options: options.clone(),
            },
            Self::TrueFalse { prompt, .. } => PublicQuestion::TrueFalse {
                prompt: prompt.clone(),
            },
            Self::Text { prompt, .. } => PublicQuestion::Text {
                prompt: prompt.clone(),
            },
        }
    }

    /// Mark an answer. `None` means the question cannot be auto-marked.
    fn mark(&self, answer: Option<&Answer>) -> Option<bool> {
        match (self, answer) {
            (Self::Text { expected_answer: None, .. }, _) => None,
            (Self::MultipleChoice { correct_option, .. }, Some(Answer::Choice(choice))) => {
                Some(choice == correct_option)
            }
            (Self::TrueFalse { answer, .. }, Some(Answer::Bool(given))) => Some(answer == given),
            (Self::Text { expected_answer: Some(expected), .. }, Some(Answer::Text(given))) => {
                Some(expected.trim().eq_ignore_ascii_case(given.trim()))
            }
            _ => Some(false),
        }
    }
}

fn trimmed_prompt(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Answer-free question shape returned to mentees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PublicQuestion {
    MultipleChoice { prompt: String, options: Vec<String> },
    TrueFalse { prompt: String },
    Text { prompt: String },
}

/// A mentee's answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Answer {
    Choice(usize),
    Bool(bool),
    Text(String),
}

/// Row of the `project_tests` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTest {
    pub id: TestId,
    pub project_id: ProjectId,
    #[schema(value_type = String)]
    pub mentor_id: UserId,
    pub title: String,
    pub questions: Vec<Question>,
}

impl ProjectTest {
    /// Score an attempt; answers are matched to questions by position.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Answer, ProjectId, ProjectTest, Question, TestId, UserId};
    ///
    /// let test = ProjectTest {
    ///     id: TestId::random(),
    ///     project_id: ProjectId::random(),
    ///     mentor_id: UserId::random(),
    ///     title: "Basics".into(),
    ///     questions: vec![Question::TrueFalse { prompt: "Rust has a GC".into(), answer: false }],
    /// };
    /// let score = test.score(&[Answer::Bool(false)]);
    /// assert_eq!((score.correct, score.gradable), (1, 1));
    /// ```
    pub fn score(&self, answers: &[Answer]) -> TestScore {
        let marks: Vec<Option<bool>> = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| question.mark(answers.get(index)))
            .collect();
        TestScore {
            total: self.questions.len(),
            gradable: marks.iter().filter(|mark| mark.is_some()).count(),
            correct: marks.iter().filter(|mark| **mark == Some(true)).count(),
        }
    }
}

/// Result of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestScore {
    /// Questions answered correctly.
    pub correct: usize,
    /// Questions that can be auto-marked.
    pub gradable: usize,
    /// Questions in the test.
    pub total: usize,
}

/// Validated test definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectTest {
    project_id: ProjectId,
    mentor_id: UserId,
    title: String,
    questions: Vec<Question>,
}

impl NewProjectTest {
    /// Validate the title and every question.
    pub fn try_new(
        project_id: ProjectId,
        mentor_id: UserId,
        title: &str,
        questions: Vec<Question>,
    ) -> Result<Self, Error> {
        let title = required_text(title, "title")?;
        if questions.is_empty() {
            return Err(missing_field("questions"));
        }
        let questions = questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| question.validate(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            project_id,
            mentor_id,
            title,
            questions,
        })
    }

    /// Project the test belongs to.
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Materialise the row.
    pub fn into_test(self, id: TestId) -> ProjectTest {
        ProjectTest {
            id,
            project_id: self.project_id,
            mentor_id: self.mentor_id,
            title: self.title,
            questions: self.questions,
        }
    }
}
