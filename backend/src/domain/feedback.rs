//! Mentor feedback on submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::project::{missing_field, required_text};
use super::{Error, FeedbackId, SubmissionId, UserId};

/// Star rating between one and five inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "u8", into = "u8")]
#[schema(value_type = u8)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a rating.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Rating;
    ///
    /// assert_eq!(Rating::new(4).map(|r| r.get()), Ok(4));
    /// assert!(Rating::new(0).is_err());
    /// assert!(Rating::new(6).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError(value))
        }
    }

    /// Numeric value.
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Rating outside `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingError(pub u8);

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Row of the `feedback` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: FeedbackId,
    pub submission_id: SubmissionId,
    #[schema(value_type = String)]
    pub mentor_id: UserId,
    pub comment: String,
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
}

/// Validated feedback input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    submission_id: SubmissionId,
    mentor_id: UserId,
    comment: String,
    rating: Rating,
}

impl NewFeedback {
    /// Validate the comment and rating.
    pub fn try_new(
        submission_id: SubmissionId,
        mentor_id: UserId,
        comment: &str,
        rating: Option<u8>,
    ) -> Result<Self, Error> {
        let comment = required_text(comment, "comment")?;
        let rating = rating
            .ok_or_else(|| missing_field("rating"))
            .and_then(|raw| {
                Rating::new(raw).map_err(|err| {
                    Error::invalid_request(err.to_string()).with_details(
                        serde_json::json!({ "field": "rating", "code": "out_of_range" }),
                    )
                })
            })?;
        Ok(Self {
            submission_id,
            mentor_id,
            comment,
            rating,
        })
    }

    /// Submission the feedback targets.
    pub fn submission_id(&self) -> SubmissionId {
        self.submission_id
    }

    /// Materialise the row.
    pub fn into_feedback(self, id: FeedbackId, created_at: DateTime<Utc>) -> Feedback {
        Feedback {
            id,
            submission_id: self.submission_id,
            mentor_id: self.mentor_id,
            comment: self.comment,
            rating: self.rating,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn detail_code(err: &Error) -> Option<&str> {
        err.details().and_then(|d| d.get("code")).and_then(|c| c.as_str())
    }

    #[rstest]
    #[case("", Some(4), "missing_field")]
    #[case("Nice", None, "missing_field")]
    #[case("Nice", Some(0), "out_of_range")]
    #[case("Nice", Some(6), "out_of_range")]
    fn rejects_invalid_feedback(
        #[case] comment: &str,
        #[case] rating: Option<u8>,
        #[case] code: &str,
    ) {
        let err = NewFeedback::try_new(SubmissionId::random(), UserId::random(), comment, rating)
            .expect_err("invalid feedback");
        assert_eq!(detail_code(&err), Some(code));
    }

    #[rstest]
    fn rating_deserialisation_is_validated() {
        assert!(serde_json::from_str::<Rating>("5").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }
}
