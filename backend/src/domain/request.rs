//! Mentee applications to join a project.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ProjectId, RequestId, UserId};

/// Decision state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Whether the application still blocks a repeat application.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

/// Row of the `project_requests` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub id: RequestId,
    #[schema(value_type = String)]
    pub mentee_id: UserId,
    pub project_id: ProjectId,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Ordering applied to a mentor's request list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestSort {
    /// Most recent first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Student name ascending.
    Az,
    /// Student name descending.
    Za,
}

impl RequestSort {
    /// Sort `items` in place.
    ///
    /// Name comparisons are case-insensitive; ties fall back to the creation
    /// time so the order is stable across calls.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::RequestSort;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let mut rows = vec![
    ///     ("emily", Utc.with_ymd_and_hms(2025, 4, 8, 14, 20, 0).unwrap()),
    ///     ("John", Utc.with_ymd_and_hms(2025, 4, 5, 9, 30, 0).unwrap()),
    /// ];
    /// RequestSort::Za.sort(&mut rows, |row| row.0, |row| row.1);
    /// assert_eq!(rows[0].0, "John");
    /// ```
    pub fn sort<T>(
        self,
        items: &mut [T],
        name: impl Fn(&T) -> &str,
        created_at: impl Fn(&T) -> DateTime<Utc>,
    ) {
        let by_name = |a: &T, b: &T| -> Ordering {
            name(a)
                .to_lowercase()
                .cmp(&name(b).to_lowercase())
                .then_with(|| created_at(a).cmp(&created_at(b)))
        };
        match self {
            Self::Newest => items.sort_by_key(|item| std::cmp::Reverse(created_at(item))),
            Self::Oldest => items.sort_by_key(|item| created_at(item)),
            Self::Az => items.sort_by(by_name),
            Self::Za => items.sort_by(|a, b| by_name(b, a)),
        }
    }
}
