//! Mentorship projects offered to mentees.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Error, ProjectId, UserId};

/// Lifecycle of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Open for applications.
    Available,
    /// Mentees are working on it.
    InProgress,
    /// Work is finished.
    Completed,
    /// Final work is under review.
    Review,
}

impl ProjectStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 4] = [Self::Available, Self::InProgress, Self::Completed, Self::Review];
}

/// Row of the `projects` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    #[schema(value_type = String)]
    pub mentor_id: UserId,
    pub tech_stack: Vec<String>,
    pub deadline: Option<NaiveDate>,
    pub status: ProjectStatus,
}

/// Validated input for creating a project.
///
/// ## Invariants
/// - `title` and `description` are trimmed and non-empty.
/// - `tech_stack` holds at least one trimmed, non-empty entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    title: String,
    description: String,
    mentor_id: UserId,
    tech_stack: Vec<String>,
    deadline: NaiveDate,
    status: ProjectStatus,
}

impl NewProject {
    /// Validate raw project fields.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{NewProject, ProjectStatus, UserId};
    /// use chrono::NaiveDate;
    ///
    /// let project = NewProject::try_new(
    ///     "Task Management App",
    ///     "Drag and drop task board",
    ///     UserId::random(),
    ///     vec!["React".into(), " Redux ".into(), "".into()],
    ///     NaiveDate::from_ymd_opt(2025, 7, 20).expect("date"),
    ///     ProjectStatus::Available,
    /// )
    /// .expect("valid project");
    /// assert_eq!(project.tech_stack(), ["React", "Redux"]);
    /// ```
    pub fn try_new(
        title: &str,
        description: &str,
        mentor_id: UserId,
        tech_stack: Vec<String>,
        deadline: NaiveDate,
        status: ProjectStatus,
    ) -> Result<Self, Error> {
        let title = required_text(title, "title")?;
        let description = required_text(description, "description")?;
        let tech_stack: Vec<String> = tech_stack
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(str::to_owned)
            .collect();
        if tech_stack.is_empty() {
            return Err(missing_field("techStack"));
        }
        Ok(Self {
            title,
            description,
            mentor_id,
            tech_stack,
            deadline,
            status,
        })
    }

    /// Mentor that will own the project.
    pub fn mentor_id(&self) -> &UserId {
        &self.mentor_id
    }

    /// Normalised technology list.
    pub fn tech_stack(&self) -> &[String] {
        &self.tech_stack
    }

    /// Materialise the row with a fresh identifier.
    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            mentor_id: self.mentor_id,
            tech_stack: self.tech_stack,
            deadline: Some(self.deadline),
            status: self.status,
        }
    }
}

pub(crate) fn required_text(value: &str, field: &'static str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(missing_field(field));
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn missing_field(field: &'static str) -> Error {
    Error::invalid_request(format!("{field} is required"))
        .with_details(serde_json::json!({ "field": field, "code": "missing_field" }))
}
