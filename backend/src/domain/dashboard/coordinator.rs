//! Coordinator pages: the whole programme.

use tracing::info;

use super::drafts::ProjectDraft;
use super::views::{
    Analytics, CoordinatorOverview, FeedbackView, ProjectView, SubmissionView,
};
use super::{DashboardPorts, Directory, by_id, or_empty};
use crate::domain::project::missing_field;
use crate::domain::{Error, Feedback, NewProject, ProjectId, ProjectStatus, Role};

const RECENT_PROJECTS: usize = 4;

/// Data behind the coordinator pages.
#[derive(Clone)]
pub struct CoordinatorDashboard {
    ports: DashboardPorts,
}

impl CoordinatorDashboard {
    /// Build the service over shared ports.
    pub fn new(ports: DashboardPorts) -> Self {
        Self { ports }
    }

    /// Programme-wide counts and the latest projects.
    pub async fn overview(&self) -> CoordinatorOverview {
        let profiles = or_empty(self.ports.profiles.list(None).await, "profiles");
        let submissions = or_empty(self.ports.submissions.list().await, "submissions");
        let directory = Directory::load(&self.ports).await;
        let projects = or_empty(self.ports.projects.list().await, "projects");
        CoordinatorOverview {
            projects: projects.len(),
            mentees: profiles.iter().filter(|p| p.role() == Role::Mentee).count(),
            mentors: profiles.iter().filter(|p| p.role() == Role::Mentor).count(),
            submissions: submissions.len(),
            recent_projects: projects
                .into_iter()
                .rev()
                .take(RECENT_PROJECTS)
                .map(|project| directory.project_view(project))
                .collect(),
        }
    }

    /// Every project.
    pub async fn projects(&self) -> Vec<ProjectView> {
        let directory = Directory::load(&self.ports).await;
        or_empty(self.ports.projects.list().await, "projects")
            .into_iter()
            .map(|project| directory.project_view(project))
            .collect()
    }

    /// Create a project owned by a mentor.
    ///
    /// # Errors
    /// `invalid_request` when a required field is missing or the named
    /// profile is absent or not a mentor.
    pub async fn create_project(&self, draft: ProjectDraft) -> Result<ProjectView, Error> {
        let mentor_id = draft.mentor()?;
        let deadline = draft.deadline.ok_or_else(|| missing_field("deadline"))?;
        let new_project = NewProject::try_new(
            &draft.title,
            &draft.description,
            mentor_id,
            draft.tech_stack,
            deadline,
            draft.status.unwrap_or(ProjectStatus::Available),
        )?;
        let mentor = self.ports.profiles.find_by_id(new_project.mentor_id()).await?;
        if mentor.is_none_or(|profile| profile.role() != Role::Mentor) {
            return Err(Error::invalid_request("mentorId must name a mentor")
                .with_details(serde_json::json!({ "field": "mentorId", "code": "not_a_mentor" })));
        }
        let project = new_project.into_project(ProjectId::random());
        self.ports.projects.insert(&project).await?;
        info!(project_id = %project.id, mentor_id = %project.mentor_id, "project created");
        Ok(Directory::load(&self.ports).await.project_view(project))
    }

    /// Remove a project.
    ///
    /// # Errors
    /// `not_found` when no such project exists.
    pub async fn delete_project(&self, project_id: ProjectId) -> Result<(), Error> {
        if !self.ports.projects.delete(project_id).await? {
            return Err(Error::not_found(format!("project {project_id} not found")));
        }
        info!(%project_id, "project deleted");
        Ok(())
    }

    /// Every submission, newest first.
    pub async fn submissions(&self) -> Vec<SubmissionView> {
        let directory = Directory::load(&self.ports).await;
        or_empty(self.ports.submissions.list().await, "submissions")
            .into_iter()
            .map(|row| directory.submission_view(row))
            .collect()
    }

    /// Every feedback entry, newest first.
    pub async fn feedback(&self) -> Vec<FeedbackView> {
        let feedback = or_empty(self.ports.feedback.list().await, "feedback");
        let submissions = by_id(or_empty(self.ports.submissions.list().await, "submissions"));
        let directory = Directory::load(&self.ports).await;
        feedback
            .into_iter()
            .map(|row| directory.feedback_view(row, &submissions))
            .collect()
    }

    /// Status breakdowns and rating average.
    pub async fn analytics(&self) -> Analytics {
        let projects = or_empty(self.ports.projects.list().await, "projects");
        let submissions = or_empty(self.ports.submissions.list().await, "submissions");
        let requests = or_empty(self.ports.requests.list().await, "project_requests");
        let feedback = or_empty(self.ports.feedback.list().await, "feedback");
        let average_rating = average_rating(&feedback);
        Analytics {
            projects: projects.iter().map(|row| &row.status).collect(),
            submissions: submissions.iter().map(|row| &row.status).collect(),
            requests: requests.iter().map(|row| &row.status).collect(),
            feedback_count: feedback.len(),
            average_rating,
        }
    }
}

/// Mean rating rounded to two decimals; `None` without feedback.
fn average_rating(feedback: &[Feedback]) -> Option<f64> {
    let count = u32::try_from(feedback.len()).ok().filter(|count| *count > 0)?;
    let total: u32 = feedback.iter().map(|row| u32::from(row.rating.get())).sum();
    let mean = f64::from(total) / f64::from(count);
    Some((mean * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::{FeedbackId, Rating, SubmissionId, UserId};

    fn rated(rating: u8) -> Feedback {
        Feedback {
            id: FeedbackId::random(),
            submission_id: SubmissionId::random(),
            mentor_id: UserId::random(),
            comment: "ok".into(),
            rating: Rating::new(rating).expect("rating"),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(&[], None)]
    #[case(&[5], Some(5.0))]
    #[case(&[1, 2], Some(1.5))]
    #[case(&[4, 5, 5], Some(4.67))]
    fn ratings_average_to_two_decimals(#[case] ratings: &[u8], #[case] expected: Option<f64>) {
        let feedback: Vec<Feedback> = ratings.iter().copied().map(rated).collect();
        assert_eq!(average_rating(&feedback), expected);
    }
}
