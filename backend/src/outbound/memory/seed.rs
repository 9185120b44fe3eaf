//! Demo records loaded into a fresh in-memory backend.
//!
//! The canned accounts match [`DEMO_USERS`] so switching role lands on an
//! identity that owns seeded data. Every seeded account signs in with
//! [`DEMO_PASSWORD`].

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::ports::{DEMO_AVATAR, DEMO_USERS, DemoUser};
use crate::domain::{
    Feedback, FeedbackId, Identity, Profile, Project, ProjectId, ProjectRequest, ProjectStatus,
    Rating, RequestId, RequestStatus, Role, Submission, SubmissionId, SubmissionStatus, UserId,
};

use super::Tables;

/// Password accepted for every seeded account.
pub const DEMO_PASSWORD: &str = "password";

/// Mentee who applied but has not been accepted anywhere.
pub(super) const EMILY_ID: UserId =
    UserId::from_uuid(Uuid::from_u128(0x5b1f_0c6e_8a41_4d2b_9e07_1f3a_6c5d_0004));

pub(super) const ECOMMERCE_ID: ProjectId =
    ProjectId::from_uuid(Uuid::from_u128(0x7d0e_2a55_3c1b_4f6a_8b29_5e4c_1a70_0001));
pub(super) const TASKS_ID: ProjectId =
    ProjectId::from_uuid(Uuid::from_u128(0x7d0e_2a55_3c1b_4f6a_8b29_5e4c_1a70_0002));
pub(super) const SOCIAL_ID: ProjectId =
    ProjectId::from_uuid(Uuid::from_u128(0x7d0e_2a55_3c1b_4f6a_8b29_5e4c_1a70_0003));

const SUBMISSION_ID: SubmissionId =
    SubmissionId::from_uuid(Uuid::from_u128(0x7d0e_2a55_3c1b_4f6a_8b29_5e4c_1a70_0101));
const FEEDBACK_ID: FeedbackId =
    FeedbackId::from_uuid(Uuid::from_u128(0x7d0e_2a55_3c1b_4f6a_8b29_5e4c_1a70_0201));
const JOHN_REQUEST_ID: RequestId =
    RequestId::from_uuid(Uuid::from_u128(0x7d0e_2a55_3c1b_4f6a_8b29_5e4c_1a70_0301));
const EMILY_REQUEST_ID: RequestId =
    RequestId::from_uuid(Uuid::from_u128(0x7d0e_2a55_3c1b_4f6a_8b29_5e4c_1a70_0302));

/// Failure while building seed rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid seed record: {0}")]
pub struct SeedError(String);

fn seed_err(err: impl std::fmt::Display) -> SeedError {
    SeedError(err.to_string())
}

fn at(raw: &str) -> Result<DateTime<Utc>, SeedError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(seed_err)
}

fn day(raw: &str) -> Result<NaiveDate, SeedError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(seed_err)
}

fn stack(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

fn mentor_id() -> UserId {
    DemoUser::for_role(Role::Mentor).id.clone()
}

fn mentee_id() -> UserId {
    DemoUser::for_role(Role::Mentee).id.clone()
}

fn seed_account(
    tables: &mut Tables,
    id: UserId,
    name: &str,
    email: &str,
    role: Role,
) -> Result<(), SeedError> {
    let identity = Identity::try_from_strings(id.to_string(), name, email)
        .map_err(seed_err)?
        .with_avatar(DEMO_AVATAR);
    let profile = Profile::new(id, identity.display_name().clone(), role);
    tables.insert_account(identity, DEMO_PASSWORD);
    tables.profiles.insert(profile.id().clone(), profile);
    Ok(())
}

pub(super) fn load(tables: &mut Tables) -> Result<(), SeedError> {
    for user in &DEMO_USERS {
        seed_account(tables, user.id.clone(), user.name, user.email, user.role)?;
    }
    seed_account(tables, EMILY_ID, "Emily Davis", "emily@example.com", Role::Mentee)?;

    tables.projects = vec![
        Project {
            id: ECOMMERCE_ID,
            title: "E-commerce Dashboard".into(),
            description: "Build a responsive dashboard for an e-commerce website with data visualization."
                .into(),
            mentor_id: mentor_id(),
            tech_stack: stack(&["React", "TailwindCSS", "Chart.js"]),
            deadline: Some(day("2025-06-15")?),
            status: ProjectStatus::InProgress,
        },
        Project {
            id: TASKS_ID,
            title: "Task Management App".into(),
            description: "Create a task management application with drag and drop functionality."
                .into(),
            mentor_id: mentor_id(),
            tech_stack: stack(&["React", "Redux", "Tailwind"]),
            deadline: Some(day("2025-07-20")?),
            status: ProjectStatus::Available,
        },
        Project {
            id: SOCIAL_ID,
            title: "Social Media API Integration".into(),
            description: "Integrate various social media APIs into a React application.".into(),
            mentor_id: mentor_id(),
            tech_stack: stack(&["React", "REST API", "OAuth"]),
            deadline: Some(day("2025-08-10")?),
            status: ProjectStatus::Completed,
        },
    ];

    tables.requests = vec![
        ProjectRequest {
            id: JOHN_REQUEST_ID,
            mentee_id: mentee_id(),
            project_id: ECOMMERCE_ID,
            status: RequestStatus::Pending,
            created_at: at("2025-04-05T09:30:00Z")?,
        },
        ProjectRequest {
            id: EMILY_REQUEST_ID,
            mentee_id: EMILY_ID,
            project_id: TASKS_ID,
            status: RequestStatus::Pending,
            created_at: at("2025-04-08T14:20:00Z")?,
        },
    ];

    tables.submissions = vec![Submission {
        id: SUBMISSION_ID,
        project_id: ECOMMERCE_ID,
        mentee_id: mentee_id(),
        github_link: Some("https://github.com/johnsmith/ecommerce-dashboard".into()),
        file_url: None,
        submitted_at: at("2025-04-10T15:30:00Z")?,
        status: SubmissionStatus::Pending,
    }];

    tables.feedback = vec![Feedback {
        id: FEEDBACK_ID,
        submission_id: SUBMISSION_ID,
        mentor_id: mentor_id(),
        comment: "Great work on the dashboard layout! Consider improving the responsiveness for mobile devices."
            .into(),
        rating: Rating::new(4).map_err(seed_err)?,
        created_at: at("2025-04-12T10:15:00Z")?,
    }];

    Ok(())
}
