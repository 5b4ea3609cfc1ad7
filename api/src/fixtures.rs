//! Seed records for tests and component previews.
//!
//! Compiled only under `cfg(test)` or the `fixtures` feature, so no production
//! view can fall back to them.

use crate::types::{AttemptStatus, Exam, ExamSet, ExamSetStats, LatestAttempt};

const SEED_TIMESTAMP: &str = "2025-01-01T00:00:00Z";

#[must_use]
pub fn seed_exam() -> Exam {
    Exam {
        id: "pcd".to_owned(),
        code: "PCD".to_owned(),
        name: "Professional Cloud Developer".to_owned(),
        description: "Google Cloud Certified - Professional Cloud Developer assesses the ability to build, deploy, \
                      and manage scalable, highly available cloud-native applications."
            .to_owned(),
        image_url: "https://www.gstatic.com/images/branding/product/2x/google_cloud_64dp.png".to_owned(),
        created_at: SEED_TIMESTAMP.to_owned(),
    }
}

#[must_use]
pub fn seed_exam_sets(exam_id: &str) -> Vec<ExamSet> {
    [
        ("set-1", "Practice Exam 1", "A full-coverage practice exam across every domain.", 50),
        ("set-2", "Practice Exam 2", "Focused on security and deployment.", 40),
        ("set-3", "Practice Exam 3", "Advanced topics and case studies.", 60),
    ]
    .into_iter()
    .map(|(id, name, description, questions)| ExamSet {
        id: id.to_owned(),
        exam_id: exam_id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        question_ids: (1..=questions).map(|n| format!("q{n}")).collect(),
        created_at: SEED_TIMESTAMP.to_owned(),
    })
    .collect()
}

#[must_use]
pub fn seed_exam_set_stats() -> Vec<ExamSetStats> {
    vec![
        ExamSetStats {
            exam_set_id: "set-1".to_owned(),
            total_attempts: 3,
            latest_attempt: Some(LatestAttempt {
                status: AttemptStatus::InProgress,
                progress: 50,
                score: None,
                last_accessed_at: SEED_TIMESTAMP.to_owned(),
            }),
        },
        ExamSetStats { exam_set_id: "set-2".to_owned(), total_attempts: 0, latest_attempt: None },
        ExamSetStats {
            exam_set_id: "set-3".to_owned(),
            total_attempts: 1,
            latest_attempt: Some(LatestAttempt {
                status: AttemptStatus::Completed,
                progress: 100,
                score: Some(85.0),
                last_accessed_at: SEED_TIMESTAMP.to_owned(),
            }),
        },
    ]
}
