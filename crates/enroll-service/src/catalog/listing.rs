//! Courses a student could still select.

use std::sync::Arc;

use tracing::{debug, warn};

use enroll_core::config::AdmissionConfig;
use enroll_core::result::AppResult;
use enroll_core::traits::directory::CourseDirectory;
use enroll_core::types::directory::{CourseQuery, CourseSnapshot};
use enroll_core::types::id::StudentId;
use enroll_core::types::pagination::{PageRequest, PageResponse};
use enroll_database::store::EnrollmentStore;

use crate::admission::StudentLoad;
use crate::admission::rules;

/// Lists open courses filtered by the admission predicates.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn EnrollmentStore>,
    courses: Arc<dyn CourseDirectory>,
    batch_size: u64,
    max_pages: u64,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(
        store: Arc<dyn EnrollmentStore>,
        courses: Arc<dyn CourseDirectory>,
        config: &AdmissionConfig,
    ) -> Self {
        Self {
            store,
            courses,
            batch_size: config.listing_batch_size.max(1),
            max_pages: config.listing_max_pages.max(1),
        }
    }

    /// One page of courses `student_id` could select.
    ///
    /// Without a student only full courses are removed. The whole open
    /// catalogue is pulled and filtered before the page is cut, so page
    /// boundaries reflect the filtered result.
    pub async fn available_courses(
        &self,
        student_id: Option<StudentId>,
        page: PageRequest,
        keyword: Option<String>,
    ) -> AppResult<PageResponse<CourseSnapshot>> {
        let catalogue = self.pull_catalogue(keyword).await;

        let load = match student_id {
            Some(id) => StudentLoad::gather(self.store.as_ref(), self.courses.as_ref(), &id).await?,
            None => StudentLoad::default(),
        };

        let candidates: Vec<CourseSnapshot> = catalogue
            .into_iter()
            .filter(|course| rules::is_candidate(course, &load))
            .collect();

        debug!(
            student_id = ?student_id,
            candidates = candidates.len(),
            "Filtered open courses"
        );
        Ok(PageResponse::from_full(candidates, &page))
    }

    /// Pull open courses page by page until a short, empty or failed page.
    async fn pull_catalogue(&self, keyword: Option<String>) -> Vec<CourseSnapshot> {
        let mut catalogue = Vec::new();
        for page in 1..=self.max_pages {
            let query = CourseQuery {
                page,
                page_size: self.batch_size,
                keyword: keyword.clone(),
            };
            let batch = match self.courses.list_open(&query).await {
                Ok(batch) => batch,
                Err(e) => {
                    warn!(page, error = %e, "Failed to read open courses, listing what was read");
                    break;
                }
            };
            let short = (batch.len() as u64) < self.batch_size;
            catalogue.extend(batch);
            if short {
                break;
            }
        }
        catalogue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[tokio::test]
    async fn test_excludes_selected_full_and_conflicting() {
        let fx = Fixture::new();
        let student = fx.student();
        let held = fx.course_at(3.0, 10, Some((10, 12)));
        let overlapping = fx.course_at(3.0, 10, Some((11, 13)));
        let full = fx.course(3.0, 1);
        let open = fx.course_at(3.0, 10, Some((12, 14)));

        fx.services
            .admission
            .select_course(student, held)
            .await
            .expect("held");
        fx.services
            .admission
            .select_course(fx.student(), full)
            .await
            .expect("fill");

        let page = fx
            .services
            .catalog
            .available_courses(Some(student), PageRequest::new(1, 10), None)
            .await
            .expect("listing");
        let ids: Vec<_> = page.items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![open]);
        assert!(!ids.contains(&overlapping));
    }

    #[tokio::test]
    async fn test_anonymous_listing_only_drops_full_courses() {
        let fx = Fixture::new();
        fx.course(3.0, 10);
        fx.course(3.0, 10);
        let full = fx.course(3.0, 1);
        fx.services
            .admission
            .select_course(fx.student(), full)
            .await
            .expect("fill");

        let page = fx
            .services
            .catalog
            .available_courses(None, PageRequest::new(1, 10), None)
            .await
            .expect("listing");
        assert_eq!(page.total_items, 2);
    }

    #[tokio::test]
    async fn test_pulls_every_batch() {
        let fx = Fixture::with_config(AdmissionConfig {
            listing_batch_size: 2,
            ..AdmissionConfig::default()
        });
        for _ in 0..5 {
            fx.course(1.0, 10);
        }
        let page = fx
            .services
            .catalog
            .available_courses(None, PageRequest::new(2, 2), None)
            .await
            .expect("listing");
        assert_eq!(page.total_items, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages, 3);
    }
}
