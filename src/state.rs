use std::sync::Arc;

use crate::features::review::ReviewService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReviewService>,
    pub admin_user_ids: Arc<Vec<i32>>,
}

impl AppState {
    pub fn new(service: ReviewService, admin_user_ids: Vec<i32>) -> Self {
        Self {
            service: Arc::new(service),
            admin_user_ids: Arc::new(admin_user_ids),
        }
    }

    pub fn is_admin(&self, user_id: i32) -> bool {
        self.admin_user_ids.contains(&user_id)
    }
}
