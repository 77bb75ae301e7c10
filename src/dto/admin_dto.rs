use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_jobs: i64,
    pub total_users: i64,
    pub total_applications: i64,
    pub pending_applications: i64,
}
