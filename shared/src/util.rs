/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a locally unique ID for client-side records (cart lines).
///
/// Distinct from any backend-assigned ID; never sent as a primary key.
pub fn local_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
