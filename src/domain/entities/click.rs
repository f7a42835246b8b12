//! Click record for the click log.

/// Input data for recording a new click event.
///
/// All client metadata is optional; headers may be absent or unparsable.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub short_url_id: i64,
    pub ip: Option<String>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}
