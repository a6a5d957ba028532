use contracts::system::auth::SessionData;

use crate::shared::local_storage;

const SESSION_KEY: &str = "pms_session";

/// Save session to localStorage
pub fn save_session(session: &SessionData) {
    local_storage::write_json(SESSION_KEY, session);
}

/// Restore session from localStorage; a corrupt entry is dropped
pub fn load_session() -> Option<SessionData> {
    local_storage::read_json(SESSION_KEY)
}

/// Remove session from localStorage
pub fn clear_session() {
    local_storage::remove(SESSION_KEY);
}
