//! Thread identity generation.

use uuid::Uuid;

/// Prefix shared by all client-generated thread IDs.
const THREAD_ID_PREFIX: &str = "thread_";

/// Length of the random suffix appended to [`THREAD_ID_PREFIX`].
const THREAD_ID_SUFFIX_LEN: usize = 8;

/// Generate a new thread ID for a fresh conversation.
///
/// The ID is a fixed prefix plus a short random alphanumeric suffix,
/// e.g. `thread_3f9a1c2e`. Collisions are vanishingly unlikely within a
/// process lifetime, which is all the backend requires: the ID only has
/// to scope history retrieval and message dispatch.
pub fn new_thread_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}", THREAD_ID_PREFIX, &suffix[..THREAD_ID_SUFFIX_LEN])
}
