use sha2::{Digest, Sha256};

/// Length of an event identifier, 16 bytes written in hexadecimal
const ID_LENGTH: usize = 32;

/// Stable identifier of a lesson occurrence.
///
/// Same group, week, day, ordinal, name and type always give the same ID, so
/// calendar clients update the event instead of duplicating it on re-import.
pub fn generate_event_id(
    group: &str,
    week: i64,
    day: i64,
    ordinal: i64,
    name: &str,
    kind: &str,
) -> String {
    let key = format!("{group}:{week}:{day}:{ordinal}:{name}:{kind}");
    let digest = format!("{:x}", Sha256::digest(key.as_bytes()));

    digest[..ID_LENGTH].to_owned()
}
