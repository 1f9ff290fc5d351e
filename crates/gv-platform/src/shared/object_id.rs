//! Object identifiers: 10 random alphanumeric characters.

use rand::{distributions::Alphanumeric, Rng};

pub const OBJECT_ID_LEN: usize = 10;

pub struct ObjectIdGenerator;

impl ObjectIdGenerator {
    pub fn generate() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(OBJECT_ID_LEN)
            .map(char::from)
            .collect()
    }

    pub fn is_valid(id: &str) -> bool {
        id.len() == OBJECT_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric())
    }
}
