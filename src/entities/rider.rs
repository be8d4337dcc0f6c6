use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rider {
    pub id: Uuid,
    pub mobile: String,
}

impl Rider {
    pub fn new(mobile: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            mobile,
        }
    }
}
