use serde::{Deserialize, Serialize};

/// One record from the quote source. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub title: String,
    pub link: String,
    pub content: String,
}
