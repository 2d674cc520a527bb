//! Expert query models

use serde::{Deserialize, Serialize};

/// Answer to a free-text farmer question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub success: bool,
    pub answer: String,
}
