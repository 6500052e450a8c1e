use serde::{Deserialize, Serialize};
use std::fmt;

/// One generated pairing: two participants, how they are related, and a
/// detail binding them together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub left: String,
    pub right: String,
    pub relationship: String,
    pub detail: String,
    /// Section the detail was drawn from.
    pub detail_section: String,
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------------")?;
        writeln!(f, "{} / {}", self.left, self.right)?;
        writeln!(f, "Relationship: {}", self.relationship)?;
        writeln!(f, "Detail: {}", self.detail)?;
        write!(f, "----------------")
    }
}
