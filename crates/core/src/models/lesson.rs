use serde::{Deserialize, Serialize};

/// A recorded mistake and the rules derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub mistake_description: String,
    pub date_learned: String,
    pub mistake_category: String,
    pub severity: String,
    pub loss_amount: f64,

    /// Checklist items with the leading check mark removed
    pub checklist_before_entry: Vec<String>,

    /// Red flags with the leading cross removed
    pub red_flags_to_avoid: Vec<String>,
}
