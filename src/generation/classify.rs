//! Explicit task classification. Token budgets hang off the enumerated
//! `TaskKind` instead of substring-sniffing the prompt text.

use crate::models::TaskKind;

/// Output token budget per task kind.
pub fn token_budget(kind: TaskKind) -> u32 {
    match kind {
        TaskKind::Document => 4096,
        TaskKind::TestGeneration => 2048,
        TaskKind::Extraction => 2048,
        TaskKind::Expansion => 768,
        TaskKind::FieldImprovement => 512,
    }
}
