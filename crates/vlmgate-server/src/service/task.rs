use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::service::prompt::{COUNTING_INSTRUCTION, OCR_INSTRUCTION};

/// Document analysis task selected by the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Task {
    /// Order/receipt text extraction.
    Ocr,
    /// Inventory counting, optionally within a red boundary.
    Counting,
}

impl Task {
    /// Route path serving this task.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Ocr => "/api/ocr",
            Self::Counting => "/api/counting",
        }
    }

    /// Instruction sent as the first content segment.
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Ocr => OCR_INSTRUCTION,
            Self::Counting => COUNTING_INSTRUCTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn paths_are_distinct() {
        let paths: Vec<_> = Task::iter().map(Task::path).collect();
        assert_eq!(paths, ["/api/ocr", "/api/counting"]);
    }

    #[test]
    fn ocr_instruction_requests_order_json() {
        let instruction = Task::Ocr.instruction();
        assert!(instruction.starts_with("Perform OCR"));
        for key in ["\"title\"", "\"customer\"", "\"address\"", "\"payment_method\"", "\"price\""] {
            assert!(instruction.contains(key), "missing {key}");
        }
    }

    #[test]
    fn counting_instruction_covers_rules() {
        let instruction = Task::Counting.instruction();
        assert!(instruction.contains("Vietnamese"));
        assert!(instruction.contains("red boundary"));
        assert!(instruction.contains("\"quantity\": 0"));
    }

    #[test]
    fn names_round_trip_through_strum() {
        assert_eq!(Task::Ocr.to_string(), "ocr");
        assert_eq!(Task::from_str("counting").unwrap(), Task::Counting);
    }
}
