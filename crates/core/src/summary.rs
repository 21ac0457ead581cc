//! End-of-round summary.

use serde::{Serialize, Serializer};

use crate::types::EndReason;

/// Final counters of one round, produced when the round ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub generation: u32,
    pub score: u32,
    pub currency: u32,
    pub penalties: u32,
    pub time_remaining_secs: u32,
    #[serde(serialize_with = "serialize_end_reason")]
    pub ended_by: EndReason,
}

fn serialize_end_reason<S>(reason: &EndReason, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(reason.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_reason() {
        let summary = RoundSummary {
            generation: 3,
            score: 12,
            currency: 2,
            penalties: 2,
            time_remaining_secs: 9,
            ended_by: EndReason::PenaltyCap,
        };
        let v: serde_json::Value = serde_json::to_value(summary).unwrap();
        assert_eq!(v["ended_by"], "penaltyCap");
        assert_eq!(v["score"], 12);
        assert_eq!(v["time_remaining_secs"], 9);
    }
}
