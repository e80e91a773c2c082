//! Keyed remote payload.
//!
//! The shared store keeps the plan list the way real-time databases store
//! arrays: as an object keyed by index (`{"0": plan, "1": plan}`). Decoding
//! restores list order from the keys.

use std::{cmp::Ordering, collections::BTreeMap};

use crate::models::OperationPlan;

/// Plan collection as stored remotely, keyed by list index.
pub type RemotePayload = BTreeMap<String, OperationPlan>;

/// Keys a snapshot by list position.
pub fn encode_payload(plans: &[OperationPlan]) -> RemotePayload {
    plans
        .iter()
        .enumerate()
        .map(|(index, plan)| (index.to_string(), plan.clone()))
        .collect()
}

/// Restores list order from a keyed payload.
///
/// Numeric keys come first in numeric order (so `"10"` follows `"9"`), then
/// any other keys in lexicographic order.
///
/// ```rust
/// use vigil_core::persistence::payload::{decode_payload, encode_payload};
///
/// assert!(decode_payload(encode_payload(&[])).is_empty());
/// ```
pub fn decode_payload(payload: RemotePayload) -> Vec<OperationPlan> {
    let mut entries: Vec<(String, OperationPlan)> = payload.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
    entries.into_iter().map(|(_, plan)| plan).collect()
}

fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::PlanDraft, store};

    fn plan(name: &str) -> OperationPlan {
        store::create_plan(&PlanDraft {
            name: name.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_decode_orders_numeric_keys_by_value() {
        let plans: Vec<OperationPlan> = (0..12).map(|i| plan(&format!("op {i}"))).collect();
        let payload = encode_payload(&plans);

        // BTreeMap iterates "0", "1", "10", "11", "2", ...
        assert_eq!(payload.keys().nth(2).map(String::as_str), Some("10"));
        assert_eq!(decode_payload(payload), plans);
    }

    #[test]
    fn test_decode_puts_other_keys_last() {
        let mut payload = RemotePayload::new();
        payload.insert("b".to_string(), plan("b"));
        payload.insert("2".to_string(), plan("two"));
        payload.insert("a".to_string(), plan("a"));
        payload.insert("0".to_string(), plan("zero"));

        let names: Vec<String> = decode_payload(payload).into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["zero", "two", "a", "b"]);
    }
}
