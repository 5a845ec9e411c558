//! # Persisted Ledger Format
//!
//! The ledger is stored as one JSON blob under a single key:
//!
//! ```json
//! [
//!   { "categoria": "Cone", "produto": "Waffle", "quantidade": 3 },
//!   { "categoria": "Popsicle", "produto": "Lemon", "quantidade": 12 }
//! ]
//! ```
//!
//! Records keep ledger order. `decode(encode(l)) == l` for every ledger.

use crate::error::{CodecError, CodecResult};
use crate::ledger::Ledger;
use crate::types::StockRecord;

/// Serializes a ledger to its stored form.
pub fn encode(ledger: &Ledger) -> CodecResult<String> {
    Ok(serde_json::to_string(ledger.records())?)
}

/// Parses a stored blob back into a ledger.
///
/// Shape problems (bad JSON, missing field, negative quantity) come back as
/// [`CodecError::Malformed`]; well-formed records that break a ledger
/// invariant come back as [`CodecError::Invalid`].
pub fn decode(blob: &str) -> CodecResult<Ledger> {
    let records: Vec<StockRecord> = serde_json::from_str(blob)?;
    Ledger::from_records(records).map_err(CodecError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use proptest::prelude::*;

    #[test]
    fn test_encode_shape() {
        let ledger = Ledger::from_records(vec![StockRecord::new("Cone", "Waffle", 3)]).unwrap();
        assert_eq!(
            encode(&ledger).unwrap(),
            r#"[{"categoria":"Cone","produto":"Waffle","quantidade":3}]"#
        );
        assert_eq!(encode(&Ledger::new()).unwrap(), "[]");
    }

    #[test]
    fn test_decode_existing_blob() {
        let blob = r#"[
            {"categoria": "Picolé", "produto": "Limão", "quantidade": 10},
            {"categoria": "Cones", "produto": "Casquinha", "quantidade": 2}
        ]"#;
        let ledger = decode(blob).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get("Limão").unwrap().category, "Picolé");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        for blob in [
            "",
            "{}",
            "not json",
            r#"[{"produto": "Waffle", "quantidade": 1}]"#,
            r#"[{"categoria": "Cone", "produto": "Waffle", "quantidade": -2}]"#,
            r#"[{"categoria": "Cone", "produto": "Waffle", "quantidade": 1.5}]"#,
        ] {
            assert!(
                matches!(decode(blob), Err(CodecError::Malformed(_))),
                "{blob:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_decode_rejects_duplicates() {
        let blob = r#"[
            {"categoria": "Cone", "produto": "Waffle", "quantidade": 1},
            {"categoria": "Cone", "produto": "Waffle", "quantidade": 2}
        ]"#;
        assert!(matches!(
            decode(blob),
            Err(CodecError::Invalid(ValidationError::Duplicate { .. }))
        ));
    }

    #[test]
    fn test_whitespace_product_survives_storage() {
        let blob = r#"[
            {"categoria": "Cones", "produto": "Casquinha", "quantidade": 7},
            {"categoria": "Cones", "produto": "  ", "quantidade": 2}
        ]"#;
        let ledger = decode(blob).unwrap();
        assert_eq!(ledger.get("  ").unwrap().quantity, 2);
        assert_eq!(decode(&encode(&ledger).unwrap()).unwrap(), ledger);

        assert!(matches!(
            decode(r#"[{"categoria": "Cones", "produto": "", "quantidade": 2}]"#),
            Err(CodecError::Invalid(ValidationError::Required { .. }))
        ));
    }

    fn ledger_strategy() -> impl Strategy<Value = Ledger> {
        prop::collection::btree_map(
            "[ A-Za-z][A-Za-z0-9 éã]{0,15}",
            ("(Popsicle|IceCream|Topping|Cone)", any::<u32>()),
            0..20,
        )
        .prop_map(|entries| {
            let records = entries
                .into_iter()
                .map(|(product, (category, quantity))| StockRecord::new(category, product, quantity))
                .collect();
            Ledger::from_records(records).unwrap()
        })
    }

    proptest! {
        /// Property: storing and loading a ledger loses nothing.
        #[test]
        fn round_trip_is_lossless(ledger in ledger_strategy()) {
            let blob = encode(&ledger).unwrap();
            prop_assert_eq!(decode(&blob).unwrap(), ledger);
        }
    }
}
