//! Property-based round-trip tests over generated document trees.

use proptest::prelude::*;

use jsontree::{parse, serialize, Array, BString, Object, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        any::<f64>()
            .prop_filter("serialized reals must be finite", |x| x.is_finite())
            .prop_map(Value::Real),
        prop::collection::vec(any::<u8>(), 0..12)
            .prop_map(|bytes| Value::String(BString::from(bytes))),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(|items| {
                let mut arr = Array::new();
                for item in items {
                    arr.append(item);
                }
                Value::Array(arr)
            }),
            prop::collection::vec((prop::collection::vec(any::<u8>(), 0..8), inner), 0..6)
                .prop_map(|pairs| {
                    let mut obj = Object::new();
                    for (key, value) in pairs {
                        obj.set(key, value);
                    }
                    Value::Object(obj)
                }),
        ]
    })
}

proptest! {
    /// Serializing and re-parsing reproduces a structurally equal tree:
    /// same type per node, same key set per object, same element sequence
    /// per array.
    #[test]
    fn prop_round_trip(v in value()) {
        let text = serialize(&v);
        let reparsed = parse(&text).unwrap_or_else(|e| panic!("{}\nin:\n{}", e, text));
        prop_assert_eq!(reparsed, v);
    }

    /// A second serialize/parse cycle changes nothing.
    #[test]
    fn prop_serialize_idempotent(v in value()) {
        let once = serialize(&v);
        let twice = serialize(&parse(&once).unwrap());
        prop_assert_eq!(once, twice);
    }

    /// Object rendering depends only on the key set, not on the order the
    /// pairs were inserted.
    #[test]
    fn prop_insertion_order_irrelevant(
        pairs in prop::collection::btree_map(
            prop::collection::vec(any::<u8>(), 0..8),
            any::<i64>(),
            0..12,
        )
    ) {
        let mut forward = Object::new();
        for (key, n) in pairs.iter() {
            forward.set(key.clone(), Value::Integer(*n));
        }
        let mut backward = Object::new();
        for (key, n) in pairs.iter().rev() {
            backward.set(key.clone(), Value::Integer(*n));
        }
        let forward = Value::Object(forward);
        let backward = Value::Object(backward);
        prop_assert_eq!(serialize(&forward), serialize(&backward));
        prop_assert_eq!(forward, backward);
    }
}
