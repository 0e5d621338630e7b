#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

/// Generate an arbitrary JSON value from fuzzer bytes, biased toward the
/// shapes the validator dispatches on (operator keys, `$or`, sequences).
fn arbitrary_value(u: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<Value> {
    if depth == 0 {
        return Ok(Value::Null);
    }
    match u.int_in_range(0..=6)? {
        0 => Ok(Value::Null),
        1 => Ok(Value::Bool(bool::arbitrary(u)?)),
        2 => Ok(Value::from(i64::arbitrary(u)?)),
        3 => Ok(Value::String(String::arbitrary(u)?)),
        4 => {
            let len = u.int_in_range(0..=5)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(arbitrary_value(u, depth - 1)?);
            }
            Ok(Value::Array(items))
        }
        _ => {
            let len = u.int_in_range(0..=5)?;
            let mut map = serde_json::Map::new();
            for _ in 0..len {
                let key = if bool::arbitrary(u)? {
                    let known = [
                        "source", "detail", "$or", "numeric", "cidr", "exists", "wildcard",
                        "prefix", "anything-but",
                    ];
                    known[u.int_in_range(0..=known.len() - 1)?].to_string()
                } else {
                    String::arbitrary(u)?
                };
                map.insert(key, arbitrary_value(u, depth - 1)?);
            }
            Ok(Value::Object(map))
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    if let Ok(pattern) = arbitrary_value(&mut u, 8) {
        let result = eventpattern::validate(&pattern);
        assert_eq!(result.valid, result.errors.is_empty());
        // Purity: a second pass over the same tree is identical.
        assert_eq!(result, eventpattern::validate(&pattern));
    }
});
