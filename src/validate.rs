//! Structural validation of event-filter patterns.
//!
//! Returns **all** errors and warnings in a single pass, not just the first.
//! Malformed substructure is isolated: one bad arm never prevents sibling
//! arms or sibling keys from being checked. The only early return is a
//! non-object root. Validation never panics and never modifies the input.

use crate::error::{ValidationError, ValidationResult};
use crate::operators::{NumericComparator, Operator, ROOT_FIELDS};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Maximum serialized pattern size in bytes (boundary inclusive).
pub const MAX_PATTERN_BYTES: usize = 2048;

/// Numeric comparison values must lie within ±5.0e9 inclusive.
pub const NUMERIC_VALUE_LIMIT: f64 = 5.0e9;

/// `$or` fan-out above this is a hard error.
pub const MAX_OR_COMBINATIONS: u64 = 1000;

/// `$or` fan-out above this (and at or below the hard limit) is a warning.
pub const OR_COMBINATION_WARN_ABOVE: u64 = 500;

/// Wildcard strings with more than this many `*` draw a complexity warning.
pub const MAX_WILDCARD_STARS: usize = 3;

/// Recursion guard for adversarially deep input.
pub const MAX_NESTING_DEPTH: usize = 64;

// ─── Cached regexes ─────────────────────────────────────────────────────────

static IPV4_CIDR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}/\d{1,2}$").unwrap());

// Loose shape only: hex fields and colons with a decimal prefix length.
static IPV6_CIDR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9a-fA-F]{0,4}:){1,7}[0-9a-fA-F]{0,4}/\d{1,3}$").unwrap());

/// Validate a candidate filter pattern before it is persisted and used to
/// route events. Returns a [`ValidationResult`] containing every error and
/// warning found; `valid` is true iff no errors were found.
///
/// The input is whatever the JSON decoder produced — no pre-validation is
/// required. A non-object root yields exactly one error.
pub fn validate(pattern: &Value) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let Some(root) = pattern.as_object() else {
        errors.push(ValidationError::error(
            "$",
            "Pattern must be a valid JSON object",
        ));
        return ValidationResult::from_parts(errors, warnings);
    };

    // Size violation does not short-circuit: the structural pass still runs
    // so authors get the complete list of problems in one round-trip.
    check_pattern_size(pattern, &mut errors);

    for (key, value) in root {
        if !ROOT_FIELDS.contains(&key.as_str()) {
            errors.push(ValidationError::error(
                key,
                format!("Unknown top-level field: '{}'", key),
            ));
        }
        validate_node(value, &format!("$.{}", key), 1, &mut errors, &mut warnings);
    }

    ValidationResult::from_parts(errors, warnings)
}

fn check_pattern_size(pattern: &Value, errors: &mut Vec<ValidationError>) {
    // Serialization of an in-memory Value cannot fail; treat a failure as
    // size zero rather than panicking.
    let size = serde_json::to_string(pattern).map(|s| s.len()).unwrap_or(0);
    if size > MAX_PATTERN_BYTES {
        errors.push(ValidationError::error(
            "$",
            format!(
                "Pattern is {} bytes; the serialized pattern must not exceed {} bytes",
                size, MAX_PATTERN_BYTES
            ),
        ));
    }
}

// ─── Recursive walk ─────────────────────────────────────────────────────────

/// Dispatch on node shape: sequences hold match arms, mappings recurse one
/// nesting level deeper (with `$or` handled specially), scalars terminate.
fn validate_node(
    node: &Value,
    path: &str,
    depth: usize,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<ValidationError>,
) {
    if depth > MAX_NESTING_DEPTH {
        errors.push(ValidationError::error(
            path,
            format!(
                "Pattern nesting exceeds the maximum depth of {}",
                MAX_NESTING_DEPTH
            ),
        ));
        return;
    }

    match node {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                validate_array_item(item, &format!("{}[{}]", path, i), errors, warnings);
            }
        }
        Value::Object(map) => {
            for (key, value) in map {
                if key == "$or" {
                    validate_or_operator(
                        value,
                        &format!("{}.$or", path),
                        depth + 1,
                        errors,
                        warnings,
                    );
                } else {
                    validate_node(
                        value,
                        &format!("{}.{}", path, key),
                        depth + 1,
                        errors,
                        warnings,
                    );
                }
            }
        }
        // Bare literals outside a match-arm sequence are accepted as-is;
        // the grammar only constrains sequence elements.
        _ => {}
    }
}

/// One element of a match-value sequence: either a bare literal (implicit
/// equality, accepted unconditionally) or an operator object.
fn validate_array_item(
    item: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<ValidationError>,
) {
    let Some(map) = item.as_object() else {
        return;
    };

    for (key, value) in map {
        match Operator::from_key(key) {
            Some(op) => validate_operator_value(op, value, path, errors, warnings),
            None => {
                errors.push(ValidationError::error(
                    path,
                    format!("Unknown operator: '{}'", key),
                ));
            }
        }
    }
}

// ─── Operator validators ────────────────────────────────────────────────────

fn validate_operator_value(
    op: Operator,
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<ValidationError>,
) {
    match op {
        Operator::Numeric => validate_numeric(value, path, errors),
        Operator::Cidr => validate_cidr(value, path, errors),
        Operator::Exists => validate_exists(value, path, errors),
        Operator::Wildcard => validate_wildcard(value, path, errors, warnings),
        // These operators accept loosely-typed values, including nested
        // composition such as `anything-but: { prefix: ... }`. Known gap:
        // their value shapes are intentionally not deep-checked.
        Operator::Prefix
        | Operator::Suffix
        | Operator::AnythingBut
        | Operator::EqualsIgnoreCase => {}
    }
}

/// `numeric` holds an alternating `(comparator, number)` sequence, e.g.
/// `[">", 0, "<=", 100]`. An unknown comparator breaks the grammar and
/// stops the scan; a bad value does not.
fn validate_numeric(value: &Value, path: &str, errors: &mut Vec<ValidationError>) {
    let Some(items) = value.as_array() else {
        errors.push(ValidationError::error(
            path,
            "numeric operator expects an array of comparator/value pairs",
        ));
        return;
    };

    let mut i = 0;
    while i < items.len() {
        let comparator = items[i].as_str().and_then(NumericComparator::from_symbol);
        if comparator.is_none() {
            errors.push(ValidationError::error(
                path,
                format!("Unknown numeric comparator: {}", items[i]),
            ));
            break;
        }

        match items.get(i + 1) {
            None => {
                errors.push(ValidationError::error(
                    path,
                    format!("Numeric comparator {} is missing its value", items[i]),
                ));
                break;
            }
            Some(v) => match v.as_f64() {
                None => {
                    errors.push(ValidationError::error(
                        path,
                        format!("Numeric comparison value must be a number, got {}", v),
                    ));
                }
                Some(n) if !(-NUMERIC_VALUE_LIMIT..=NUMERIC_VALUE_LIMIT).contains(&n) => {
                    errors.push(ValidationError::error(
                        path,
                        format!(
                            "Numeric value {} is outside the allowed range [-5.0e9, 5.0e9]",
                            v
                        ),
                    ));
                }
                Some(_) => {}
            },
        }
        i += 2;
    }
}

/// `cidr` holds an IPv4 CIDR string or a loose IPv6-with-prefix shape.
fn validate_cidr(value: &Value, path: &str, errors: &mut Vec<ValidationError>) {
    match value.as_str() {
        Some(s) if IPV4_CIDR_RE.is_match(s) || IPV6_CIDR_RE.is_match(s) => {}
        Some(s) => {
            errors.push(ValidationError::error(
                path,
                format!("Invalid CIDR block: '{}'", s),
            ));
        }
        None => {
            errors.push(ValidationError::error(
                path,
                "cidr operator expects a string value",
            ));
        }
    }
}

fn validate_exists(value: &Value, path: &str, errors: &mut Vec<ValidationError>) {
    if !value.is_boolean() {
        errors.push(ValidationError::error(
            path,
            format!("exists operator expects a boolean value, got {}", value),
        ));
    }
}

/// `wildcard` holds a string or an array of strings. Consecutive `*` are a
/// hard error; more than [`MAX_WILDCARD_STARS`] stars in one string is a
/// complexity warning only.
fn validate_wildcard(
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<ValidationError>,
) {
    match value {
        Value::String(s) => check_wildcard_string(s, path, errors, warnings),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, i);
                match item.as_str() {
                    Some(s) => check_wildcard_string(s, &item_path, errors, warnings),
                    None => {
                        errors.push(ValidationError::error(
                            item_path,
                            format!("wildcard list entries must be strings, got {}", item),
                        ));
                    }
                }
            }
        }
        _ => {
            errors.push(ValidationError::error(
                path,
                "wildcard operator expects a string or an array of strings",
            ));
        }
    }
}

fn check_wildcard_string(
    s: &str,
    path: &str,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<ValidationError>,
) {
    if s.contains("**") {
        errors.push(ValidationError::error(
            path,
            "Consecutive wildcard characters are not supported",
        ));
    }
    let stars = s.matches('*').count();
    if stars > MAX_WILDCARD_STARS {
        warnings.push(ValidationError::warning(
            path,
            format!(
                "Wildcard pattern contains {} '*' characters; patterns with more than {} are expensive to match",
                stars, MAX_WILDCARD_STARS
            ),
        ));
    }
}

// ─── $or combinator ─────────────────────────────────────────────────────────

/// `$or` holds a non-empty sequence of sibling sub-patterns. Each branch is
/// validated independently, then the estimated fan-out across branches is
/// bounded to protect the downstream routing layer from pathological
/// configurations.
fn validate_or_operator(
    value: &Value,
    path: &str,
    depth: usize,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<ValidationError>,
) {
    let Some(branches) = value.as_array() else {
        errors.push(ValidationError::error(
            path,
            "$or expects an array of sub-patterns",
        ));
        return;
    };
    if branches.is_empty() {
        errors.push(ValidationError::error(
            path,
            "$or must contain at least one sub-pattern",
        ));
        return;
    }

    let mut total_combinations: u64 = 1;
    for (i, branch) in branches.iter().enumerate() {
        validate_node(branch, &format!("{}[{}]", path, i), depth, errors, warnings);
        total_combinations = total_combinations.saturating_mul(branch_weight(branch, depth));
    }

    // Heuristic, not an exact enumeration: the per-branch weight is the
    // maximum sequence length anywhere in the branch's subtree. The
    // thresholds below were tuned against this specific estimate.
    if total_combinations > MAX_OR_COMBINATIONS {
        errors.push(ValidationError::error(
            path,
            format!(
                "$or produces an estimated {} rule combinations, exceeding the limit of {}",
                total_combinations, MAX_OR_COMBINATIONS
            ),
        ));
    } else if total_combinations > OR_COMBINATION_WARN_ABOVE {
        warnings.push(ValidationError::warning(
            path,
            format!(
                "$or produces an estimated {} rule combinations; patterns above {} are rejected",
                total_combinations, MAX_OR_COMBINATIONS
            ),
        ));
    }
}

/// Depth-first maximum sequence length within a branch's subtree. A branch
/// with no nested sequences weighs 1. Bounded by the same depth cap as the
/// structural walk.
fn branch_weight(node: &Value, depth: usize) -> u64 {
    if depth > MAX_NESTING_DEPTH {
        return 1;
    }
    match node {
        Value::Array(items) => {
            let mut weight = items.len() as u64;
            for item in items {
                weight = weight.max(branch_weight(item, depth + 1));
            }
            weight.max(1)
        }
        Value::Object(map) => map
            .values()
            .map(|v| branch_weight(v, depth + 1))
            .fold(1, u64::max),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn branch_weight_is_max_sequence_length() {
        assert_eq!(branch_weight(&json!("scalar"), 0), 1);
        assert_eq!(branch_weight(&json!({"a": "b"}), 0), 1);
        assert_eq!(branch_weight(&json!({"a": [1, 2, 3]}), 0), 3);
        assert_eq!(
            branch_weight(&json!({"a": [1], "b": {"c": [1, 2, 3, 4]}}), 0),
            4
        );
        // Max, not product, within a single branch.
        assert_eq!(branch_weight(&json!({"a": [1, 2], "b": [1, 2, 3]}), 0), 3);
    }

    #[test]
    fn branch_weight_of_empty_sequence_is_one() {
        assert_eq!(branch_weight(&json!({"a": []}), 0), 1);
    }
}
