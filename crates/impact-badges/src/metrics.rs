//! Normalization helpers shared by the badge rules and the evaluation surfaces.
//!
//! Everything here is pure and total: degenerate inputs (empty references, zero
//! totals) produce an empty or absent result instead of an error.

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Fractional rank of `value` within an ascending `reference` sequence.
///
/// `None` distinguishes "no data" from a zero value; an empty reference also
/// yields `None`. The rank is the leftmost insertion point, so ties count as
/// below the value. Unsorted references give unspecified results.
pub fn percentile(reference: &[f64], value: Option<f64>) -> Option<f64> {
    let value = value?;
    if reference.is_empty() {
        return None;
    }

    let matching_index = reference.partition_point(|candidate| *candidate < value);
    Some(matching_index as f64 / reference.len() as f64)
}

/// Share of the total held by each key, rounded to two decimals.
pub fn as_proportion<K, V>(values: &BTreeMap<K, V>) -> BTreeMap<K, f64>
where
    K: Ord + Clone,
    V: Copy + Into<f64>,
{
    let total: f64 = values.values().map(|value| (*value).into()).sum();
    if values.is_empty() || total == 0.0 {
        return BTreeMap::new();
    }

    values
        .iter()
        .map(|(key, value)| (key.clone(), round_to(Into::<f64>::into(*value) / total, 2)))
        .collect()
}

/// Deep-merge `src` into `dst`, summing numeric leaves.
///
/// Integer leaves stay integers when both sides fit in `i64`; any other numeric
/// pair is summed as `f64`. Non-numeric leaves from `src` replace whatever `dst`
/// held, and nested objects are merged recursively.
pub fn merge_sum(dst: &mut Map<String, Value>, src: &Map<String, Value>) {
    for (key, incoming) in src {
        match incoming {
            Value::Object(nested) => {
                let slot = dst
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(existing) = slot {
                    merge_sum(existing, nested);
                }
            }
            Value::Number(addend) => {
                let summed = match dst.get(key) {
                    Some(Value::Number(current)) => sum_numbers(current, addend),
                    _ => Value::Number(addend.clone()),
                };
                dst.insert(key.clone(), summed);
            }
            other => {
                dst.insert(key.clone(), other.clone());
            }
        }
    }
}

fn sum_numbers(left: &Number, right: &Number) -> Value {
    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        if let Some(total) = a.checked_add(b) {
            return Value::from(total);
        }
    }

    let total = left.as_f64().unwrap_or(0.0) + right.as_f64().unwrap_or(0.0);
    Number::from_f64(total)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Median of an unordered sample; `None` when the sample is empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Human friendly rendering used in badge evidence ("52.3 thousand", "two million").
pub fn conversational_number(number: f64) -> String {
    if number < 1.0 {
        return format!("{}", round_to(number, 2));
    }
    if number < 1_000.0 {
        return format!("{}", number.floor() as i64);
    }

    let (divided, unit) = if number < 1_000_000.0 {
        (number / 1_000.0, "thousand")
    } else {
        (number / 1_000_000.0, "million")
    };

    // two decimals, then drop the last digit
    let mut short_number = format!("{:.2}", divided);
    short_number.pop();

    let spelled = match short_number.as_str() {
        "1.0" => Some("one"),
        "2.0" => Some("two"),
        "3.0" => Some("three"),
        "4.0" => Some("four"),
        "5.0" => Some("five"),
        "6.0" => Some("six"),
        "7.0" => Some("seven"),
        "8.0" => Some("eight"),
        "9.0" => Some("nine"),
        _ => None,
    };

    match spelled {
        Some(word) => format!("{word} {unit}"),
        None => format!("{short_number} {unit}"),
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn percentile_uses_leftmost_insertion_point() {
        let reference = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&reference, Some(3.0)), Some(0.4));
        assert_eq!(percentile(&reference, Some(0.5)), Some(0.0));
        assert_eq!(percentile(&reference, Some(9.0)), Some(1.0));
    }

    #[test]
    fn percentile_distinguishes_missing_values() {
        assert_eq!(percentile(&[1.0, 2.0], None), None);
        assert_eq!(percentile(&[], Some(2.0)), None);
        assert_eq!(percentile(&[1.0, 2.0], Some(0.0)), Some(0.0));
    }

    #[test]
    fn as_proportion_rounds_shares() {
        let mut counts = BTreeMap::new();
        counts.insert("a", 1u32);
        counts.insert("b", 3u32);
        let shares = as_proportion(&counts);
        assert_eq!(shares.get("a"), Some(&0.25));
        assert_eq!(shares.get("b"), Some(&0.75));

        let mut thirds = BTreeMap::new();
        thirds.insert("x", 1.0f64);
        thirds.insert("y", 2.0f64);
        let shares = as_proportion(&thirds);
        assert_eq!(shares.get("x"), Some(&0.33));
        assert_eq!(shares.get("y"), Some(&0.67));
    }

    #[test]
    fn as_proportion_guards_empty_and_zero_totals() {
        let empty: BTreeMap<String, u32> = BTreeMap::new();
        assert!(as_proportion(&empty).is_empty());

        let mut zeros = BTreeMap::new();
        zeros.insert("twitter", 0u32);
        zeros.insert("blogs", 0u32);
        assert!(as_proportion(&zeros).is_empty());
    }

    #[test]
    fn merge_sum_adds_nested_numbers() {
        let mut dst = json!({
            "post_counts": { "twitter": 3, "blogs": 1 },
            "score": 1.5,
            "label": "first"
        })
        .as_object()
        .cloned()
        .expect("object");
        let src = json!({
            "post_counts": { "twitter": 2, "news": 4 },
            "score": 2,
            "label": "second"
        })
        .as_object()
        .cloned()
        .expect("object");

        merge_sum(&mut dst, &src);

        assert_eq!(dst["post_counts"]["twitter"], json!(5));
        assert_eq!(dst["post_counts"]["blogs"], json!(1));
        assert_eq!(dst["post_counts"]["news"], json!(4));
        assert_eq!(dst["score"], json!(3.5));
        assert_eq!(dst["label"], json!("second"));
    }

    #[test]
    fn merge_sum_replaces_scalar_with_nested_tree() {
        let mut dst = json!({ "post_counts": 7 })
            .as_object()
            .cloned()
            .expect("object");
        let src = json!({ "post_counts": { "twitter": 1 } })
            .as_object()
            .cloned()
            .expect("object");

        merge_sum(&mut dst, &src);

        assert_eq!(dst["post_counts"], json!({ "twitter": 1 }));
    }

    #[test]
    fn median_handles_odd_even_and_empty_samples() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn conversational_number_scales_units() {
        assert_eq!(conversational_number(0.456), "0.46");
        assert_eq!(conversational_number(742.9), "742");
        assert_eq!(conversational_number(2_040.0), "two thousand");
        assert_eq!(conversational_number(52_345.0), "52.3 thousand");
        assert_eq!(conversational_number(3_000_000.0), "three million");
    }
}
