//! Functions, iterators, closures and pattern matching

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde_json::{json, Value};

use crate::common::config::CatalogConfig;
use crate::harness::{wrap, FeatureCase};

pub fn fibonacci(n: u64) -> u64 {
    if n <= 1 {
        return n;
    }
    fibonacci(n - 1) + fibonacci(n - 2)
}

pub fn fibonacci_memo(n: u64, cache: &mut HashMap<u64, u64>) -> u64 {
    if n <= 1 {
        return n;
    }
    if let Some(&known) = cache.get(&n) {
        return known;
    }
    let value = fibonacci_memo(n - 1, cache) + fibonacci_memo(n - 2, cache);
    cache.insert(n, value);
    value
}

/// Largest item, or `None` for an empty slice
pub fn find_max<T: PartialOrd + Copy>(items: &[T]) -> Option<T> {
    let (first, rest) = items.split_first()?;
    Some(
        rest.iter()
            .fold(*first, |max, &item| if item > max { item } else { max }),
    )
}

/// Keep the records accepted by `filter`, or all of them
pub fn process_data(data: &[Value], filter: Option<&dyn Fn(&Value) -> bool>) -> Vec<Value> {
    data.iter()
        .filter(|&item| filter.map_or(true, |f| f(item)))
        .cloned()
        .collect()
}

/// Numbers from `current` up to (excluding) `end`
#[derive(Debug, Clone)]
pub struct NumberRange {
    current: i64,
    end: i64,
    step: i64,
}

impl NumberRange {
    pub fn new(start: i64, end: i64, step: i64) -> Self {
        Self {
            current: start,
            end,
            step: step.max(1),
        }
    }
}

impl Iterator for NumberRange {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.current >= self.end {
            return None;
        }
        let value = self.current;
        self.current += self.step;
        Some(value)
    }
}

/// The fibonacci sequence, ending where `u64` would overflow
#[derive(Debug, Clone)]
pub struct FibonacciSeq {
    a: u64,
    b: u64,
}

impl FibonacciSeq {
    pub fn new() -> Self {
        Self { a: 0, b: 1 }
    }
}

impl Iterator for FibonacciSeq {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let value = self.a;
        let next = self.a.checked_add(self.b)?;
        self.a = self.b;
        self.b = next;
        Some(value)
    }
}

/// A value of mixed shape for the classifier
#[derive(Debug, Clone)]
pub enum Sample {
    Int(i64),
    Text(String),
    List(Vec<Sample>),
    Nothing,
}

pub fn classify(value: &Sample) -> String {
    match value {
        Sample::Int(n) if *n > 0 => format!("Positive integer: {}", n),
        Sample::Int(n) if *n < 0 => format!("Negative integer: {}", n),
        Sample::Int(_) => "Zero".to_string(),
        Sample::Text(s) if s.chars().count() > 10 => {
            let head: String = s.chars().take(10).collect();
            format!("Long string: {}...", head)
        }
        Sample::Text(s) => format!("Short string: {}", s),
        Sample::List(items) => format!("Sequence with {} elements", items.len()),
        Sample::Nothing => "Unknown type: nothing".to_string(),
    }
}

/// Fails with probability `failure_rate`
fn risky(failure_rate: f64) -> anyhow::Result<&'static str> {
    if fastrand::f64() < failure_rate {
        anyhow::bail!("Random failure");
    }
    Ok("Success!")
}

pub(super) fn cases(config: &CatalogConfig) -> Vec<FeatureCase> {
    let failure_rate = config.failure_rate;
    let retry_attempts = config.retry_attempts;

    vec![
        FeatureCase::new("fibonacci", || {
            Ok((0..10).map(fibonacci).collect::<Vec<_>>())
        }),
        FeatureCase::new("fibonacci_memoized", || {
            let mut cache = HashMap::new();
            Ok(json!({ "n": 80, "value": fibonacci_memo(80, &mut cache) }))
        }),
        FeatureCase::new("find_max", || {
            let max = find_max(&[3.5, 9.25, -1.0, 7.0])
                .ok_or_else(|| anyhow::anyhow!("At least one argument required"))?;
            Ok(json!({ "max": max, "empty": find_max::<i32>(&[]) }))
        }),
        FeatureCase::new("process_data", || {
            let data = vec![
                json!({ "name": "a", "score": 10 }),
                json!({ "name": "b", "score": 55 }),
                json!({ "name": "c", "score": 90 }),
            ];
            let high = |item: &Value| item["score"].as_i64().unwrap_or_default() > 50;
            Ok(json!({
                "all": process_data(&data, None).len(),
                "high": process_data(&data, Some(&high)),
            }))
        }),
        FeatureCase::new("number_generator", || {
            Ok(NumberRange::new(0, 20, 3).collect::<Vec<_>>())
        }),
        FeatureCase::new("fibonacci_generator", || {
            Ok(FibonacciSeq::new().take(10).collect::<Vec<_>>())
        }),
        FeatureCase::new("pattern_matching", || {
            let samples = [
                Sample::Int(42),
                Sample::Int(-7),
                Sample::Int(0),
                Sample::Text("a rather long sentence".to_string()),
                Sample::Text("short".to_string()),
                Sample::List(vec![Sample::Int(1), Sample::Nothing]),
                Sample::Nothing,
            ];
            Ok(samples.iter().map(classify).collect::<Vec<_>>())
        }),
        FeatureCase::new("comprehensions", || {
            let squares: Vec<u32> = (0..10).map(|x| x * x).collect();
            let even_squares: Vec<u32> = (0..10).filter(|x| x % 2 == 0).map(|x| x * x).collect();
            let square_map: BTreeMap<u32, u32> = (0..5).map(|x| (x, x * x)).collect();
            let even_set: BTreeSet<u32> = (0..10).filter(|x| x % 2 == 0).collect();
            let sum_of_squares: u32 = (0..100).map(|x| x * x).sum();
            Ok(json!({
                "squares": squares,
                "even_squares": even_squares,
                "square_map": square_map,
                "even_set": even_set,
                "sum_of_squares": sum_of_squares,
            }))
        }),
        FeatureCase::new("higher_order", || {
            let numbers = [1, 2, 3, 4, 5];
            let square = |x: i32| x * x;
            let add = |a: i32, b: i32| a + b;
            Ok(json!({
                "squared": numbers.iter().copied().map(square).collect::<Vec<_>>(),
                "even": numbers.iter().copied().filter(|x| x % 2 == 0).collect::<Vec<_>>(),
                "product": numbers.iter().product::<i32>(),
                "sum": numbers.iter().copied().fold(0, add),
            }))
        }),
        FeatureCase::new("division_by_zero", || {
            let numerator: i32 = 10;
            let handled = match numerator.checked_div(0) {
                Some(result) => format!("No error occurred: {}", result),
                None => "Division by zero error: attempt to divide by zero".to_string(),
            };
            Ok(handled)
        }),
        FeatureCase::new("risky_retry", move || risky(failure_rate))
            .wrap(|action| wrap::retry(retry_attempts, action)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_variants_agree() {
        let mut cache = HashMap::new();
        for n in 0..20 {
            assert_eq!(fibonacci(n), fibonacci_memo(n, &mut cache));
        }
        assert_eq!(fibonacci(10), 55);
    }

    #[test]
    fn test_find_max() {
        assert_eq!(find_max(&[1, 5, 3]), Some(5));
        assert_eq!(find_max::<u8>(&[]), None);
    }

    #[test]
    fn test_number_range_step() {
        let values: Vec<_> = NumberRange::new(0, 10, 4).collect();
        assert_eq!(values, [0, 4, 8]);
        assert_eq!(NumberRange::new(5, 5, 1).count(), 0);
    }

    #[test]
    fn test_fibonacci_sequence_stops_on_overflow() {
        let first: Vec<_> = FibonacciSeq::new().take(8).collect();
        assert_eq!(first, [0, 1, 1, 2, 3, 5, 8, 13]);
        assert!(FibonacciSeq::new().count() < 100);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&Sample::Int(0)), "Zero");
        assert_eq!(classify(&Sample::Int(-2)), "Negative integer: -2");
        assert_eq!(
            classify(&Sample::Text("abcdefghijklmno".into())),
            "Long string: abcdefghij..."
        );
        assert_eq!(
            classify(&Sample::List(vec![Sample::Nothing; 3])),
            "Sequence with 3 elements"
        );
    }

    #[test]
    fn test_risky_extremes() {
        assert!(risky(0.0).is_ok());
        assert!(risky(1.0).is_err());
    }

    #[test]
    fn test_risky_retry_never_fails_at_zero_rate() {
        let config = CatalogConfig {
            retry_attempts: 1,
            failure_rate: 0.0,
        };
        let case = cases(&config)
            .into_iter()
            .find(|c| c.name() == "risky_retry")
            .unwrap();
        assert_eq!(case.invoke().unwrap(), json!("Success!"));
    }
}
