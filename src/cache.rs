//! Explicit, caller-owned memoization of calculation results.
//!
//! The engine itself is a pure function; this wrapper exists so callers that
//! repeat identical calculations (form re-renders, report refreshes) can
//! reuse results without any global state. Results are keyed by a canonical
//! form of the input, so amount order does not fragment the cache.

use crate::report::CalculationResult;
use crate::schema::CalculationInput;
use crate::SplitCalculator;
use log::debug;
use std::collections::{HashMap, VecDeque};

pub struct CalculationCache {
    capacity: usize,
    entries: HashMap<String, CalculationResult>,
    // Least-recently-used key at the front.
    order: VecDeque<String>,
}

impl CalculationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Returns the cached result for `input`, computing and storing it on a
    /// miss. Evicts the least recently used entry when full.
    pub fn get_or_compute(&mut self, input: &CalculationInput) -> CalculationResult {
        let key = canonical_key(input);

        if let Some(result) = self.entries.get(&key) {
            let result = result.clone();
            self.touch(&key);
            debug!("cache hit for {}", key);
            return result;
        }

        let result = SplitCalculator::calculate(input);

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(key.clone(), result.clone());
        self.order.push_back(key);

        result
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

/// Canonical cache key: dates, inclusion flag, period mode and the amounts
/// in sorted order.
pub fn canonical_key(input: &CalculationInput) -> String {
    let mut amounts = input.amounts.clone();
    amounts.sort_by(f64::total_cmp);

    let amount_key = amounts
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{}|{}|{}|{:?}|{}",
        input.start_date, input.end_date, input.include_end_date, input.split_period, amount_key
    )
}
