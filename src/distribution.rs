use std::collections::HashMap;
use std::fmt;

use crate::{error::Error, Result};

/// An alphabet element. Single characters and composite labels are both
/// represented as strings and compared by value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct SymbolFrequency {
    pub symbol: Symbol,
    pub frequency: f64,
}

impl<S: Into<Symbol>> From<(S, f64)> for SymbolFrequency {
    fn from(value: (S, f64)) -> Self {
        Self {
            symbol: value.0.into(),
            frequency: value.1,
        }
    }
}

/// Immutable symbol to weight mapping.
///
/// Weights are validated on construction and need not sum to one. The order
/// in which symbols were supplied is kept; tree builders use it as the
/// secondary key when two weights tie.
#[derive(Clone, Debug, Default)]
pub struct FrequencyDistribution {
    entries: Vec<SymbolFrequency>,
    positions: HashMap<Symbol, usize>,
    total: f64,
}

impl FrequencyDistribution {
    pub fn new<I, T>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<SymbolFrequency>,
    {
        let mut distribution = Self::default();
        for entry in entries {
            distribution.push(entry.into())?;
        }
        Ok(distribution)
    }

    fn push(&mut self, entry: SymbolFrequency) -> Result<()> {
        if !entry.frequency.is_finite() || entry.frequency < 0.0 {
            return Err(Error::InvalidFrequency(entry.symbol, entry.frequency));
        }
        if self.positions.contains_key(&entry.symbol) {
            return Err(Error::DuplicateSymbol(entry.symbol));
        }
        // the total must stay finite for normalization
        let total = self.total + entry.frequency;
        if !total.is_finite() {
            return Err(Error::InvalidFrequency(entry.symbol, entry.frequency));
        }
        self.total = total;
        self.positions
            .insert(entry.symbol.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weight(&self, symbol: &Symbol) -> Option<f64> {
        self.positions
            .get(symbol)
            .map(|&index| self.entries[index].frequency)
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolFrequency> {
        self.entries.iter()
    }

    /// Weights divided by the total weight, in insertion order.
    pub fn normalized(&self) -> Result<Vec<(&Symbol, f64)>> {
        let total = self.total_weight();
        if total <= 0.0 {
            return Err(Error::DegenerateDistribution);
        }
        Ok(self
            .entries
            .iter()
            .map(|e| (&e.symbol, e.frequency / total))
            .collect())
    }
}

impl<'a> IntoIterator for &'a FrequencyDistribution {
    type Item = &'a SymbolFrequency;
    type IntoIter = std::slice::Iter<'a, SymbolFrequency>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

pub const DEFAULT_SMOOTHING_WEIGHT: f64 = 0.0001;

/// Turns raw text into a character distribution.
///
/// Every character of `alphabet` that does not occur in the text is added
/// with the smoothing weight, so that it still receives a code word.
#[derive(Clone, Debug)]
pub struct FrequencyEstimator {
    alphabet: Vec<char>,
    smoothing: f64,
}

impl FrequencyEstimator {
    pub fn new(alphabet: &str, smoothing: f64) -> Self {
        let mut characters: Vec<char> = Vec::new();
        for c in alphabet.chars() {
            if !characters.contains(&c) {
                characters.push(c);
            }
        }
        Self {
            alphabet: characters,
            smoothing,
        }
    }

    pub fn estimate(&self, text: &str) -> Result<FrequencyDistribution> {
        let mut counts: Vec<(char, usize)> = Vec::new();
        let mut positions: HashMap<char, usize> = HashMap::new();
        let mut total = 0usize;
        for c in text.chars() {
            total += 1;
            match positions.get(&c) {
                Some(&index) => counts[index].1 += 1,
                None => {
                    positions.insert(c, counts.len());
                    counts.push((c, 1));
                }
            }
        }

        let observed = counts
            .into_iter()
            .map(|(c, count)| SymbolFrequency::from((c, count as f64 / total as f64)));
        let smoothed = self
            .alphabet
            .iter()
            .filter(|c| !positions.contains_key(*c))
            .map(|&c| SymbolFrequency::from((c, self.smoothing)));
        let distribution = FrequencyDistribution::new(observed.chain(smoothed))?;
        log::debug!(
            "estimated {} symbols from {} characters ({} smoothed)",
            distribution.len(),
            total,
            distribution.len() - positions.len()
        );
        Ok(distribution)
    }
}

impl Default for FrequencyEstimator {
    fn default() -> Self {
        Self::new("", DEFAULT_SMOOTHING_WEIGHT)
    }
}

#[cfg(test)]
mod test {
    use super::{FrequencyDistribution, FrequencyEstimator, Symbol};
    use crate::error::Error;

    #[test]
    fn test_negative_weight_is_rejected() {
        let result = FrequencyDistribution::new([("a", 0.5), ("b", -0.1)]);
        assert!(
            matches!(result, Err(Error::InvalidFrequency(ref s, _)) if s.as_str() == "b"),
            "Negative weight must be rejected"
        );
    }

    #[test]
    fn test_non_finite_weights_are_rejected() {
        for weight in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = FrequencyDistribution::new([("a", weight)]);
            assert!(
                matches!(result, Err(Error::InvalidFrequency(_, _))),
                "Weight {} must be rejected",
                weight
            );
        }
    }

    #[test]
    fn test_overflowing_total_weight_is_rejected() {
        let result = FrequencyDistribution::new([("A", 1e308), ("B", 1e308), ("C", 1e307)]);
        assert!(
            matches!(result, Err(Error::InvalidFrequency(ref s, _)) if s.as_str() == "B"),
            "Weight pushing the total to infinity must be rejected"
        );
    }

    #[test]
    fn test_total_weight_is_sum_of_weights() {
        let distribution = FrequencyDistribution::new([("A", 1e308), ("B", 0.5e308)]).unwrap();
        assert_eq!(distribution.total_weight(), 1.5e308);
        let normalized = distribution.normalized().unwrap();
        assert!(normalized.iter().all(|(_, p)| p.is_finite()));
    }

    #[test]
    fn test_duplicate_symbol_is_rejected() {
        let result = FrequencyDistribution::new([("a", 0.5), ("a", 0.5)]);
        assert!(matches!(result, Err(Error::DuplicateSymbol(_))));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let distribution =
            FrequencyDistribution::new([("c", 1.0), ("a", 2.0), ("b", 3.0)]).unwrap();
        let symbols: Vec<&str> = distribution.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, ["c", "a", "b"]);
        assert_eq!(distribution.weight(&Symbol::from("a")), Some(2.0));
        assert_eq!(distribution.weight(&Symbol::from("z")), None);
    }

    #[test]
    fn test_normalize_zero_total_fails() {
        let distribution = FrequencyDistribution::new([("a", 0.0), ("b", 0.0)]).unwrap();
        assert!(matches!(
            distribution.normalized(),
            Err(Error::DegenerateDistribution)
        ));
    }

    #[test]
    fn test_normalized_weights_sum_to_one() {
        let distribution = FrequencyDistribution::new([("a", 3.0), ("b", 1.0)]).unwrap();
        let normalized = distribution.normalized().unwrap();
        assert_eq!(normalized[0].1, 0.75);
        assert_eq!(normalized[1].1, 0.25);
    }

    #[test]
    fn test_estimate_counts_characters_in_order_of_appearance() {
        let estimator = FrequencyEstimator::default();
        let distribution = estimator.estimate("ABRACADABRA").unwrap();
        let entries: Vec<(String, f64)> = distribution
            .iter()
            .map(|e| (e.symbol.to_string(), e.frequency))
            .collect();
        let expected = [
            ("A", 5.0 / 11.0),
            ("B", 2.0 / 11.0),
            ("R", 2.0 / 11.0),
            ("C", 1.0 / 11.0),
            ("D", 1.0 / 11.0),
        ];
        assert_eq!(entries.len(), expected.len());
        for (index, ((symbol, weight), (expected_symbol, expected_weight))) in
            entries.iter().zip(expected).enumerate()
        {
            assert_eq!(symbol, expected_symbol, "Symbol at index {} differs", index);
            assert!(
                (weight - expected_weight).abs() < 1e-12,
                "Weight at index {} differs",
                index
            );
        }
    }

    #[test]
    fn test_estimate_adds_missing_alphabet_symbols_with_smoothing_weight() {
        let estimator = FrequencyEstimator::new("ABCD", 0.001);
        let distribution = estimator.estimate("BB").unwrap();
        assert_eq!(distribution.len(), 4);
        assert_eq!(distribution.weight(&Symbol::from('B')), Some(1.0));
        for c in ['A', 'C', 'D'] {
            assert_eq!(
                distribution.weight(&Symbol::from(c)),
                Some(0.001),
                "Missing symbol {} must receive the smoothing weight",
                c
            );
        }
    }

    #[test]
    fn test_estimate_empty_text_without_alphabet_is_empty() {
        let distribution = FrequencyEstimator::default().estimate("").unwrap();
        assert!(distribution.is_empty());
    }
}
