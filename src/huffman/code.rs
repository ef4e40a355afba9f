use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::tree::Tree;
use crate::{distribution::Symbol, error::Error, logger, Result};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CodeMode {
    /// Digits from root to leaf, decodable left to right.
    Prefix,
    /// Digits from leaf to root, decodable right to left.
    Suffix,
}

impl fmt::Display for CodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix => write!(f, "prefix"),
            Self::Suffix => write!(f, "suffix"),
        }
    }
}

/// A sequence of digits in `0..radix`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct CodeWord {
    digits: Vec<usize>,
}

impl CodeWord {
    pub fn digits(&self) -> &[usize] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn starts_with(&self, other: &CodeWord) -> bool {
        self.digits.starts_with(&other.digits)
    }

    pub fn ends_with(&self, other: &CodeWord) -> bool {
        self.digits.ends_with(&other.digits)
    }
}

impl From<Vec<usize>> for CodeWord {
    fn from(value: Vec<usize>) -> Self {
        Self { digits: value }
    }
}

// Digits below 36 print as a single alphanumeric character, larger ones as `[n]`.
impl fmt::Display for CodeWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &digit in &self.digits {
            match u32::try_from(digit).ok().and_then(|d| char::from_digit(d, 36)) {
                Some(c) => write!(f, "{}", c)?,
                None => write!(f, "[{}]", digit)?,
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct CodeTable {
    radix: usize,
    mode: CodeMode,
    entries: BTreeMap<Symbol, CodeWord>,
}

impl CodeTable {
    pub fn radix(&self) -> usize {
        self.radix
    }

    pub fn mode(&self) -> CodeMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&CodeWord> {
        self.entries.get(symbol)
    }

    /// Entries ordered by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &CodeWord)> {
        self.entries.iter()
    }

    pub fn max_length(&self) -> usize {
        self.entries.values().map(CodeWord::len).max().unwrap_or(0)
    }

    /// Sum of `radix^-len` over all code words.
    pub fn kraft_sum(&self) -> f64 {
        let radix = self.radix as f64;
        self.entries
            .values()
            .map(|c| radix.powi(-(c.len() as i32)))
            .sum()
    }

    /// Concatenates the code words of `symbols`. A one symbol alphabet has an
    /// empty code word, so its messages encode to nothing and cannot be
    /// recovered by [`CodeTable::decode`].
    pub fn encode(&self, symbols: &[Symbol]) -> Result<Vec<usize>> {
        let mut digits = Vec::new();
        for symbol in symbols {
            let code_word = self
                .entries
                .get(symbol)
                .ok_or_else(|| Error::UnknownSymbol(symbol.clone()))?;
            digits.extend_from_slice(code_word.digits());
        }
        Ok(digits)
    }

    /// Splits `digits` back into symbols. Prefix tables are matched from the
    /// front, suffix tables from the back. An empty code word (one symbol
    /// alphabet) never matches.
    pub fn decode(&self, digits: &[usize]) -> Result<Vec<Symbol>> {
        if let Some(&digit) = digits.iter().find(|&&d| d >= self.radix) {
            return Err(Error::InvalidDigit(digit, self.radix));
        }
        let lookup: HashMap<&[usize], &Symbol> = self
            .entries
            .iter()
            .filter(|(_, c)| !c.is_empty())
            .map(|(s, c)| (c.digits(), s))
            .collect();

        let mut symbols = Vec::new();
        match self.mode {
            CodeMode::Prefix => {
                let mut start = 0;
                for end in 1..=digits.len() {
                    if let Some(&symbol) = lookup.get(&digits[start..end]) {
                        symbols.push(symbol.clone());
                        start = end;
                    }
                }
                if start != digits.len() {
                    return Err(Error::IncompleteCodeSequence(digits.len() - start));
                }
            }
            CodeMode::Suffix => {
                let mut end = digits.len();
                for start in (0..digits.len()).rev() {
                    if let Some(&symbol) = lookup.get(&digits[start..end]) {
                        symbols.push(symbol.clone());
                        end = start;
                    }
                }
                if end != 0 {
                    return Err(Error::IncompleteCodeSequence(end));
                }
                symbols.reverse();
            }
        }
        Ok(symbols)
    }
}

pub struct CodeExtractor;

impl CodeExtractor {
    /// Collects the code word of every real leaf. Placeholders are skipped.
    pub fn extract(tree: &Tree, mode: CodeMode) -> CodeTable {
        let mut entries = BTreeMap::new();
        let mut stack: Vec<(usize, Vec<usize>)> = vec![(tree.root_index, Vec::new())];
        while let Some((index, path)) = stack.pop() {
            let node = &tree.nodes[index];
            if let Some(symbol) = node.symbol() {
                let mut digits = path;
                if mode == CodeMode::Suffix {
                    digits.reverse();
                }
                entries.insert(symbol.clone(), CodeWord::from(digits));
                continue;
            }
            for (digit, &child) in node.child_indices().iter().enumerate().rev() {
                let mut child_path = Vec::with_capacity(path.len() + 1);
                child_path.extend_from_slice(&path);
                child_path.push(digit);
                stack.push((child, child_path));
            }
        }

        let table = CodeTable {
            radix: tree.radix,
            mode,
            entries,
        };
        logger::log_code_table_summary(
            table.radix,
            &mode.to_string(),
            table.len(),
            table.max_length(),
        );
        table
    }
}
