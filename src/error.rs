use std::fmt::Display;

use crate::distribution::Symbol;

#[derive(Debug)]
pub enum Error {
    EmptyAlphabet,
    InvalidFrequency(Symbol, f64),
    DuplicateSymbol(Symbol),
    InvalidRadix(usize),
    DegenerateDistribution,
    InvariantViolation(String),
    SymbolNotInDistribution(Symbol),
    MissingCodeWord(Symbol),
    UnknownSymbol(Symbol),
    InvalidDigit(usize, usize),
    IncompleteCodeSequence(usize),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToReadInputFile(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToWriteExport(String, std::io::Error),
    WorkerPoolDisconnected,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAlphabet => {
                write!(f, "Unable to build a code tree for an empty alphabet")
            }
            Self::InvalidFrequency(symbol, weight) => {
                write!(
                    f,
                    "Weight {} of symbol '{}' is not a finite, non-negative number",
                    weight, symbol
                )
            }
            Self::DuplicateSymbol(symbol) => {
                write!(f, "Symbol '{}' occurs more than once in distribution", symbol)
            }
            Self::InvalidRadix(radix) => {
                write!(f, "Radix must be at least 2, but was {}", radix)
            }
            Self::DegenerateDistribution => {
                write!(
                    f,
                    "Total weight of distribution is zero, normalization is undefined"
                )
            }
            Self::InvariantViolation(message) => {
                write!(f, "Internal invariant violated: {}", message)
            }
            Self::SymbolNotInDistribution(symbol) => {
                write!(
                    f,
                    "Code table contains symbol '{}' which is not part of the distribution",
                    symbol
                )
            }
            Self::MissingCodeWord(symbol) => {
                write!(f, "No code word assigned to symbol '{}'", symbol)
            }
            Self::UnknownSymbol(symbol) => {
                write!(f, "Symbol '{}' not present in code table", symbol)
            }
            Self::InvalidDigit(digit, radix) => {
                write!(f, "Digit {} is out of range for radix {}", digit, radix)
            }
            Self::IncompleteCodeSequence(remaining) => {
                write!(
                    f,
                    "Code sequence ends with {} digits that do not form a code word",
                    remaining
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToReadInputFile(path, error) => {
                write!(f, "Unable to read input file '{}': {}", path, error)
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToWriteExport(path, error) => {
                write!(f, "Failed to write export file '{}': {}", path, error)
            }
            Self::WorkerPoolDisconnected => {
                write!(f, "Worker pool finished without delivering all results")
            }
        }
    }
}

impl std::error::Error for Error {}
