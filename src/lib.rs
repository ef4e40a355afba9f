use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

pub use cli::CLIParser;
use distribution::FrequencyEstimator;
use error::Error;
use report::RadixAnalysis;
use threadpool::ThreadPool;

mod cli;
pub mod distribution;
pub mod error;
pub mod export;
pub mod huffman;
mod logger;
pub mod report;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    radixes: Vec<usize>,
    alphabet: String,
    smoothing: f64,
    output_directory: Option<PathBuf>,
    print_tree: bool,
    number_of_threads: usize,
}

fn path_to_string(file_path: &Path) -> String {
    file_path.to_string_lossy().into_owned()
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(path_to_string(file_path), e))
}

fn read_input_file(file_path: &Path) -> Result<String> {
    let mut text = String::new();
    open_input_file(file_path)?
        .read_to_string(&mut text)
        .map_err(|e| Error::UnableToReadInputFile(path_to_string(file_path), e))?;
    Ok(text)
}

/// Drops one trailing line terminator, as left by editors and `echo`.
fn strip_line_terminator(text: &str) -> &str {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix('\r').unwrap_or(text)
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(path_to_string(file_path), e))
}

fn export_analysis(
    directory: &Path,
    analysis: &RadixAnalysis,
    distribution: &distribution::FrequencyDistribution,
) -> Result<()> {
    let csv_path = directory.join(format!("radix_{}_codes.csv", analysis.radix()));
    let mut csv_writer = BufWriter::new(open_output_file(&csv_path)?);
    export::write_code_table_csv(&mut csv_writer, analysis, distribution)
        .map_err(|e| Error::FailedToWriteExport(path_to_string(&csv_path), e))?;

    let dot_path = directory.join(format!("radix_{}_tree.dot", analysis.radix()));
    let mut dot_writer = BufWriter::new(open_output_file(&dot_path)?);
    export::write_tree_dot(&mut dot_writer, &analysis.tree)
        .map_err(|e| Error::FailedToWriteExport(path_to_string(&dot_path), e))?;

    log::info!(
        "radix {} exported to {} and {}",
        analysis.radix(),
        csv_path.display(),
        dot_path.display()
    );
    Ok(())
}

/// Reads the input text, derives the codes for every requested radix and
/// returns the printable report. Export files are written as a side effect
/// when an output directory is configured.
pub fn analyze_text_file(arguments: &Arguments) -> Result<String> {
    let text = read_input_file(&arguments.input_file)?;
    let estimator = FrequencyEstimator::new(&arguments.alphabet, arguments.smoothing);
    let distribution = Arc::new(estimator.estimate(strip_line_terminator(&text))?);
    log::info!(
        "{} symbols estimated from '{}'",
        distribution.len(),
        arguments.input_file.display()
    );

    let threadpool = ThreadPool::new(arguments.number_of_threads);
    let analyses =
        report::analyze_radixes(Arc::clone(&distribution), &arguments.radixes, &threadpool)?;

    let mut output = String::new();
    for analysis in &analyses {
        output.push_str(&report::format_code_table(analysis, &distribution));
        output.push('\n');
        if arguments.print_tree {
            output.push_str(&format!("Radix {} tree:\n{}\n", analysis.radix(), analysis.tree));
        }
    }
    output.push_str(&report::format_efficiency_table(&analyses));

    if let Some(directory) = &arguments.output_directory {
        for analysis in &analyses {
            export_analysis(directory, analysis, &distribution)?;
        }
    }
    Ok(output)
}

#[cfg(test)]
mod test {
    use super::strip_line_terminator;

    #[test]
    fn test_strip_line_terminator() {
        assert_eq!(strip_line_terminator("ABBA\n"), "ABBA");
        assert_eq!(strip_line_terminator("ABBA\r\n"), "ABBA");
        assert_eq!(strip_line_terminator("ABBA"), "ABBA");
        assert_eq!(strip_line_terminator("AB\nBA\n\n"), "AB\nBA\n", "Only one terminator is removed");
        assert_eq!(strip_line_terminator(""), "");
    }
}
