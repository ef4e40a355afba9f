use crate::distribution::DEFAULT_SMOOTHING_WEIGHT;
use crate::Arguments;
use clap::{
    arg, builder::RangedU64ValueParser, crate_authors, crate_description, crate_name,
    crate_version, value_parser, Arg, ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

const DEFAULT_RADIXES: [&str; 2] = ["2", "4"];

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_radix_argument(command);
        let command = Self::register_alphabet_argument(command);
        let command = Self::register_smoothing_argument(command);
        let command = Self::register_output_directory_argument(command);
        let command = Self::register_print_tree_argument(command);
        Self::register_threads_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_radix_argument(command: Command) -> Command {
        command.arg(Self::create_radix_argument())
    }

    fn register_alphabet_argument(command: Command) -> Command {
        command.arg(Self::create_alphabet_argument())
    }

    fn register_smoothing_argument(command: Command) -> Command {
        command.arg(Self::create_smoothing_argument())
    }

    fn register_output_directory_argument(command: Command) -> Command {
        command.arg(Self::create_output_directory_argument())
    }

    fn register_print_tree_argument(command: Command) -> Command {
        command.arg(Self::create_print_tree_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to UTF-8 text input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_radix_argument() -> Arg {
        arg!(radix: -r --radix <RADIX> "Number of children per inner tree node, may be repeated")
            .action(ArgAction::Append)
            .default_values(DEFAULT_RADIXES)
            .value_parser(RangedU64ValueParser::<usize>::new().range(2..))
    }

    fn create_alphabet_argument() -> Arg {
        arg!(alphabet: -a --alphabet [SYMBOLS] "Characters that receive a code word even if absent from the input")
            .required(false)
    }

    fn create_smoothing_argument() -> Arg {
        arg!(smoothing: -s --smoothing <WEIGHT> "Weight assigned to alphabet characters absent from the input")
            .default_value(DEFAULT_SMOOTHING_WEIGHT.to_string())
            .value_parser(value_parser!(f64))
    }

    fn create_output_directory_argument() -> Arg {
        arg!(output_directory: -o --output_directory <DIR> "Directory for CSV code tables and DOT trees")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_print_tree_argument() -> Arg {
        arg!(print_tree: --print_tree "Print the code tree of every radix")
            .action(ArgAction::SetTrue)
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            radixes: Self::extract_radix_argument(matches),
            alphabet: Self::extract_alphabet_argument(matches),
            smoothing: Self::extract_smoothing_argument(matches),
            output_directory: Self::extract_output_directory_argument(matches),
            print_tree: Self::extract_print_tree_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_radix_argument(matches: &ArgMatches) -> Vec<usize> {
        let mut radixes: Vec<usize> = matches
            .get_many::<usize>("radix")
            .expect("Radix must be provided, but was unset.")
            .copied()
            .collect();
        radixes.sort_unstable();
        radixes.dedup();
        radixes
    }

    fn extract_alphabet_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("alphabet")
            .cloned()
            .unwrap_or_default()
    }

    fn extract_smoothing_argument(matches: &ArgMatches) -> f64 {
        matches
            .get_one::<f64>("smoothing")
            .expect("Smoothing weight must be provided, but was unset.")
            .to_owned()
    }

    fn extract_output_directory_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("output_directory").cloned()
    }

    fn extract_print_tree_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("print_tree")
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
