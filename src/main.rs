use std::env::args_os;
use std::process::ExitCode;

use radix_huffman::{analyze_text_file, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match analyze_text_file(&arguments) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Analysis failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
