use radix_huffman::{analyze_text_file, error::Error, CLIParser};
use std::fs;
use std::path::PathBuf;

const INPUT_TEXT_PATH: &str = "tests/sample.txt";

fn get_project_root_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn get_input_text_path() -> PathBuf {
    let mut root_path = get_project_root_path();
    root_path.push(INPUT_TEXT_PATH);
    root_path
}

fn get_output_directory(name: &str) -> PathBuf {
    let mut directory = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
    directory.push(name);
    directory
}

fn prepare_output_directory(directory: &PathBuf) {
    if directory.exists() {
        fs::remove_dir_all(directory).expect("Deletion of output directory failed");
    }
    fs::create_dir_all(directory).expect("Creation of output directory failed");
}

#[test]
fn test_analyze_text_file_report() {
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![
        "test",
        get_input_text_path().to_str().unwrap(),
        "-r",
        "2",
        "-r",
        "3",
        "--print_tree",
    ]);
    let report = analyze_text_file(&arguments).expect("Analysis failed");
    assert!(report.contains("Huffman codes for radix 2 alphabet {0, 1}:"));
    assert!(report.contains("Huffman codes for radix 3 alphabet {0, 1, 2}:"));
    assert!(report.contains("Radix 3 tree:\nRoot: (1.0000)"));
    assert!(report.contains("'A'"));
    assert!(report.contains("Code redundancy:"));
    assert!(!report.contains("Huffman codes for radix 4"));
}

#[test]
fn test_analyze_text_file_exports() {
    let output_directory = get_output_directory("analyze_text_exports");
    prepare_output_directory(&output_directory);
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![
        "test",
        get_input_text_path().to_str().unwrap(),
        "--alphabet",
        "ABCDNR",
        "--output_directory",
        output_directory.to_str().unwrap(),
    ]);
    analyze_text_file(&arguments).expect("Analysis failed");

    for radix in [2, 4] {
        let csv_path = output_directory.join(format!("radix_{}_codes.csv", radix));
        let dot_path = output_directory.join(format!("radix_{}_tree.dot", radix));
        let csv = fs::read_to_string(&csv_path).expect("CSV export missing");
        let dot = fs::read_to_string(&dot_path).expect("DOT export missing");
        assert!(csv.starts_with("symbol,prefix_code,suffix_code,frequency\r\n"));
        assert!(csv.contains("\r\nC,"), "Smoothed alphabet symbol must be exported");
        assert!(dot.starts_with(&format!("digraph huffman_radix_{} {{", radix)));
    }
    fs::remove_dir_all(output_directory).expect("Deletion of output directory failed");
}

#[test]
fn test_trailing_line_terminator_is_not_coded() {
    let output_directory = get_output_directory("analyze_text_line_terminator");
    prepare_output_directory(&output_directory);
    let input_file = output_directory.join("line.txt");
    fs::write(&input_file, "ABBA\r\n").expect("Writing input file failed");
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![
        "test",
        input_file.to_str().unwrap(),
        "-r",
        "2",
        "--output_directory",
        output_directory.to_str().unwrap(),
    ]);
    analyze_text_file(&arguments).expect("Analysis failed");
    let csv = fs::read_to_string(output_directory.join("radix_2_codes.csv"))
        .expect("CSV export missing");
    assert_eq!(
        csv,
        "symbol,prefix_code,suffix_code,frequency\r\nA,0,0,0.500000\r\nB,1,1,0.500000\r\n"
    );
    fs::remove_dir_all(output_directory).expect("Deletion of output directory failed");
}

#[test]
fn test_analyze_missing_input_file() {
    let mut cli_parser = CLIParser::new();
    let missing = get_project_root_path().join("tests/does_not_exist.txt");
    let arguments = cli_parser.parse(vec!["test", missing.to_str().unwrap()]);
    let result = analyze_text_file(&arguments);
    assert!(matches!(
        result,
        Err(Error::UnableToOpenInputFileForReading(_, _))
    ));
}
