const LOG_CONFIGURATION_FILE: &str = "log4rs.yaml";

#[ctor::ctor]
fn init() {
    if let Err(e) = log4rs::init_file(LOG_CONFIGURATION_FILE, Default::default()) {
        eprintln!(
            "Logging disabled, unable to load '{}': {}",
            LOG_CONFIGURATION_FILE, e
        );
    }
}

pub fn log_code_table_summary(radix: usize, mode: &str, entries: usize, longest: usize) {
    log::info!(
        "radix {} {} code table: {} entries, longest code word {} digits",
        radix,
        mode,
        entries,
        longest
    );
}
