fn main() {
    if let Err(e) = sprout_cli::run_cli() {
        sprout_logger::error(&format!("{e:#}"));
        if let Some(hint) = sprout_cli::hint_for(&e) {
            sprout_logger::info(&hint);
        }
        std::process::exit(1);
    }
}
