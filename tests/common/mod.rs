use conv_testgen::settings::Settings;
use std::path::Path;

/// the default settings writing into a fresh `test_data/<name>` directory
pub fn scratch_settings(name: &str) -> Settings {
    let mut settings = Settings::new(vec!["configs/default.toml".into()]).unwrap();
    settings.output_dir = format!("test_data/{}", name);
    let _ = std::fs::remove_dir_all(&settings.output_dir);
    settings
}

pub fn cleanup(settings: &Settings) {
    if Path::new(&settings.output_dir).exists() {
        std::fs::remove_dir_all(&settings.output_dir).unwrap();
    }
}

/// the decimal values of a coe file, in file order
pub fn coe_values(text: &str) -> Vec<u64> {
    text.lines()
        .skip(2)
        .map(|l| l.trim_end_matches(|c: char| c == ',' || c == ';').parse().unwrap())
        .collect()
}
