//! Integration tests for config and patterns loading from fixture files.

use std::fs;
use std::path::Path;

use media_strip::strip_rename::{PatternSet, StripConfig, StripRenameConfig, matcher};

const SAMPLE_CONFIG: &str = "tests/fixtures/sample_config.toml";
const SAMPLE_PATTERNS: &str = "tests/fixtures/patterns.txt";

/// Read the sample config file content.
fn read_sample_config() -> String {
    fs::read_to_string(SAMPLE_CONFIG).expect("Failed to read sample config file")
}

#[test]
fn sample_config_is_valid_toml() {
    let config_content = read_sample_config();
    let result: Result<toml::Value, _> = toml::from_str(&config_content);
    assert!(result.is_ok(), "Sample config should be valid TOML: {:?}", result.err());
}

#[test]
fn sample_config_parses_strip_rename_section() {
    let config = StripRenameConfig::from_toml_str(&read_sample_config()).expect("should parse");
    assert!(config.patterns_file.is_some());
    assert_eq!(config.media_extensions, vec!["mkv", "mp4", "avi"]);
    assert_eq!(config.languages.len(), 2);
    assert_eq!(config.languages[1].name, "Finnish");
    assert!(!config.dryrun);
}

#[test]
fn sample_config_languages_are_used() {
    let user_config = StripRenameConfig::from_toml_str(&read_sample_config()).expect("should parse");
    let config = StripConfig::from_user_config(user_config);
    assert!(config.languages[1].matches("Show.S01E01.fi.srt"));
    assert_eq!(config.media_extensions.len(), 3);
}

#[test]
fn sample_patterns_file_loads() {
    let patterns = PatternSet::from_file(Path::new(SAMPLE_PATTERNS)).expect("should load");
    assert_eq!(patterns.direct, vec!["WEB-DL", ".1080p", ".x264-GROUP"]);
    assert_eq!(patterns.regex.len(), 2);
    assert_eq!(patterns.subtitle.len(), 2);
}

#[test]
fn sample_patterns_match_release_names() {
    let patterns = PatternSet::from_file(Path::new(SAMPLE_PATTERNS)).expect("should load");

    assert_eq!(
        matcher::find(&patterns, "Show.S02E03.HDTV.x264.mkv").as_deref(),
        Some(".HDTV.x264")
    );
    assert_eq!(
        matcher::find(&patterns, "Movie.2019.[rarbg].WEB-DL.mp4").as_deref(),
        Some(".[rarbg]")
    );
    assert_eq!(matcher::find(&patterns, "Movie.2019.WEB-DL.mp4").as_deref(), Some("WEB-DL"));
    assert_eq!(matcher::find(&patterns, "Movie.2019.mp4"), None);
}

#[test]
fn sample_patterns_detect_subtitles() {
    let patterns = PatternSet::from_file(Path::new(SAMPLE_PATTERNS)).expect("should load");
    assert!(patterns.is_subtitle("movie.en.sub1.srt"));
    assert!(patterns.is_subtitle("movie.es.forced.srt"));
    assert!(!patterns.is_subtitle("movie.en.srt"));
}
