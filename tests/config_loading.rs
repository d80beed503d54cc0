use feed_ranker::RankingConfig;
use std::path::PathBuf;

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("feed-ranker-{}-{}", std::process::id(), name))
        .join("ranking.toml")
}

#[test]
fn defaults_match_production_coefficients() {
    let config = RankingConfig::default();

    assert!((config.trending.views - 0.3).abs() < 1e-9);
    assert!((config.trending.decay_hours - 48.0).abs() < 1e-9);
    assert!((config.personal.follow_bonus - 100.0).abs() < 1e-9);
    assert_eq!(config.chill.ideal_capacity, (6, 12));
    assert!((config.chill.hype_threshold - 500.0).abs() < 1e-9);
    assert!((config.pricing.paid_saves - 6.0).abs() < 1e-9);
    assert_eq!(config.chill.keywords.len(), 8);
}

#[test]
fn partial_file_keeps_defaults_for_missing_keys() {
    let path = scratch_path("partial");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[chill]\nhype_threshold = 900.0\n").unwrap();

    let config = RankingConfig::from_file(&path).unwrap();

    assert!((config.chill.hype_threshold - 900.0).abs() < 1e-9);
    assert!((config.chill.hype_penalty - 0.7).abs() < 1e-9);
    assert!((config.personal.tag_affinity - 10.0).abs() < 1e-9);
}

#[test]
fn written_config_reloads_identically() {
    let path = scratch_path("roundtrip");
    let mut config = RankingConfig::default();
    config.today.urgency_per_hour = 3.5;

    config.write(&path).unwrap();
    let reloaded = RankingConfig::from_file(&path).unwrap();

    assert!((reloaded.today.urgency_per_hour - 3.5).abs() < 1e-9);
    assert_eq!(reloaded.chill.keywords, config.chill.keywords);
}

#[test]
fn shipped_config_parses() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/ranking.toml");
    let config = RankingConfig::from_file(&path).unwrap();

    assert!((config.trending.shares - 10.0).abs() < 1e-9);
    assert_eq!(config.chill.acceptable_capacity, (4, 15));
}

#[test]
fn invalid_file_reports_parse_error() {
    let path = scratch_path("invalid");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[trending\nviews = ").unwrap();

    let err = RankingConfig::from_file(&path).unwrap_err();
    assert!(err.contains("failed to parse config"));
}
