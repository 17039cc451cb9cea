//! Integration tests running each checker over the fixture mod in testdata/.

use std::path::{Path, PathBuf};

use modcheck::{
    render, validate, Checker, Config, Defect, DefectCategory, KindDefects, RenderOptions,
    SymbolKind, ValidationReport,
};

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/mod")
}

fn run(checker: Checker) -> ValidationReport {
    validate(checker, &fixture_root(), &Config::default(), false).expect("fixture validates")
}

fn kind(report: &ValidationReport, kind: SymbolKind) -> &KindDefects {
    report
        .kinds
        .iter()
        .find(|k| k.kind == kind)
        .expect("kind is checked")
}

fn names(defects: &[Defect]) -> Vec<&str> {
    defects.iter().map(|d| d.name.as_str()).collect()
}

fn sites(defect: &Defect) -> Vec<String> {
    defect.locations.iter().map(|l| l.to_string()).collect()
}

#[test]
fn test_unused_country_flag() {
    let report = run(Checker::Variables);
    let country = kind(&report, SymbolKind::CountryFlag);

    assert_eq!(names(&country.unused), vec!["my_flag"]);
    assert_eq!(sites(&country.unused[0]), vec!["events/md_events.txt:9"]);
}

#[test]
fn test_missing_country_flag() {
    let report = run(Checker::Variables);
    let country = kind(&report, SymbolKind::CountryFlag);

    assert_eq!(names(&country.missing), vec!["ghost_flag"]);
    assert_eq!(sites(&country.missing[0]), vec!["events/md_events.txt:27"]);
}

#[test]
fn test_cleared_country_flag() {
    let report = run(Checker::Variables);
    let country = kind(&report, SymbolKind::CountryFlag);

    assert_eq!(names(&country.cleared), vec!["never_set_flag"]);
    assert_eq!(sites(&country.cleared[0]), vec!["events/md_events.txt:36"]);
}

#[test]
fn test_consistent_global_and_state_flags() {
    let report = run(Checker::Variables);
    assert_eq!(kind(&report, SymbolKind::GlobalFlag).issue_count(), 0);
    // Set in history/ with the block form, used in events/ with the block form
    assert_eq!(kind(&report, SymbolKind::StateFlag).issue_count(), 0);
}

#[test]
fn test_event_targets() {
    let report = run(Checker::Variables);
    let targets = kind(&report, SymbolKind::EventTarget);

    // md_leader is saved and used; ROOT only appears in localisation text
    assert_eq!(names(&targets.missing), vec!["alias_target"]);
    assert_eq!(
        sites(&targets.missing[0]),
        vec!["common/country_tag_aliases/md_aliases.txt:2"]
    );
    assert!(targets.unused.is_empty());
    assert!(targets.cleared.is_empty());
}

#[test]
fn test_allow_list_placeholders_and_comments_are_never_reported() {
    let report = run(Checker::Variables);
    let text = render(&report, &RenderOptions::default());

    assert!(!text.contains("kr_current_version"));
    assert!(!text.contains("placeholder_flag"));
    assert!(!text.contains("commented_flag"));
    // gfx/ is ignored by default
    assert!(!text.contains("gfx_only_flag"));
    assert_eq!(report.issue_count(), 4);
}

#[test]
fn test_scripted_loc_suffix_rule() {
    let report = run(Checker::ScriptedLocalisation);
    let scl = kind(&report, SymbolKind::ScriptedLocalisation);

    // [debt_display] in localisation has no scripted suffix, so it is not a use
    assert_eq!(names(&scl.unused), vec!["debt_display"]);
    assert_eq!(
        sites(&scl.unused[0]),
        vec!["common/scripted_localisation/md_debt.txt:5"]
    );
    assert_eq!(names(&scl.missing), vec!["orphan_scl"]);
    assert!(!scl.checks_clear);
    assert_eq!(report.issue_count(), 2);
}

#[test]
fn test_interface_reference_counts_as_use() {
    let report = run(Checker::ScriptedLocalisation);
    let scl = kind(&report, SymbolKind::ScriptedLocalisation);

    let all: Vec<&str> = DefectCategory::ALL
        .iter()
        .flat_map(|c| names(scl.category(*c)))
        .collect();
    assert!(!all.contains(&"gui_only_scl"));
    assert!(!all.contains(&"debt_display_scl"));
}

#[test]
fn test_report_is_deterministic() {
    let options = RenderOptions {
        root: "mod".to_string(),
        ..Default::default()
    };
    let first = render(&run(Checker::Variables), &options);
    let second = render(&run(Checker::Variables), &options);
    assert_eq!(first, second);
}

#[test]
fn test_config_filters_apply() {
    let config = Config::parse_str(
        "kinds:\n  country_flag:\n    ignore: [ghost_]\n    ignore_unused: [my_]\nignored_dirs: []\n",
    )
    .unwrap();
    let report = validate(Checker::Variables, &fixture_root(), &config, false).unwrap();
    let country = kind(&report, SymbolKind::CountryFlag);

    assert!(country.missing.iter().all(|d| d.name != "ghost_flag"));
    assert!(country.unused.is_empty());
    // With no ignored directories, gfx/ is scanned too
    assert!(country.missing.iter().any(|d| d.name == "gfx_only_flag"));
}

#[test]
fn test_excluded_paths() {
    let config = Config::parse_str("excluded_paths: [\"common/country_tag_aliases/**\"]\n").unwrap();
    let report = validate(Checker::Variables, &fixture_root(), &config, false).unwrap();
    assert!(kind(&report, SymbolKind::EventTarget).missing.is_empty());
}
