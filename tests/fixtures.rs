use std::collections::BTreeMap;

use plainenv::{Entry, apply_bytes, parse_bytes};

#[test]
fn parses_unix_fixture() {
    let fixture = include_bytes!("fixtures/unix.env");
    let map = to_map(parse_bytes(fixture).expect("fixture should parse"));

    assert_eq!(map.get("SERVER_HOST").expect("SERVER_HOST"), "localhost");
    assert_eq!(map.get("SERVER_PORT").expect("SERVER_PORT"), "7777");
    assert_eq!(
        map.get("DATABASE_URL").expect("DATABASE_URL"),
        "postgres://user:pa=ss@db:5432/app"
    );
    assert_eq!(map.get("GREETING").expect("GREETING"), " hello world ");
    assert_eq!(map.get("EMPTY").expect("EMPTY"), "");
}

#[test]
fn parses_windows_fixture() {
    let fixture = include_bytes!("fixtures/windows.env");
    let entries = parse_bytes(fixture).expect("fixture should parse");

    let lines: Vec<u32> = entries.iter().map(|entry| entry.line).collect();
    assert_eq!(lines, vec![1, 4, 5, 6]);

    let map = to_map(entries);
    assert_eq!(map.get("SOMETHING").expect("SOMETHING"), "nice");
    assert_eq!(map.get("ELSE").expect("ELSE"), "notnice");
    assert_eq!(map.get("PATH_LIKE").expect("PATH_LIKE"), "C:\\Tools;C:\\Bin");
    assert_eq!(map.get("LAST").expect("LAST"), "no trailing newline");
}

#[test]
fn apply_matches_parse_for_fixtures() {
    for fixture in [
        &include_bytes!("fixtures/unix.env")[..],
        &include_bytes!("fixtures/windows.env")[..],
    ] {
        let mut applied: BTreeMap<String, String> = BTreeMap::new();
        apply_bytes(fixture, &mut applied).expect("fixture should apply");
        let parsed = to_map(parse_bytes(fixture).expect("fixture should parse"));
        assert_eq!(applied, parsed);
    }
}

fn to_map(entries: Vec<Entry>) -> BTreeMap<String, String> {
    entries
        .into_iter()
        .map(|entry| (entry.key, entry.value))
        .collect()
}
