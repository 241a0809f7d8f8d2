mod common;

use pom_generator::snapshot::html_source::{parse_html, HtmlSnapshotSource};
use pom_generator::snapshot::probe::{JsonSnapshotSource, ProbeSnapshotSource};
use pom_generator::snapshot::snapshot_model::Purpose;
use pom_generator::snapshot::source::SnapshotSource;
use pom_generator::PomError;

use common::fixture;

// ============================================================================
// Static HTML parsing
// ============================================================================

#[test]
fn login_fixture_keeps_only_rendered_elements() {
    let source = HtmlSnapshotSource::from_file(&fixture("login.html"), Some("https://example.com/login")).unwrap();
    let snapshot = source.produce().unwrap();

    assert_eq!(snapshot.title, "Login");
    assert_eq!(snapshot.url, "https://example.com/login");

    let summary: Vec<(String, Purpose)> = snapshot
        .elements
        .iter()
        .map(|e| (e.tag_name.clone(), e.purpose))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("input".to_string(), Purpose::Interaction),
            ("input".to_string(), Purpose::Interaction),
            ("input".to_string(), Purpose::Interaction),
            ("button".to_string(), Purpose::Interaction),
            ("a".to_string(), Purpose::Interaction),
            ("h1".to_string(), Purpose::Data),
            ("p".to_string(), Purpose::Data),
            ("li".to_string(), Purpose::Data),
            ("li".to_string(), Purpose::Data),
        ]
    );
}

#[test]
fn hidden_input_and_hidden_subtrees_are_dropped() {
    let source = HtmlSnapshotSource::from_file(&fixture("login.html"), None).unwrap();
    let snapshot = source.produce().unwrap();

    assert!(snapshot.elements.iter().all(|e| e.name.as_deref() != Some("csrf")));
    assert!(snapshot
        .elements
        .iter()
        .all(|e| e.text_content != "Secret link" && e.text_content != "Ghost"));
    assert!(snapshot.elements.iter().any(|e| e.text_content == "Shown again"));
}

#[test]
fn file_source_defaults_to_file_url() {
    let source = HtmlSnapshotSource::from_file(&fixture("login.html"), None).unwrap();
    let snapshot = source.produce().unwrap();
    assert!(snapshot.url.starts_with("file://"));
    assert!(snapshot.url.ends_with("login.html"));
}

#[test]
fn missing_file_is_snapshot_unavailable() {
    let err = HtmlSnapshotSource::from_file(&fixture("does-not-exist.html"), None)
        .err()
        .unwrap();
    assert!(matches!(err, PomError::SnapshotUnavailable(_)));
}

#[test]
fn xpath_uses_id_or_positional_path() {
    let page = parse_html(
        r#"<html><body><div><input id="a"><input><input></div></body></html>"#,
        "https://example.com/",
    );

    let xpaths: Vec<&str> = page
        .elements
        .iter()
        .filter(|e| e.tag == "input")
        .filter_map(|e| e.xpath.as_deref())
        .collect();

    assert_eq!(
        xpaths,
        vec![
            r#"//*[@id="a"]"#,
            "/html/body/div/input[2]",
            "/html/body/div/input[3]",
        ]
    );
}

#[test]
fn attributes_are_sorted_by_name() {
    let page = parse_html(
        r#"<html><body><span data-z="1" class="c" data-a="2">x</span></body></html>"#,
        "https://example.com/",
    );
    let span = page.elements.iter().find(|e| e.tag == "span").unwrap();
    let names: Vec<&str> = span.attributes.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["class", "data-a", "data-z"]);
}

#[test]
fn inline_styles_drive_visibility() {
    let page = parse_html(
        r#"<html><body>
            <button style="display: none">A</button>
            <button style="width: 0px">B</button>
            <button height="0">C</button>
            <button onclick="go()">D</button>
        </body></html>"#,
        "https://example.com/",
    );

    let snapshot = pom_generator::snapshot::extractor::build_snapshot(&page);
    let texts: Vec<&str> = snapshot.elements.iter().map(|e| e.text_content.as_str()).collect();
    assert_eq!(texts, vec!["D"]);

    let d = page.elements.iter().find(|e| e.text.trim() == "D").unwrap();
    assert!(d.has_click_handler);
}

// ============================================================================
// Probe and captured JSON
// ============================================================================

#[test]
fn json_snapshot_file_feeds_the_extractor() {
    let snapshot = JsonSnapshotSource::new(fixture("probe_output.json"))
        .produce()
        .unwrap();

    assert_eq!(snapshot.title, "Search Results");
    assert_eq!(snapshot.elements.len(), 4);
    assert_eq!(snapshot.elements[3].text_content, "12 results");
    assert_eq!(snapshot.elements[3].purpose, Purpose::Data);
}

#[test]
fn malformed_json_snapshot_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonSnapshotSource::new(&path).produce().unwrap_err();
    assert!(matches!(err, PomError::SnapshotUnavailable(_)));
}

#[cfg(unix)]
#[test]
fn probe_stdout_is_parsed_as_raw_page() {
    // The probe receives the "URL" as its last argument; here it is a file to cat.
    let path = fixture("probe_output.json");
    let probe = ProbeSnapshotSource::new(
        "sh",
        vec!["-c".into(), "cat \"$1\"".into(), "probe".into()],
        path.to_str().unwrap(),
    );

    let snapshot = probe.produce().unwrap();
    assert_eq!(snapshot.url, "https://shop.example.com/search");
    assert_eq!(snapshot.elements.len(), 4);
}

#[cfg(unix)]
#[test]
fn failing_probe_is_snapshot_unavailable() {
    let probe = ProbeSnapshotSource::new("sh", vec!["-c".into(), "exit 3".into()], "https://x");
    let err = probe.produce().unwrap_err();
    assert!(matches!(err, PomError::SnapshotUnavailable(_)));
}

#[test]
fn missing_probe_program_is_snapshot_unavailable() {
    let probe = ProbeSnapshotSource::new("definitely-not-a-real-probe-binary", vec![], "https://x");
    let err = probe.produce().unwrap_err();
    assert!(matches!(err, PomError::SnapshotUnavailable(_)));
}

#[test]
fn probe_command_line_is_split_on_whitespace() {
    let probe = ProbeSnapshotSource::from_command_line("node probe/extract.js --headless", "https://x").unwrap();
    assert_eq!(probe.program, "node");
    assert_eq!(probe.args, vec!["probe/extract.js", "--headless"]);

    let err = ProbeSnapshotSource::from_command_line("   ", "https://x").err().unwrap();
    assert!(matches!(err, PomError::Config(_)));
}
