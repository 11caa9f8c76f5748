//! End-to-end harvest runs against a mock catalog server

use crate::iso_record;
use tempfile::TempDir;
use waf_harvest::config::Config;
use waf_harvest::harvester::Harvester;
use waf_harvest::output::{ConsoleReporter, ExtractionPass, HarvestEvent, RecordingReporter};
use waf_harvest::HarvestError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

fn harvester(server: &MockServer, dir: &TempDir) -> Harvester<RecordingReporter> {
    // Trailing slash is stripped before the index is requested
    Harvester::new(
        Config::default(),
        &format!("{}/erddap/metadata/iso19115/xml/", server.uri()),
        dir.path(),
        RecordingReporter::new(),
    )
    .expect("Failed to create harvester")
}

#[tokio::test]
async fn test_full_harvest() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/erddap/metadata/iso19115/xml", mock_server.uri());

    mount(
        &mock_server,
        "/erddap/metadata/iso19115/xml",
        200,
        r#"<html><body>
        <a href="a.xml">a.xml</a>
        <a href="b.txt">b.txt</a>
        <a href="c.xml">c.xml</a>
        </body></html>"#,
    )
    .await;

    let a = iso_record(&["chlorophyll"]);
    let c = iso_record(&[]);
    mount(&mock_server, "/erddap/metadata/iso19115/xml/a.xml", 200, &a).await;
    mount(&mock_server, "/erddap/metadata/iso19115/xml/c.xml", 200, &c).await;

    let dir = TempDir::new().unwrap();
    let mut harvester = harvester(&mock_server, &dir);
    let summary = harvester.run().await.expect("Harvest failed");

    assert_eq!(summary.links, vec!["a.xml", "c.xml"]);
    assert_eq!(summary.downloads.len(), 2);
    assert_eq!(summary.parse_failures, 0);
    assert_eq!(summary.downloads[0].path, dir.path().join("a.xml"));
    assert_eq!(summary.downloads[1].path, dir.path().join("c.xml"));
    assert_eq!(summary.total_bytes(), (a.len() + c.len()) as u64);

    assert_eq!(std::fs::read_to_string(dir.path().join("a.xml")).unwrap(), a);
    assert_eq!(std::fs::read_to_string(dir.path().join("c.xml")).unwrap(), c);
    assert!(!dir.path().join("b.txt").exists());

    let reporter = harvester.into_reporter();
    assert_eq!(
        reporter.links(),
        vec![format!("{}/a.xml", base), format!("{}/c.xml", base)]
    );
    assert_eq!(
        reporter.field_sets(),
        vec![&["chlorophyll".to_string()][..], &[][..]]
    );
}

#[tokio::test]
async fn test_events_follow_pipeline_order() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/erddap/metadata/iso19115/xml",
        200,
        r#"<a href="a.xml">a</a>"#,
    )
    .await;
    mount(
        &mock_server,
        "/erddap/metadata/iso19115/xml/a.xml",
        200,
        "<r><x>1</x></r>",
    )
    .await;

    let dir = TempDir::new().unwrap();
    let mut harvester = harvester(&mock_server, &dir);
    harvester.run().await.unwrap();

    let kinds: Vec<&str> = harvester
        .reporter()
        .events
        .iter()
        .map(|event| match event {
            HarvestEvent::LinkFound(_) => "link",
            HarvestEvent::Downloaded(_) => "downloaded",
            HarvestEvent::Preview { .. } => "preview",
            HarvestEvent::Fields { .. } => "fields",
            HarvestEvent::Element(_) => "element",
            HarvestEvent::ParseFailed { .. } => "failed",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["link", "downloaded", "preview", "fields", "element", "element"]
    );
}

#[tokio::test]
async fn test_index_failure_aborts_before_downloads() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, "/erddap/metadata/iso19115/xml", 503, "down").await;

    let dir = TempDir::new().unwrap();
    let mut harvester = harvester(&mock_server, &dir);
    let err = harvester.run().await.unwrap_err();

    assert!(matches!(err, HarvestError::Fetch { status: 503, .. }));
    assert!(harvester.reporter().events.is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_link_failure_aborts_remaining_links() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/erddap/metadata/iso19115/xml",
        200,
        r#"<a href="one.xml">1</a><a href="two.xml">2</a><a href="three.xml">3</a>"#,
    )
    .await;
    mount(
        &mock_server,
        "/erddap/metadata/iso19115/xml/one.xml",
        200,
        &iso_record(&["sst"]),
    )
    .await;
    mount(&mock_server, "/erddap/metadata/iso19115/xml/two.xml", 404, "").await;

    Mock::given(method("GET"))
        .and(path("/erddap/metadata/iso19115/xml/three.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<r/>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut harvester = harvester(&mock_server, &dir);
    let err = harvester.run().await.unwrap_err();

    match err {
        HarvestError::Fetch { url, status } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/two.xml"));
        }
        other => panic!("Expected Fetch error, got {:?}", other),
    }

    // Earlier downloads stay in place
    assert!(dir.path().join("one.xml").exists());
    assert!(!dir.path().join("two.xml").exists());
    assert!(!dir.path().join("three.xml").exists());
}

#[tokio::test]
async fn test_malformed_document_does_not_abort() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/erddap/metadata/iso19115/xml",
        200,
        r#"<a href="broken.xml">1</a><a href="good.xml">2</a>"#,
    )
    .await;
    mount(
        &mock_server,
        "/erddap/metadata/iso19115/xml/broken.xml",
        200,
        "<gmi:MI_Metadata><oops></gmi:MI_Metadata>",
    )
    .await;
    mount(
        &mock_server,
        "/erddap/metadata/iso19115/xml/good.xml",
        200,
        &iso_record(&["time", "sst"]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let mut harvester = harvester(&mock_server, &dir);
    let summary = harvester.run().await.expect("Parse errors must not abort");

    assert_eq!(summary.downloads.len(), 2);
    assert_eq!(summary.parse_failures, 2);

    let reporter = harvester.into_reporter();
    let failed: Vec<ExtractionPass> = reporter
        .events
        .iter()
        .filter_map(|event| match event {
            HarvestEvent::ParseFailed { path, pass, .. } => {
                assert_eq!(path, &dir.path().join("broken.xml"));
                Some(*pass)
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        failed,
        vec![ExtractionPass::Fields, ExtractionPass::Enumeration]
    );
    assert_eq!(
        reporter.field_sets(),
        vec![&["time".to_string(), "sst".to_string()][..]]
    );
}

#[tokio::test]
async fn test_nested_href_saved_under_basename() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/erddap/metadata/iso19115/xml",
        200,
        r#"<a href="2024/records/deep.xml">deep</a>"#,
    )
    .await;
    mount(
        &mock_server,
        "/erddap/metadata/iso19115/xml/2024/records/deep.xml",
        200,
        "<deep/>",
    )
    .await;

    let dir = TempDir::new().unwrap();
    let mut harvester = harvester(&mock_server, &dir);
    let summary = harvester.run().await.unwrap();

    assert_eq!(summary.downloads[0].path, dir.path().join("deep.xml"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("deep.xml")).unwrap(),
        "<deep/>"
    );
}

#[tokio::test]
async fn test_empty_index_downloads_nothing() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/erddap/metadata/iso19115/xml",
        200,
        "<html><body>No records yet</body></html>",
    )
    .await;

    let dir = TempDir::new().unwrap();
    let mut harvester = harvester(&mock_server, &dir);
    let summary = harvester.run().await.unwrap();

    assert!(summary.links.is_empty());
    assert!(summary.downloads.is_empty());
    assert!(harvester.reporter().events.is_empty());
}

#[tokio::test]
async fn test_console_report() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, "/waf", 200, r#"<a href="a.xml">a</a>"#).await;
    mount(&mock_server, "/waf/a.xml", 200, "<r>v</r>").await;

    let dir = TempDir::new().unwrap();
    let mut harvester = Harvester::new(
        Config::default(),
        &format!("{}/waf", mock_server.uri()),
        dir.path(),
        ConsoleReporter::new(Vec::new()),
    )
    .unwrap();
    harvester.run().await.unwrap();

    let output = String::from_utf8(harvester.into_reporter().into_inner()).unwrap();
    let local = dir.path().join("a.xml");
    let expected = format!(
        "Found XML file: {uri}/waf/a.xml\n\
         Downloaded file to {path}\n\
         Preview of {path}:\n\
         <r>v</r>\n\
         No values found\n\
         r: v\n",
        uri = mock_server.uri(),
        path = local.display()
    );
    assert_eq!(output, expected);
}
