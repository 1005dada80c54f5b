use crate::mock::{shared_key_client, MockHttpSend, ENDPOINT};
use adlg2_core::hash::base64_decode;
use adlg2_core::ErrorKind;
use adlg2_dfs::FilesystemListOptions;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

#[tokio::test]
async fn create_then_create_again() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mock = MockHttpSend::new();
    mock.push_response(201, &[], "");
    mock.push_response(409, &[], r#"{"error":{"code":"FilesystemAlreadyExists"}}"#);
    let client = shared_key_client(&mock).filesystem();

    assert!(client.create("testfs").await.unwrap());
    assert!(!client.create("testfs").await.unwrap());

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].uri, format!("{ENDPOINT}/testfs?resource=filesystem"));
}

#[tokio::test]
async fn create_sends_signed_headers() {
    let mock = MockHttpSend::new();
    mock.push_response(201, &[], "");
    let client = shared_key_client(&mock).filesystem();

    client.create("testfs").await.unwrap();

    let requests = mock.requests();
    let request = &requests[0];
    assert_eq!(request.header("x-ms-version"), Some("2018-11-09"));
    let authorization = request.header("authorization").unwrap();
    assert!(authorization.starts_with("SharedKey testaccount:"));
    let date = request.header("x-ms-date").unwrap();
    assert!(date.ends_with(" GMT"));
}

#[tokio::test]
async fn create_rejects_invalid_names_before_any_request() {
    let mock = MockHttpSend::new();
    let client = shared_key_client(&mock).filesystem();

    for name in ["ab", "-abc", "abc-", "ab--cd", "ABC", "abc_def"] {
        let err = client.create(name).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{name}");
    }

    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn delete_on_a_filesystem_that_was_never_created() {
    let mock = MockHttpSend::new();
    mock.push_response(404, &[], r#"{"error":{"code":"FilesystemNotFound"}}"#);
    let client = shared_key_client(&mock).filesystem();

    assert!(!client.delete("neverexisted").await.unwrap());
}

#[tokio::test]
async fn delete_accepted() {
    let mock = MockHttpSend::new();
    mock.push_response(202, &[], "");
    let client = shared_key_client(&mock).filesystem();

    assert!(client.delete("testfs").await.unwrap());
    assert_eq!(mock.requests()[0].method, "DELETE");
}

#[tokio::test]
async fn list_concatenates_continuation_pages() {
    let mock = MockHttpSend::new();
    mock.push_response(
        200,
        &[("x-ms-continuation", "cursor1")],
        r#"{"filesystems":[{"name":"fs1"},{"name":"fs2"}]}"#,
    );
    mock.push_response(200, &[], r#"{"filesystems":[{"name":"fs3"}]}"#);
    let client = shared_key_client(&mock).filesystem();

    let filesystems = client
        .list(&FilesystemListOptions::default())
        .await
        .unwrap();

    let names: Vec<&str> = filesystems.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["fs1", "fs2", "fs3"]);

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].uri.contains("resource=account"));
    assert!(requests[0].uri.contains("maxresults=5000"));
    assert!(!requests[0].uri.contains("continuation="));
    assert!(requests[1].uri.contains("continuation=cursor1"));
}

#[tokio::test]
async fn list_page_surfaces_the_cursor() {
    let mock = MockHttpSend::new();
    mock.push_response(
        200,
        &[("x-ms-continuation", "cursor1")],
        r#"{"filesystems":[{"name":"fs1"}]}"#,
    );
    let client = shared_key_client(&mock).filesystem();

    let (page, cursor) = client
        .list_page(&FilesystemListOptions::default())
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(cursor.as_deref(), Some("cursor1"));
}

#[tokio::test]
async fn list_returns_empty_on_not_found() {
    let mock = MockHttpSend::new();
    mock.push_response(404, &[], "");
    let client = shared_key_client(&mock).filesystem();

    let filesystems = client
        .list(&FilesystemListOptions {
            prefix: Some("nomatch".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(filesystems.is_empty());
}

#[tokio::test]
async fn get_properties_returns_none_on_not_found() {
    let mock = MockHttpSend::new();
    mock.push_response(404, &[], "");
    let client = shared_key_client(&mock).filesystem();

    assert_eq!(client.get_properties("missingfs").await.unwrap(), None);
}

#[tokio::test]
async fn set_properties_round_trips_through_get_properties() {
    let mock = MockHttpSend::new();
    mock.push_response(200, &[], "");
    let client = shared_key_client(&mock).filesystem();

    let properties = BTreeMap::from([("k".to_string(), "v".to_string())]);
    assert!(client
        .set_properties("testfs", Some(&properties))
        .await
        .unwrap());

    // The service echoes the stored blob back on get_properties.
    let stored = mock.requests()[0].header("x-ms-properties").unwrap().to_string();
    assert_eq!(stored, "k=dg==");

    mock.push_response(
        200,
        &[
            ("x-ms-namespace-enabled", "true"),
            ("x-ms-properties", stored.as_str()),
        ],
        "",
    );
    let fetched = client.get_properties("testfs").await.unwrap().unwrap();
    assert_eq!(fetched.namespace_enabled.as_deref(), Some("true"));

    let blob = fetched.properties.unwrap();
    let (key, value) = blob.split_once('=').unwrap();
    assert_eq!(key, "k");
    assert_eq!(base64_decode(value).unwrap(), b"v".to_vec());
}

#[tokio::test]
async fn set_properties_swallows_unexpected_failures() {
    let mock = MockHttpSend::new();
    mock.push_response(403, &[], r#"{"error":{"code":"AuthorizationFailure"}}"#);
    let client = shared_key_client(&mock).filesystem();

    assert!(!client.set_properties("testfs", None).await.unwrap());
}
