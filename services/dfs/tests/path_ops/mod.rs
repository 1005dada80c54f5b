use crate::mock::{shared_key_client, MockHttpSend, ENDPOINT};
use adlg2_core::ErrorKind;
use adlg2_dfs::{
    LeaseAction, LeaseOptions, PathListOptions, ResourceType, UpdateAction, UpdateOptions,
};
use bytes::Bytes;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn create_without_overwrite_sends_if_none_match() {
    let mock = MockHttpSend::new();
    mock.push_response(201, &[], "");
    mock.push_response(201, &[], "");
    let client = shared_key_client(&mock).path();

    assert!(client
        .create("testfs", "d1/f1", ResourceType::File, false)
        .await
        .unwrap());
    assert!(client
        .create("testfs", "d1/f1", ResourceType::File, true)
        .await
        .unwrap());

    let requests = mock.requests();
    assert_eq!(
        requests[0].uri,
        format!("{ENDPOINT}/testfs/d1/f1?resource=file")
    );
    assert_eq!(requests[0].header("if-none-match"), Some("*"));
    assert_eq!(requests[1].header("if-none-match"), None);
}

#[tokio::test]
async fn create_directory_reports_conflict_as_false() {
    let mock = MockHttpSend::new();
    mock.push_response(409, &[], r#"{"error":{"code":"PathAlreadyExists"}}"#);
    let client = shared_key_client(&mock).path();

    assert!(!client
        .create("testfs", "d1", ResourceType::Directory, false)
        .await
        .unwrap());
    assert!(mock.requests()[0].uri.ends_with("?resource=directory"));
}

#[tokio::test]
async fn delete_follows_continuation_batches() {
    let mock = MockHttpSend::new();
    mock.push_response(200, &[("x-ms-continuation", "batch2")], "");
    mock.push_response(200, &[], "");
    let client = shared_key_client(&mock).path();

    assert!(client.delete("testfs", "bigdir", true, None).await.unwrap());

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].uri.contains("recursive=true"));
    assert!(!requests[0].uri.contains("continuation="));
    assert!(requests[1].uri.contains("continuation=batch2"));
}

#[tokio::test]
async fn delete_nonrecursive_conflict_reports_false() {
    let mock = MockHttpSend::new();
    mock.push_response(409, &[], r#"{"error":{"code":"DirectoryNotEmpty"}}"#);
    let client = shared_key_client(&mock).path();

    assert!(!client
        .delete("testfs", "nonempty", false, None)
        .await
        .unwrap());
}

#[tokio::test]
async fn lease_acquire_returns_the_lease_id() {
    let mock = MockHttpSend::new();
    mock.push_response(201, &[("x-ms-lease-id", "00000000-1111-2222-3333-444444444444")], "");
    let client = shared_key_client(&mock).path();

    let outcome = client
        .lease(
            "testfs",
            "f1",
            LeaseAction::Acquire,
            &LeaseOptions {
                proposed_lease_id: Some("00000000-1111-2222-3333-444444444444".to_string()),
                lease_duration: Some(15),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(outcome.granted);
    assert_eq!(
        outcome.lease_id.as_deref(),
        Some("00000000-1111-2222-3333-444444444444")
    );

    let requests = mock.requests();
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.header("x-ms-lease-action"), Some("acquire"));
    assert_eq!(request.header("x-ms-lease-duration"), Some("15"));
    assert_eq!(
        request.header("x-ms-proposed-lease-id"),
        Some("00000000-1111-2222-3333-444444444444")
    );
}

#[tokio::test]
async fn lease_acquire_on_an_already_leased_file_is_not_granted() {
    let mock = MockHttpSend::new();
    mock.push_response(409, &[], r#"{"error":{"code":"LeaseAlreadyPresent"}}"#);
    let client = shared_key_client(&mock).path();

    let outcome = client
        .lease(
            "testfs",
            "f1",
            LeaseAction::Acquire,
            &LeaseOptions {
                lease_duration: Some(15),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!outcome.granted);
    assert_eq!(outcome.lease_id, None);
}

#[tokio::test]
async fn lease_break_twice_succeeds_both_times() {
    // Break is documented as idempotent; the scripted transport mirrors the
    // recorded service behavior.
    let mock = MockHttpSend::new();
    mock.push_response(202, &[], "");
    mock.push_response(202, &[], "");
    let client = shared_key_client(&mock).path();

    for _ in 0..2 {
        let outcome = client
            .lease("testfs", "f1", LeaseAction::Break, &LeaseOptions::default())
            .await
            .unwrap();
        assert!(outcome.granted);
    }
}

#[tokio::test]
async fn lease_renew_with_an_expired_lease_is_not_granted() {
    let mock = MockHttpSend::new();
    mock.push_response(409, &[], r#"{"error":{"code":"LeaseIdMismatchWithLeaseOperation"}}"#);
    let client = shared_key_client(&mock).path();

    let outcome = client
        .lease(
            "testfs",
            "f1",
            LeaseAction::Renew,
            &LeaseOptions {
                lease_id: Some("11111111-2222-3333-4444-555555555555".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!outcome.granted);
}

#[tokio::test]
async fn lease_rejects_invalid_durations_before_any_request() {
    let mock = MockHttpSend::new();
    let client = shared_key_client(&mock).path();

    for duration in [0, 5, 14, 61, -2] {
        let err = client
            .lease(
                "testfs",
                "f1",
                LeaseAction::Acquire,
                &LeaseOptions {
                    lease_duration: Some(duration),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{duration}");
    }

    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn list_concatenates_continuation_pages() {
    let mock = MockHttpSend::new();
    mock.push_response(
        200,
        &[("x-ms-continuation", "cursor1")],
        r#"{"paths":[{"name":"d1","isDirectory":"true"},{"name":"d1/f1","contentLength":"4"}]}"#,
    );
    mock.push_response(200, &[], r#"{"paths":[{"name":"d1/f2","contentLength":"8"}]}"#);
    let client = shared_key_client(&mock).path();

    let paths = client
        .list(
            "testfs",
            &PathListOptions {
                recursive: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let names: Vec<&str> = paths.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["d1", "d1/f1", "d1/f2"]);
    assert_eq!(paths[0].is_directory, "true");
    assert_eq!(paths[1].content_length, "4");

    let requests = mock.requests();
    assert!(requests[0].uri.contains("resource=filesystem"));
    assert!(requests[0].uri.contains("recursive=true"));
    assert!(requests[1].uri.contains("continuation=cursor1"));
}

#[tokio::test]
async fn list_scopes_to_a_directory() {
    let mock = MockHttpSend::new();
    mock.push_response(200, &[], r#"{"paths":[]}"#);
    let client = shared_key_client(&mock).path();

    client
        .list(
            "testfs",
            &PathListOptions {
                directory: Some("d1/sub".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(mock.requests()[0].uri.contains("directory=d1/sub"));
}

#[tokio::test]
async fn read_bytes_returns_the_exact_span() {
    let mock = MockHttpSend::new();
    mock.push_bytes_response(206, &[], &[1, 2, 3, 4]);
    let client = shared_key_client(&mock).path();

    let bytes = client
        .read_bytes("testfs", "d1/f1", 0, 3, None)
        .await
        .unwrap();
    assert_eq!(bytes, vec![1, 2, 3, 4]);

    let requests = mock.requests();
    let request = &requests[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.header("range"), Some("bytes=0-3"));
}

#[tokio::test]
async fn read_stream_yields_the_same_bytes() {
    let mock = MockHttpSend::new();
    mock.push_bytes_response(206, &[], &[9, 8, 7]);
    let client = shared_key_client(&mock).path();

    let mut reader = client
        .read_stream("testfs", "d1/f1", 4, 6, None)
        .await
        .unwrap();
    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut reader, &mut bytes).unwrap();
    assert_eq!(bytes, vec![9, 8, 7]);
}

#[tokio::test]
async fn update_append_defaults_to_position_zero() {
    let mock = MockHttpSend::new();
    mock.push_response(202, &[], "");
    let client = shared_key_client(&mock).path();

    assert!(client
        .update(
            "testfs",
            "d1/f1",
            UpdateAction::Append,
            &UpdateOptions {
                content: Some(Bytes::from_static(&[1, 2, 3, 4])),
                ..Default::default()
            },
        )
        .await
        .unwrap());

    let requests = mock.requests();
    let request = &requests[0];
    assert_eq!(request.method, "PATCH");
    assert!(request.uri.contains("action=append"));
    assert!(request.uri.contains("position=0"));
    assert_eq!(request.header("content-length"), Some("4"));
    assert_eq!(request.body.to_vec(), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn update_flush_requires_a_position() {
    let mock = MockHttpSend::new();
    let client = shared_key_client(&mock).path();

    let err = client
        .update(
            "testfs",
            "d1/f1",
            UpdateAction::Flush,
            &UpdateOptions::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn get_properties_extracts_headers() {
    let mock = MockHttpSend::new();
    mock.push_response(
        200,
        &[
            ("x-ms-resource-type", "file"),
            ("x-ms-owner", "$superuser"),
            ("x-ms-group", "$superuser"),
            ("x-ms-permissions", "rw-r-----"),
            ("x-ms-acl", "user::rw-,group::r--,other::---"),
            ("x-ms-lease-state", "available"),
            ("x-ms-lease-status", "unlocked"),
        ],
        "",
    );
    let client = shared_key_client(&mock).path();

    let properties = client
        .get_properties("testfs", "d1/f1", Some("getAccessControl"), Some(true))
        .await
        .unwrap();

    assert_eq!(properties.resource_type.as_deref(), Some("file"));
    assert_eq!(properties.owner.as_deref(), Some("$superuser"));
    assert_eq!(properties.permissions.as_deref(), Some("rw-r-----"));
    assert_eq!(
        properties.acl.as_deref(),
        Some("user::rw-,group::r--,other::---")
    );
    assert_eq!(properties.lease_state.as_deref(), Some("available"));
    assert_eq!(properties.lease_duration, None);

    let requests = mock.requests();
    let request = &requests[0];
    assert_eq!(request.method, "HEAD");
    assert!(request.uri.contains("action=getAccessControl"));
    assert!(request.uri.contains("upn=true"));
}

#[tokio::test]
async fn end_to_end_write_then_read() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mock = MockHttpSend::new();
    mock.push_response(201, &[], ""); // create filesystem
    mock.push_response(201, &[], ""); // create directory d1
    mock.push_response(201, &[], ""); // create file d1/f1
    mock.push_response(202, &[], ""); // append 4 bytes at 0
    mock.push_response(200, &[], ""); // flush at 4, close
    mock.push_bytes_response(206, &[], &[1, 2, 3, 4]); // read back

    let client = shared_key_client(&mock);
    let filesystems = client.filesystem();
    let paths = client.path();

    assert!(filesystems.create("testfs").await.unwrap());
    assert!(paths
        .create("testfs", "d1", ResourceType::Directory, false)
        .await
        .unwrap());
    assert!(paths
        .create("testfs", "d1/f1", ResourceType::File, false)
        .await
        .unwrap());
    assert!(paths
        .update(
            "testfs",
            "d1/f1",
            UpdateAction::Append,
            &UpdateOptions {
                content: Some(Bytes::from_static(&[1, 2, 3, 4])),
                position: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap());
    assert!(paths
        .update(
            "testfs",
            "d1/f1",
            UpdateAction::Flush,
            &UpdateOptions {
                position: Some(4),
                close: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap());
    let bytes = paths.read_bytes("testfs", "d1/f1", 0, 3, None).await.unwrap();
    assert_eq!(bytes, vec![1, 2, 3, 4]);

    let methods: Vec<String> = mock.requests().iter().map(|r| r.method.clone()).collect();
    assert_eq!(methods, vec!["PUT", "PUT", "PUT", "PATCH", "PATCH", "GET"]);
    assert!(mock.requests()[4].uri.contains("action=flush"));
    assert!(mock.requests()[4].uri.contains("position=4"));
    assert!(mock.requests()[4].uri.contains("close=true"));
}
