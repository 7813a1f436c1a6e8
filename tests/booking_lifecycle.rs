use serde_json::json;
use slotbook::booking::{BookingDraft, BookingId, BookingStatus, Cancellation};
use slotbook::error::Error;
use slotbook::Slotbook;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> Slotbook {
    Slotbook::new(&server.uri())
}

fn draft() -> BookingDraft {
    BookingDraft {
        service: "svc-doc-1".into(),
        user_email: "sam@example.com".into(),
        scheduled_at: "2026-08-15T14:00:00Z".parse().unwrap(),
        status: BookingStatus::Confirmed,
    }
}

#[tokio::test]
async fn create_sends_data_envelope_and_normalizes_the_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_partial_json(json!({
            "data": {
                "service": "svc-doc-1",
                "userEmail": "sam@example.com",
                "bookingStatus": "confirmed"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 5,
                "documentId": "doc5",
                "userEmail": "sam@example.com",
                "scheduleTime": "2026-08-15T14:00:00.000Z",
                "bookingStatus": "confirmed"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let booking = client(&mock_server).bookings().create(&draft()).await.unwrap();

    assert_eq!(booking.id.as_str(), "doc5");
    assert_eq!(booking.legacy_id, Some(5));
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(
        booking.scheduled_at.unwrap().to_rfc3339(),
        "2026-08-15T14:00:00+00:00"
    );
}

#[tokio::test]
async fn create_surfaces_store_rejections_with_their_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"name": "ValidationError", "message": "userEmail must be a valid email"}
        })))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server).bookings().create(&draft()).await;

    match result {
        Err(Error::Remote { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("ValidationError"));
        }
        other => panic!("expected a remote error, got {:?}", other.map(|b| b.id)),
    }
}

#[tokio::test]
async fn fetch_for_user_filters_populates_and_sorts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .and(query_param("filters[userEmail][$eq]", "sam@example.com"))
        .and(query_param("populate", "service.image"))
        .and(query_param("sort", "scheduleTime:desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "id": 2,
                    "documentId": "doc2",
                    "userEmail": "sam@example.com",
                    "scheduleTime": "2026-09-01T10:00:00.000Z",
                    "bookingStatus": "confirmed",
                    "service": {
                        "data": {
                            "id": 1,
                            "attributes": {
                                "title": "Haircut",
                                "duration": 30,
                                "price": 25.0,
                                "image": {"data": {"attributes": {"url": "/uploads/cut.png"}}}
                            }
                        }
                    }
                },
                {
                    "id": 1,
                    "documentId": "doc1",
                    "userEmail": "sam@example.com",
                    "scheduleTime": "2026-08-01T10:00:00.000Z",
                    "bookingStatus": "cancelled"
                }
            ],
            "meta": {"pagination": {"total": 2}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bookings = client(&mock_server)
        .bookings()
        .fetch_for_user("sam@example.com")
        .await
        .unwrap();

    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0].id.as_str(), "doc2");
    assert_eq!(bookings[0].service.title, "Haircut");
    assert_eq!(
        bookings[0].service.image_url,
        format!("{}/uploads/cut.png", mock_server.uri())
    );
    assert_eq!(bookings[1].status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn fetch_for_user_returns_an_empty_vec_on_no_matches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [], "meta": {}})),
        )
        .mount(&mock_server)
        .await;

    let bookings = client(&mock_server)
        .bookings()
        .fetch_for_user("nobody@example.com")
        .await
        .unwrap();

    assert!(bookings.is_empty());
}

#[tokio::test]
async fn existence_check_finds_records_by_direct_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/doc1"))
        .and(query_param("populate", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 1, "documentId": "doc1", "userEmail": "sam@example.com"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let probe = client(&mock_server)
        .bookings()
        .existence_check(&BookingId::new("doc1"))
        .await;

    assert!(probe.exists);
    assert_eq!(probe.record.unwrap().id.as_str(), "doc1");
}

#[tokio::test]
async fn existence_check_falls_back_to_the_filtered_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/doc1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .and(query_param("filters[documentId][$eq]", "doc1"))
        .and(query_param("populate", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "documentId": "doc1"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let probe = client(&mock_server)
        .bookings()
        .existence_check(&BookingId::new("doc1"))
        .await;

    assert!(probe.exists);
    assert!(probe.record.is_some());
}

#[tokio::test]
async fn existence_check_reports_absent_only_on_clean_negatives() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;

    let probe = client(&mock_server)
        .bookings()
        .existence_check(&BookingId::new("ghost"))
        .await;

    assert!(!probe.exists);
    assert!(probe.record.is_none());
}

#[tokio::test]
async fn inconclusive_probe_is_biased_toward_existence() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/doc1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let probe = client(&mock_server)
        .bookings()
        .existence_check(&BookingId::new("doc1"))
        .await;

    assert!(probe.exists, "uncertain probes must not report a booking as gone");
    assert!(probe.record.is_none());
}

/// Mounts the direct-fetch probe response used by the cancel tests.
async fn mount_probe(mock_server: &MockServer, id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/bookings/{}", id)))
        .and(query_param("populate", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 9, "documentId": id, "userEmail": "sam@example.com"}
        })))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn cancel_deletes_outright_without_touching_the_status() {
    let mock_server = MockServer::start().await;
    mount_probe(&mock_server, "doc1").await;

    Mock::given(method("DELETE"))
        .and(path("/api/bookings/doc1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/bookings/doc1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = client(&mock_server)
        .bookings()
        .cancel(&BookingId::new("doc1"))
        .await
        .unwrap();

    assert_eq!(outcome, Cancellation::Deleted);
}

#[tokio::test]
async fn cancel_resolves_a_legacy_id_to_the_canonical_one_first() {
    let mock_server = MockServer::start().await;

    // Probing the legacy id yields the record with its document id; every
    // follow-up call must use that canonical id.
    Mock::given(method("GET"))
        .and(path("/api/bookings/9"))
        .and(query_param("populate", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 9, "documentId": "doc9"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/bookings/doc9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = client(&mock_server)
        .bookings()
        .cancel(&BookingId::new("9"))
        .await
        .unwrap();

    assert_eq!(outcome, Cancellation::Deleted);
}

#[tokio::test]
async fn cancel_falls_back_to_a_status_update_when_delete_fails() {
    let mock_server = MockServer::start().await;
    mount_probe(&mock_server, "doc1").await;

    Mock::given(method("DELETE"))
        .and(path("/api/bookings/doc1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("delete refused"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/bookings/doc1"))
        .and(body_partial_json(json!({"data": {"bookingStatus": "cancelled"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 9, "documentId": "doc1", "bookingStatus": "cancelled"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = client(&mock_server)
        .bookings()
        .cancel(&BookingId::new("doc1"))
        .await
        .unwrap();

    assert_eq!(outcome, Cancellation::StatusUpdated);
}

#[tokio::test]
async fn a_404_on_the_fallback_update_means_the_delete_landed() {
    let mock_server = MockServer::start().await;
    mount_probe(&mock_server, "doc1").await;

    Mock::given(method("DELETE"))
        .and(path("/api/bookings/doc1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/bookings/doc1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let outcome = client(&mock_server)
        .bookings()
        .cancel(&BookingId::new("doc1"))
        .await
        .unwrap();

    assert_eq!(outcome, Cancellation::AlreadyGone);
}

#[tokio::test]
async fn an_already_deleted_message_counts_as_success() {
    let mock_server = MockServer::start().await;
    mount_probe(&mock_server, "doc1").await;

    Mock::given(method("DELETE"))
        .and(path("/api/bookings/doc1"))
        .respond_with(ResponseTemplate::new(409).set_body_string("record already deleted"))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/bookings/doc1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = client(&mock_server)
        .bookings()
        .cancel(&BookingId::new("doc1"))
        .await
        .unwrap();

    assert_eq!(outcome, Cancellation::AlreadyGone);
}

#[tokio::test]
async fn cancel_fails_only_when_both_strategies_fail_for_unrelated_reasons() {
    let mock_server = MockServer::start().await;
    mount_probe(&mock_server, "doc1").await;

    Mock::given(method("DELETE"))
        .and(path("/api/bookings/doc1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("delete refused"))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/bookings/doc1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("update refused"))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .bookings()
        .cancel(&BookingId::new("doc1"))
        .await;

    match result {
        Err(Error::CancellationFailed(message)) => {
            assert!(message.contains("delete refused"));
            assert!(message.contains("update refused"));
        }
        other => panic!("expected CancellationFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn cancel_fails_hard_when_the_booking_is_verifiably_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .bookings()
        .cancel(&BookingId::new("ghost"))
        .await;

    assert!(matches!(result, Err(Error::BookingNotFound(_))));
}
