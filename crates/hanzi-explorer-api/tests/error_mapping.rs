// SPDX-License-Identifier: Apache-2.0

use hanzi_explorer_api::{map_error, ApiError, ApiErrorCode};
use hanzi_explorer_ingest::IngestError;
use hanzi_explorer_model::FieldError;
use hanzi_explorer_query::QueryError;
use hanzi_explorer_store::{MutationError, StoreError};

#[test]
fn every_code_maps_to_its_status() {
    let cases = [
        (ApiError::invalid_param("volume", "x"), 400),
        (ApiError::validation_failed(&[]), 400),
        (ApiError::malformed_import("bad"), 400),
        (ApiError::unauthorized(), 401),
        (ApiError::forbidden(), 403),
        (ApiError::not_found("Character not found"), 404),
        (ApiError::duplicate_key(&[]), 409),
        (ApiError::payload_too_large(10), 413),
        (ApiError::internal("boom"), 500),
        (ApiError::store_unavailable("down"), 503),
    ];
    for (error, status) in cases {
        assert_eq!(map_error(&error).status_code, status, "{}", error.code.as_str());
    }
}

#[test]
fn wire_body_uses_error_key_for_message() {
    let body = serde_json::to_value(
        ApiError::not_found("Character not found").with_request_id("req-0000000000000001"),
    )
    .expect("json");
    assert_eq!(body["error"], "Character not found");
    assert_eq!(body["code"], "NotFound");
    assert_eq!(body["request_id"], "req-0000000000000001");
    assert!(body.get("message").is_none());
}

#[test]
fn domain_errors_convert_to_wire_codes() {
    let dup: ApiError = MutationError::DuplicateKey {
        fields: vec![FieldError::new("hanzi", "already exists")],
    }
    .into();
    assert_eq!(dup.code, ApiErrorCode::DuplicateKey);
    assert_eq!(dup.details["field_errors"][0]["field"], "hanzi");

    let missing: ApiError = MutationError::NotFound {
        entity: "character",
        key: "9".to_string(),
    }
    .into();
    assert_eq!(missing.code, ApiErrorCode::NotFound);
    assert_eq!(missing.message, "Character not found");

    let query: ApiError = QueryError::not_found("Character not found").into();
    assert_eq!(query.code, ApiErrorCode::NotFound);

    let malformed: ApiError = IngestError::Malformed("entry 0".to_string()).into();
    assert_eq!(malformed.code, ApiErrorCode::MalformedImport);

    let backend: ApiError = StoreError::backend("disk gone").into();
    assert_eq!(backend.code, ApiErrorCode::StoreUnavailable);
}
