//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or errors. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use dnsimple_core::{DomainRef, Error, HttpMethod, HttpRequest, HttpResponse, Record, RecordClient};
use serde_json::Value;

fn client() -> RecordClient {
    RecordClient::new()
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

/// Vectors give the domain as a JSON number (id) or string (name).
fn parse_domain(value: &Value) -> DomainRef {
    match value {
        Value::Number(n) => DomainRef::ById(n.as_u64().unwrap()),
        Value::String(s) => DomainRef::ByName(s.clone()),
        other => panic!("unsupported domain reference: {other}"),
    }
}

fn record(value: &Value) -> Record {
    serde_json::from_value(value.clone()).unwrap()
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, expected["path"].as_str().unwrap(), "{name}: path");

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }
}

/// Match an error against the vector's `expected_error` and optional `expected_status`.
fn check_error(name: &str, case: &Value, err: Error) {
    let kind = case["expected_error"].as_str().unwrap();
    let matched = match kind {
        "NotFound" => matches!(err, Error::NotFound),
        "Api" => matches!(err, Error::Api { .. }),
        "Validation" => matches!(err, Error::Validation { .. }),
        "Deletion" => matches!(err, Error::Deletion { .. }),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {kind}, got {err:?}");

    if let Some(status) = case.get("expected_status") {
        assert_eq!(err.status(), status.as_u64().map(|s| s as u16), "{name}: status");
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        let req = c
            .build_list_records(
                &parse_domain(&input["domain"]),
                input["name"].as_str().unwrap(),
                input["type"].as_str().unwrap(),
            )
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_list_records(simulated(&case));
        if case.get("expected_error").is_some() {
            check_error(name, &case, result.unwrap_err());
        } else {
            let expected: Vec<Record> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        let req = c
            .build_create_record(&parse_domain(&input["domain"]), &record(&input["record"]))
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_create_record(simulated(&case));
        if case.get("expected_error").is_some() {
            check_error(name, &case, result.unwrap_err());
        } else {
            assert_eq!(result.unwrap(), record(&case["expected_result"]), "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Retrieve
// ---------------------------------------------------------------------------

#[test]
fn retrieve_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/retrieve.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        let req = c
            .build_retrieve_record(&parse_domain(&input["domain"]), input["id"].as_u64().unwrap())
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_retrieve_record(simulated(&case));
        if case.get("expected_error").is_some() {
            check_error(name, &case, result.unwrap_err());
        } else {
            assert_eq!(result.unwrap(), record(&case["expected_result"]), "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c
            .build_update_record(&record(&case["target"]), &record(&case["input"]))
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_record(simulated(&case));
        if case.get("expected_error").is_some() {
            check_error(name, &case, result.unwrap_err());
        } else {
            assert_eq!(result.unwrap(), record(&case["expected_result"]), "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_delete_record(&record(&case["target"])).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_record(simulated(&case));
        if case.get("expected_error").is_some() {
            check_error(name, &case, result.unwrap_err());
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
