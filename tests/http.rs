//! End-to-end tests against a local mock HTTP server.

use mockito::Server;
use xmlrpc_client::{RequestError, RpcClient, Value};

const VERSION_RESPONSE: &str = r#"<?xml version="1.0"?>
<methodResponse>
    <params>
        <param>
            <value><array><data>
                <value><i4>1</i4></value>
                <value><i4>1</i4></value>
                <value><i4>2</i4></value>
            </data></array></value>
        </param>
    </params>
</methodResponse>"#;

const EMPTY_RESPONSE: &str =
    r#"<?xml version="1.0"?><methodResponse><params></params></methodResponse>"#;

#[test]
fn invokes_the_anonymous_endpoint() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/rpc")
        .match_header("content-type", r#"text/xml; charset="utf-8""#)
        .with_header("content-type", "text/xml")
        .with_body(VERSION_RESPONSE)
        .create();

    let client = RpcClient::new(&server.url(), None, None).unwrap();
    let result = client.invoke("system.getAPIVersion", vec![]).unwrap();

    mock.assert();
    assert_eq!(
        result,
        Some(Value::Array(vec![Value::Int(1), Value::Int(1), Value::Int(2)]))
    );
}

#[test]
fn zero_argument_calls_send_an_empty_params_element() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/rpc")
        .match_body(mockito::Matcher::Exact(
            r#"<?xml version="1.0" encoding="utf-8"?><methodCall>    <methodName>system.getAPIVersion</methodName>    <params>    </params></methodCall>"#
                .to_string(),
        ))
        .with_header("content-type", "text/xml")
        .with_body(VERSION_RESPONSE)
        .create();

    let client = RpcClient::new(&server.url(), None, None).unwrap();
    client.invoke("system.getAPIVersion", vec![]).unwrap();

    mock.assert();
}

#[test]
fn sends_the_precomputed_basic_auth_credential() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/login/rpc")
        .match_header("authorization", "Basic YWxpY2U6c2VjcmV0")
        .with_header("content-type", "text/xml")
        .with_body(VERSION_RESPONSE)
        .create();

    let client = RpcClient::new(&server.url(), Some("alice"), Some("secret")).unwrap();
    client
        .invoke("ticket.query", vec![Value::from("status!=closed&max=0")])
        .unwrap();

    mock.assert();
}

#[test]
fn a_response_without_params_is_absence() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/rpc")
        .with_header("content-type", "text/xml")
        .with_body(EMPTY_RESPONSE)
        .create();

    let client = RpcClient::new(&server.url(), None, None).unwrap();

    assert_eq!(client.invoke("ticket.update", vec![Value::Int(1)]).unwrap(), None);
}

#[test]
fn a_non_success_status_is_a_transport_error() {
    let mut server = Server::new();
    let _mock = server.mock("POST", "/rpc").with_status(500).create();

    let client = RpcClient::new(&server.url(), None, None).unwrap();

    match client.invoke("ticket.get", vec![Value::Int(1)]) {
        Err(RequestError::Transport(_)) => {}
        other => panic!("expected a transport error, got {:?}", other),
    }
}

#[test]
fn a_garbage_body_is_a_parse_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/rpc")
        .with_header("content-type", "text/xml")
        .with_body("this is not XML")
        .create();

    let client = RpcClient::new(&server.url(), None, None).unwrap();

    match client.invoke("ticket.get", vec![Value::Int(1)]) {
        Err(RequestError::Parse(_)) => {}
        other => panic!("expected a parse error, got {:?}", other),
    }
}
