//! Queries a Trac-style XML-RPC service.
//!
//! Point `RPC_BASE_URL` at a project base URL (the client appends `rpc` or `login/rpc` itself)
//! and run `cargo run --example client`.

use xmlrpc_client::{RpcClient, Value};

use std::env;

fn main() {
    let base_url =
        env::var("RPC_BASE_URL").unwrap_or_else(|_| "http://localhost:8000/trac/demo".to_string());
    let username = env::var("RPC_USERNAME").ok();
    let password = env::var("RPC_PASSWORD").ok();

    let client = RpcClient::new(&base_url, username.as_deref(), password.as_deref())
        .expect("invalid base URL");

    let version = client
        .invoke("system.getAPIVersion", vec![])
        .expect("version call failed");
    println!("API version: {:?}", version);

    let tickets = client
        .invoke("ticket.query", vec![Value::from("status!=closed&max=0")])
        .expect("query call failed");
    println!("Open tickets: {:?}", tickets);
}
