//! A synchronous XML-RPC client.
//!
//! The `xmlrpc-client` crate marshals typed [`Value`]s into the XML-RPC wire format, sends them
//! over HTTP(S) with optional pre-emptive Basic authentication, and decodes the response back
//! into a [`Value`] tree. It implements the subset of the [XML-RPC spec][spec] needed for one
//! request/response round trip, plus a tolerance for servers that omit type tags.
//!
//! Each call is a single blocking POST; see [`RpcClient`] for the call surface and [`Transport`]
//! for plugging in a custom transport.
//!
//! [spec]: http://xmlrpc.scripting.com/spec.html

#![doc(html_root_url = "https://docs.rs/xmlrpc-client/0.1.0")]

#[cfg(feature = "http")]
mod client;
mod endpoint;
mod error;
mod parser;
mod request;
mod transport;
mod utils;
mod value;

pub use crate::endpoint::Endpoint;
pub use crate::error::{ParseError, RequestError};
pub use crate::request::Request;
pub use crate::transport::Transport;
pub use crate::value::Value;

#[cfg(feature = "http")]
pub use crate::client::RpcClient;
#[cfg(feature = "http")]
pub use crate::transport::http;
