use crate::Request;

use std::error::Error;
use std::io::Read;

/// Request and response transport abstraction.
///
/// The `Transport` trait provides a way to send a `Request` to a server and to receive the
/// corresponding response. A `Transport` implementor is passed to [`Request::call`] in order to
/// use it to perform that request.
///
/// The most commonly used transport is simple HTTP: If the `http` feature is enabled (it is by
/// default), the blocking reqwest `RequestBuilder` will implement this trait and send the XML-RPC
/// [`Request`] via one HTTP POST.
///
/// You can implement this trait for your own types if you want to customize how requests are
/// sent. You can modify HTTP headers or wrap requests in a completely different protocol.
///
/// [`Request::call`]: struct.Request.html#method.call
/// [`Request`]: struct.Request.html
pub trait Transport {
    /// The response stream returned by `transmit`.
    type Stream: Read;

    /// Transmits an XML-RPC request and returns the server's response.
    ///
    /// The response is returned as a `Self::Stream` - some type implementing the `Read` trait.
    /// The library will read all of the data and parse it as a response. It must be UTF-8 encoded
    /// XML, otherwise the call will fail.
    ///
    /// # Errors
    ///
    /// If a transport error occurs, it should be returned as a boxed error - the library will
    /// then return an appropriate [`RequestError`] to the caller.
    ///
    /// [`RequestError`]: enum.RequestError.html
    fn transmit(self, request: &Request<'_>) -> Result<Self::Stream, Box<dyn Error + Send + Sync>>;
}

/// Provides helpers for implementing custom `Transport`s using reqwest.
///
/// This module will be disabled if the `http` feature is not enabled.
///
/// The default [`Transport`] implementation for the blocking `RequestBuilder` looks roughly like
/// this:
///
/// ```notrust
/// // serialize request into `body` (a `Vec<u8>`)
///
/// let response = build_headers(builder, body.len()).body(body).send()?;
///
/// check_response(&response)?;
/// ```
///
/// From this, you can build your own custom transports.
///
/// [`Transport`]: ../trait.Transport.html
#[cfg(feature = "http")]
pub mod http {
    use crate::{Request, Transport};

    use mime::Mime;
    use reqwest::blocking::{RequestBuilder, Response};
    use reqwest::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};

    use std::error::Error;

    /// Appends all HTTP headers required by the XML-RPC specification to the `RequestBuilder`.
    ///
    /// More specifically, the following headers are set:
    ///
    /// ```notrust
    /// User-Agent: xmlrpc-client
    /// Content-Type: text/xml; charset="utf-8"
    /// Content-Length: $body_len
    /// ```
    pub fn build_headers(builder: RequestBuilder, body_len: u64) -> RequestBuilder {
        // NB: The `Host` header is also required, but reqwest adds it automatically, since
        // HTTP/1.1 requires it.
        builder
            .header(USER_AGENT, "xmlrpc-client")
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static(r#"text/xml; charset="utf-8""#),
            )
            .header(CONTENT_LENGTH, body_len)
    }

    /// Checks that a reqwest `Response` has a status code indicating success and a `text/xml`
    /// content type.
    pub fn check_response(response: &Response) -> Result<(), Box<dyn Error + Send + Sync>> {
        // This is essentially an open-coded version of `Response::error_for_status` that does not
        // consume the response.
        if response.status().is_client_error() || response.status().is_server_error() {
            return Err(format!("server response indicates error: {}", response.status()).into());
        }

        // "The Content-Type is text/xml."
        // (we ignore this if the header is missing completely)
        if let Some(content) = response.headers().get(CONTENT_TYPE) {
            let content: Mime = content.to_str()?.parse()?;
            if content.type_() != mime::TEXT || content.subtype() != mime::XML {
                return Err(format!(
                    "expected Content-Type 'text/xml', got '{}/{}'",
                    content.type_(),
                    content.subtype()
                )
                .into());
            }
        }

        Ok(())
    }

    /// Use a blocking `RequestBuilder` as the transport.
    ///
    /// The request will be sent as specified in the XML-RPC specification: A default `User-Agent`
    /// will be set, along with the correct `Content-Type` and `Content-Length`.
    impl Transport for RequestBuilder {
        type Stream = Response;

        fn transmit(
            self,
            request: &Request<'_>,
        ) -> Result<Self::Stream, Box<dyn Error + Send + Sync>> {
            // First, build the body XML
            let mut body = Vec::new();
            // This unwrap never panics as we are using `Vec<u8>` as a `Write` implementor,
            // and not doing anything else that could return an `Err` in `write_as_xml()`.
            request.write_as_xml(&mut body).unwrap();

            let response = build_headers(self, body.len() as u64).body(body).send()?;

            check_response(&response)?;

            Ok(response)
        }
    }
}
