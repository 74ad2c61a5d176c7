use crate::error::RequestError;
use crate::parser::parse_response;
use crate::transport::Transport;
use crate::utils::escape_xml;
use crate::Value;

use std::io::{self, Write};

/// A request to call a procedure.
///
/// This is the transient envelope for one call: a method name plus its ordered arguments. It is
/// serialized when the request is performed and can be discarded afterwards.
#[derive(Clone, Debug)]
pub struct Request<'a> {
    name: &'a str,
    args: Vec<Value>,
}

impl<'a> Request<'a> {
    /// Creates a new request to call a function named `name`.
    ///
    /// By default, no arguments are passed. Use the `arg` method to append arguments.
    pub fn new(name: &'a str) -> Self {
        Request {
            name,
            args: Vec::new(),
        }
    }

    /// Appends an argument to be passed to the current list of arguments.
    pub fn arg<T: Into<Value>>(mut self, value: T) -> Self {
        self.args.push(value.into());
        self
    }

    /// Performs the request using a [`Transport`].
    ///
    /// Returns the decoded first response parameter, or `None` when the server answered without
    /// any parameters. An explicit `<nil/>` result is `Some(Value::Nil)`, not `None`.
    ///
    /// # Errors
    ///
    /// Any errors that occur while sending the request using the [`Transport`] will be returned
    /// to the caller as [`RequestError::Transport`]. If the response is malformed or not valid
    /// XML-RPC, a [`RequestError::Parse`] is returned instead.
    ///
    /// [`Transport`]: trait.Transport.html
    pub fn call<T: Transport>(&self, transport: T) -> Result<Option<Value>, RequestError> {
        let mut reader = transport.transmit(self).map_err(RequestError::Transport)?;

        let response = parse_response(&mut reader)?;

        Ok(response)
    }

    /// Formats this `Request` as a UTF-8 encoded XML document.
    ///
    /// A call with zero arguments emits an empty `<params>` element.
    ///
    /// # Errors
    ///
    /// Any errors reported by the writer will be propagated to the caller. If the writer never
    /// returns an error, neither will this method.
    pub fn write_as_xml<W: Write>(&self, fmt: &mut W) -> io::Result<()> {
        write!(fmt, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
        write!(fmt, r#"<methodCall>"#)?;
        write!(fmt, r#"    <methodName>{}</methodName>"#, escape_xml(self.name))?;
        write!(fmt, r#"    <params>"#)?;
        for value in &self.args {
            write!(fmt, r#"        <param>"#)?;
            value.write_as_xml(fmt)?;
            write!(fmt, r#"        </param>"#)?;
        }
        write!(fmt, r#"    </params>"#)?;
        write!(fmt, r#"</methodCall>"#)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str;

    fn write_to_string(req: &Request<'_>) -> String {
        let mut output: Vec<u8> = Vec::new();
        req.write_as_xml(&mut output).unwrap();
        str::from_utf8(&output).unwrap().to_string()
    }

    #[test]
    fn escapes_method_names() {
        let req = Request::new("x<&x");

        assert!(write_to_string(&req).contains("<methodName>x&lt;&amp;x</methodName>"));
    }

    #[test]
    fn zero_arguments_emit_an_empty_params_element() {
        let req = Request::new("system.getAPIVersion");
        let body = write_to_string(&req);

        assert!(body.contains("<params>"));
        assert!(!body.contains("<param>"));
    }

    #[test]
    fn arguments_keep_their_order() {
        let req = Request::new("ticket.update").arg(42).arg("comment");
        let body = write_to_string(&req);

        let first = body.find("<i4>42</i4>").unwrap();
        let second = body.find("<string>comment</string>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn declares_utf8_encoding() {
        let req = Request::new("system.getAPIVersion");

        assert!(write_to_string(&req).starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
    }
}
