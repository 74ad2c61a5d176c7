//! XML-RPC response parser.

use crate::error::ParseError;
use crate::utils::expand_compact_date;
use crate::Value;

use iso8601::datetime;
use xml::common::Position;
use xml::name::OwnedName;
use xml::reader::{EventReader, XmlEvent};
use xml::ParserConfig;

use std::collections::BTreeMap;
use std::io::Read;

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'a, R: Read + 'a> {
    reader: EventReader<&'a mut R>,
}

impl<'a, R: Read> Parser<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        Parser {
            reader: EventReader::new_with_config(
                reader,
                ParserConfig {
                    cdata_to_characters: true,
                    ..Default::default()
                },
            ),
        }
    }

    /// Reads an `XmlEvent` from a reader, disposing events we want to ignore.
    ///
    /// When encountering a new element, returns an `Err` if it has any attributes.
    fn pull_event(&mut self) -> ParseResult<XmlEvent> {
        loop {
            let event = self.reader.next()?;
            match event {
                XmlEvent::StartDocument { .. }
                | XmlEvent::Comment(_)
                | XmlEvent::Whitespace(_)
                | XmlEvent::ProcessingInstruction { .. } => continue, // skip these
                XmlEvent::StartElement {
                    ref attributes,
                    ref name,
                    ..
                } => {
                    if !attributes.is_empty() {
                        return self.expected(format!("tag <{}> without attributes", name));
                    }
                }
                XmlEvent::EndElement { .. }
                | XmlEvent::EndDocument
                | XmlEvent::CData(_)
                | XmlEvent::Characters(_) => {}
            }

            return Ok(event);
        }
    }

    /// Expects an opening tag like `<tag>` without attributes (and a local name without namespaces).
    fn expect_open(&mut self, tag: &str) -> ParseResult<()> {
        match self.pull_event()? {
            XmlEvent::StartElement { ref name, .. } if name == &OwnedName::local(tag) => Ok(()),
            _ => self.expected(format!("<{}>", tag)),
        }
    }

    /// Expects a closing tag like `</tag>` with a local name without namespaces.
    fn expect_close(&mut self, tag: &str) -> ParseResult<()> {
        match self.pull_event()? {
            XmlEvent::EndElement { ref name } if name == &OwnedName::local(tag) => Ok(()),
            _ => self.expected(format!("</{}>", tag)),
        }
    }

    /// Builds and returns an `Err(UnexpectedXml)`.
    fn expected<T, E: ToString>(&self, expected: E) -> ParseResult<T> {
        Err(ParseError::UnexpectedXml {
            expected: expected.to_string(),
            position: self.reader.position(),
        })
    }

    /// Builds an `InvalidValue` error at the current position.
    fn invalid_value(&self, for_type: &'static str, found: String) -> ParseError {
        ParseError::InvalidValue {
            for_type,
            found,
            position: self.reader.position(),
        }
    }

    fn parse_response(&mut self) -> ParseResult<Option<Value>> {
        // <methodResponse>
        self.expect_open("methodResponse")?;

        // A <fault> in place of <params> fails here as unexpected XML.
        self.expect_open("params")?;

        // Zero <param> elements mean the call produced no result, which is distinct from an
        // explicit <nil/> result. Only the first <param> is decoded; the rest of the document is
        // left unread.
        match self.pull_event()? {
            XmlEvent::EndElement { ref name } if name == &OwnedName::local("params") => Ok(None),
            XmlEvent::StartElement { ref name, .. } if name == &OwnedName::local("param") => {
                let value = self.parse_value()?;
                self.expect_close("param")?;
                Ok(Some(value))
            }
            _ => self.expected("</params> or <param>"),
        }
    }

    pub fn parse_value(&mut self) -> ParseResult<Value> {
        // <value>
        self.expect_open("value")?;
        self.parse_value_body()
    }

    /// Parses the contents of a `<value>` whose opening tag was already consumed, including the
    /// closing tag.
    fn parse_value_body(&mut self) -> ParseResult<Value> {
        match self.pull_event()? {
            // An entirely empty <value> is the degenerate case of untyped text
            XmlEvent::EndElement { ref name } if name == &OwnedName::local("value") => {
                Ok(Value::String(String::new()))
            }
            event => {
                let value = self.parse_value_inner(event)?;

                // </value>
                self.expect_close("value")?;

                Ok(value)
            }
        }
    }

    fn parse_value_inner(&mut self, event: XmlEvent) -> ParseResult<Value> {
        let value = match event {
            XmlEvent::StartElement { ref name, .. } => {
                if name == &OwnedName::local("struct") {
                    let mut members = BTreeMap::new();
                    loop {
                        match self.pull_event()? {
                            XmlEvent::EndElement { ref name }
                                if name == &OwnedName::local("struct") =>
                            {
                                break
                            }
                            XmlEvent::StartElement { ref name, .. }
                                if name == &OwnedName::local("member") =>
                            {
                                // <member>

                                // <name>NAME</name>
                                self.expect_open("name")?;
                                let name = match self.pull_event()? {
                                    XmlEvent::Characters(string) => string,
                                    _ => return self.expected("characters"),
                                };
                                self.expect_close("name")?;

                                // Value
                                let value = self.parse_value()?;

                                // </member>
                                self.expect_close("member")?;

                                // A duplicate member name keeps the value decoded last
                                members.insert(name, value);
                            }
                            _ => return self.expected("</struct> or <member>"),
                        }
                    }

                    Value::Struct(members)
                } else if name == &OwnedName::local("array") {
                    let mut elements: Vec<Value> = Vec::new();
                    self.expect_open("data")?;
                    loop {
                        match self.pull_event()? {
                            XmlEvent::EndElement { ref name }
                                if name == &OwnedName::local("data") =>
                            {
                                break
                            }
                            XmlEvent::StartElement { ref name, .. }
                                if name == &OwnedName::local("value") =>
                            {
                                elements.push(self.parse_value_body()?);
                            }
                            _ => return self.expected("</data> or <value>"),
                        }
                    }
                    self.expect_close("array")?;
                    Value::Array(elements)
                } else if name == &OwnedName::local("nil") {
                    self.expect_close("nil")?;
                    Value::Nil
                } else if name == &OwnedName::local("string") {
                    let string = match self.pull_event()? {
                        XmlEvent::Characters(string) => {
                            self.expect_close("string")?;
                            string
                        }
                        // an element with no text is the empty string
                        XmlEvent::EndElement { name: ref end_name } if end_name == name => {
                            String::new()
                        }
                        _ => return self.expected("characters or </string>"),
                    };
                    Value::String(string)
                } else {
                    // All other types expect raw characters...
                    let data = match self.pull_event()? {
                        XmlEvent::Characters(string) => string,
                        _ => return self.expected("characters"),
                    };

                    // ...and a corresponding close tag
                    self.expect_close(&name.local_name)?;

                    if name == &OwnedName::local("i4") || name == &OwnedName::local("int") {
                        match data.parse::<i32>() {
                            Ok(int) => Value::Int(int),
                            Err(_) => return Err(self.invalid_value("integer", data)),
                        }
                    } else if name == &OwnedName::local("boolean") {
                        // Tolerates servers that send e.g. "true": only "0" is false
                        Value::Bool(data != "0")
                    } else if name == &OwnedName::local("double") {
                        match data.parse::<f64>() {
                            Ok(double) => Value::Double(double),
                            Err(_) => return Err(self.invalid_value("double", data)),
                        }
                    } else if name == &OwnedName::local("dateTime.iso8601") {
                        match datetime(&expand_compact_date(&data)) {
                            Ok(date_time) => Value::DateTime(date_time),
                            Err(_) => return Err(self.invalid_value("dateTime.iso8601", data)),
                        }
                    } else {
                        return self.expected("valid type tag or characters");
                    }
                }
            }
            // Some servers omit the type tag entirely. Integer-looking text is an integer,
            // everything else is a string.
            XmlEvent::Characters(string) => match string.parse::<i32>() {
                Ok(int) => Value::Int(int),
                Err(_) => Value::String(string),
            },
            _ => return self.expected("type tag or characters"),
        };

        Ok(value)
    }
}

/// Parses a `methodResponse` document from an XML reader.
///
/// Returns the decoded first `<param>` value, or `None` when the response carries no parameters.
pub fn parse_response<R: Read>(reader: &mut R) -> ParseResult<Option<Value>> {
    Parser::new(reader).parse_response()
}
