use crate::{
    error::XmlRpcError,
    types::{MethodResponse, Value},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use quick_xml::{Reader, events::Event};
use std::collections::BTreeMap;

pub struct XmlRpcDeserializer<'a> {
    reader: Reader<&'a [u8]>,
}

fn tag_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

fn describe(event: &Event<'_>) -> String {
    match event {
        Event::Start(e) => format!("<{}>", tag_name(e.local_name().as_ref())),
        Event::Empty(e) => format!("<{}/>", tag_name(e.local_name().as_ref())),
        Event::End(e) => format!("</{}>", tag_name(e.local_name().as_ref())),
        Event::Text(_) | Event::CData(_) => "text".to_owned(),
        Event::Eof => "end of document".to_owned(),
        _ => "markup".to_owned(),
    }
}

impl<'a> XmlRpcDeserializer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            reader: Reader::from_str(src),
        }
    }

    /// Next event that carries structure: skips the prolog, comments and
    /// whitespace between elements.
    fn next(&mut self) -> Result<Event<'a>, XmlRpcError> {
        loop {
            match self.reader.read_event()? {
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
                Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => continue,
                Event::Eof => return Err(XmlRpcError::UnexpectedEof),
                event => return Ok(event),
            }
        }
    }

    fn expect_start(&mut self, tag: &'static str) -> Result<(), XmlRpcError> {
        match self.next()? {
            Event::Start(e) if e.local_name().as_ref() == tag.as_bytes() => Ok(()),
            other => Err(XmlRpcError::UnexpectedElement {
                expected: tag,
                found: describe(&other),
            }),
        }
    }

    fn expect_end(&mut self, tag: &'static str) -> Result<(), XmlRpcError> {
        match self.next()? {
            Event::End(e) if e.local_name().as_ref() == tag.as_bytes() => Ok(()),
            other => Err(XmlRpcError::UnexpectedElement {
                expected: tag,
                found: describe(&other),
            }),
        }
    }

    /// Collects character data up to the closing tag of a leaf element.
    fn read_text(&mut self, tag: &'static str) -> Result<String, XmlRpcError> {
        let mut text = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(t) => {
                    let unescaped = t.unescape().map_err(|e| XmlRpcError::Xml(e.to_string()))?;
                    text.push_str(&unescaped);
                }
                Event::CData(c) => {
                    let bytes = c.into_inner();
                    let chunk = std::str::from_utf8(&bytes)
                        .map_err(|e| XmlRpcError::Xml(e.to_string()))?;
                    text.push_str(chunk);
                }
                Event::End(e) if e.local_name().as_ref() == tag.as_bytes() => return Ok(text),
                Event::Comment(_) | Event::PI(_) => continue,
                Event::Eof => return Err(XmlRpcError::UnexpectedEof),
                other => {
                    return Err(XmlRpcError::UnexpectedElement {
                        expected: tag,
                        found: describe(&other),
                    });
                }
            }
        }
    }

    pub fn read_response(&mut self) -> Result<MethodResponse, XmlRpcError> {
        self.expect_start("methodResponse")?;
        let response = match self.next()? {
            Event::Start(e) if e.local_name().as_ref() == b"params" => {
                self.expect_start("param")?;
                let value = self.read_value()?;
                self.expect_end("param")?;
                self.expect_end("params")?;
                MethodResponse::Success(value)
            }
            Event::Start(e) if e.local_name().as_ref() == b"fault" => {
                let value = self.read_value()?;
                self.expect_end("fault")?;
                Self::fault_from(value)?
            }
            other => {
                return Err(XmlRpcError::UnexpectedElement {
                    expected: "params",
                    found: describe(&other),
                });
            }
        };
        self.expect_end("methodResponse")?;
        Ok(response)
    }

    fn fault_from(value: Value) -> Result<MethodResponse, XmlRpcError> {
        let code = value
            .get("faultCode")
            .and_then(Value::as_i64)
            .ok_or(XmlRpcError::InvalidFault("faultCode"))?;
        let message = value
            .get("faultString")
            .and_then(Value::as_str)
            .ok_or(XmlRpcError::InvalidFault("faultString"))?
            .to_owned();
        Ok(MethodResponse::Fault { code, message })
    }

    /// Reads one `<value>` element, including the `<value/>` shorthand.
    pub fn read_value(&mut self) -> Result<Value, XmlRpcError> {
        match self.next()? {
            Event::Start(e) if e.local_name().as_ref() == b"value" => self.read_value_body(),
            Event::Empty(e) if e.local_name().as_ref() == b"value" => {
                Ok(Value::String(String::new()))
            }
            other => Err(XmlRpcError::UnexpectedElement {
                expected: "value",
                found: describe(&other),
            }),
        }
    }

    fn read_value_body(&mut self) -> Result<Value, XmlRpcError> {
        // Untyped content is a string, so leading whitespace has to be kept
        // until we know whether a type element follows.
        let mut text = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(t) => {
                    let unescaped = t.unescape().map_err(|e| XmlRpcError::Xml(e.to_string()))?;
                    text.push_str(&unescaped);
                }
                Event::CData(c) => {
                    let bytes = c.into_inner();
                    let chunk = std::str::from_utf8(&bytes)
                        .map_err(|e| XmlRpcError::Xml(e.to_string()))?;
                    text.push_str(chunk);
                }
                Event::End(e) if e.local_name().as_ref() == b"value" => {
                    return Ok(Value::String(text));
                }
                Event::Start(e) => {
                    let name = tag_name(e.local_name().as_ref());
                    let value = self.read_typed(&name)?;
                    self.expect_end("value")?;
                    return Ok(value);
                }
                Event::Empty(e) => {
                    let name = tag_name(e.local_name().as_ref());
                    let value = Self::empty_typed(&name)?;
                    self.expect_end("value")?;
                    return Ok(value);
                }
                Event::Comment(_) | Event::PI(_) => continue,
                Event::Eof => return Err(XmlRpcError::UnexpectedEof),
                other => {
                    return Err(XmlRpcError::UnexpectedElement {
                        expected: "value",
                        found: describe(&other),
                    });
                }
            }
        }
    }

    fn read_typed(&mut self, name: &str) -> Result<Value, XmlRpcError> {
        match name {
            "int" | "i4" | "i8" => {
                let tag = match name {
                    "int" => "int",
                    "i4" => "i4",
                    _ => "i8",
                };
                let text = self.read_text(tag)?;
                text.trim()
                    .parse()
                    .map(Value::Int)
                    .map_err(|_| XmlRpcError::InvalidInt(text))
            }
            "boolean" => {
                let text = self.read_text("boolean")?;
                match text.trim() {
                    "1" | "true" => Ok(Value::Boolean(true)),
                    "0" | "false" => Ok(Value::Boolean(false)),
                    _ => Err(XmlRpcError::InvalidBoolean(text)),
                }
            }
            "string" => self.read_text("string").map(Value::String),
            "double" => {
                let text = self.read_text("double")?;
                text.trim()
                    .parse()
                    .map(Value::Double)
                    .map_err(|_| XmlRpcError::InvalidDouble(text))
            }
            "dateTime.iso8601" => {
                let text = self.read_text("dateTime.iso8601")?;
                Ok(Value::DateTime(text.trim().to_owned()))
            }
            "base64" => {
                let text = self.read_text("base64")?;
                let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                Ok(Value::Base64(STANDARD.decode(compact)?))
            }
            "nil" => {
                self.expect_end("nil")?;
                Ok(Value::Nil)
            }
            "struct" => self.read_struct().map(Value::Struct),
            "array" => self.read_array().map(Value::Array),
            _ => Err(XmlRpcError::UnexpectedElement {
                expected: "value type",
                found: format!("<{name}>"),
            }),
        }
    }

    fn empty_typed(name: &str) -> Result<Value, XmlRpcError> {
        match name {
            "nil" => Ok(Value::Nil),
            "string" => Ok(Value::String(String::new())),
            "base64" => Ok(Value::Base64(Vec::new())),
            "struct" => Ok(Value::Struct(BTreeMap::new())),
            "array" => Ok(Value::Array(Vec::new())),
            _ => Err(XmlRpcError::UnexpectedElement {
                expected: "value type",
                found: format!("<{name}/>"),
            }),
        }
    }

    fn read_struct(&mut self) -> Result<BTreeMap<String, Value>, XmlRpcError> {
        let mut members = BTreeMap::new();
        loop {
            match self.next()? {
                Event::Start(e) if e.local_name().as_ref() == b"member" => {
                    self.expect_start("name")?;
                    let name = self.read_text("name")?;
                    let value = self.read_value()?;
                    self.expect_end("member")?;
                    members.insert(name, value);
                }
                Event::End(e) if e.local_name().as_ref() == b"struct" => return Ok(members),
                other => {
                    return Err(XmlRpcError::UnexpectedElement {
                        expected: "member",
                        found: describe(&other),
                    });
                }
            }
        }
    }

    fn read_array(&mut self) -> Result<Vec<Value>, XmlRpcError> {
        let mut items = Vec::new();
        match self.next()? {
            Event::Start(e) if e.local_name().as_ref() == b"data" => loop {
                match self.next()? {
                    Event::Start(e) if e.local_name().as_ref() == b"value" => {
                        items.push(self.read_value_body()?);
                    }
                    Event::Empty(e) if e.local_name().as_ref() == b"value" => {
                        items.push(Value::String(String::new()));
                    }
                    Event::End(e) if e.local_name().as_ref() == b"data" => break,
                    other => {
                        return Err(XmlRpcError::UnexpectedElement {
                            expected: "value",
                            found: describe(&other),
                        });
                    }
                }
            },
            Event::Empty(e) if e.local_name().as_ref() == b"data" => {}
            other => {
                return Err(XmlRpcError::UnexpectedElement {
                    expected: "data",
                    found: describe(&other),
                });
            }
        }
        self.expect_end("array")?;
        Ok(items)
    }
}
