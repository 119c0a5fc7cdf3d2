use crate::types::{MethodCall, Value};
use base64::{Engine, engine::general_purpose::STANDARD};
use quick_xml::escape::escape;

pub struct XmlRpcSerializer {
    buffer: String,
}

impl Default for XmlRpcSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlRpcSerializer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub fn into_inner(self) -> String {
        self.buffer
    }

    pub fn write_call(&mut self, call: &MethodCall) {
        self.buffer.push_str(r#"<?xml version="1.0"?>"#);
        self.buffer.push_str("<methodCall><methodName>");
        self.buffer.push_str(&escape(call.method_name.as_str()));
        self.buffer.push_str("</methodName><params>");
        for param in &call.params {
            self.buffer.push_str("<param>");
            self.write_value(param);
            self.buffer.push_str("</param>");
        }
        self.buffer.push_str("</params></methodCall>");
    }

    pub fn write_value(&mut self, value: &Value) {
        self.buffer.push_str("<value>");
        match value {
            Value::Int(v) => self.write_scalar("int", &v.to_string()),
            Value::Boolean(v) => self.write_scalar("boolean", if *v { "1" } else { "0" }),
            Value::String(s) => self.write_scalar("string", &escape(s.as_str())),
            Value::Double(v) => self.write_scalar("double", &v.to_string()),
            Value::DateTime(s) => self.write_scalar("dateTime.iso8601", &escape(s.as_str())),
            Value::Base64(bytes) => self.write_scalar("base64", &STANDARD.encode(bytes)),
            Value::Struct(members) => {
                self.buffer.push_str("<struct>");
                for (name, member) in members {
                    self.buffer.push_str("<member><name>");
                    self.buffer.push_str(&escape(name.as_str()));
                    self.buffer.push_str("</name>");
                    self.write_value(member);
                    self.buffer.push_str("</member>");
                }
                self.buffer.push_str("</struct>");
            }
            Value::Array(items) => {
                self.buffer.push_str("<array><data>");
                for item in items {
                    self.write_value(item);
                }
                self.buffer.push_str("</data></array>");
            }
            Value::Nil => self.buffer.push_str("<nil/>"),
        }
        self.buffer.push_str("</value>");
    }

    fn write_scalar(&mut self, tag: &str, text: &str) {
        self.buffer.push('<');
        self.buffer.push_str(tag);
        self.buffer.push('>');
        self.buffer.push_str(text);
        self.buffer.push_str("</");
        self.buffer.push_str(tag);
        self.buffer.push('>');
    }
}
