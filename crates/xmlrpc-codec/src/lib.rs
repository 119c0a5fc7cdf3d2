pub mod de;
pub mod error;
pub mod ser;
pub mod types;

pub use crate::{
    error::XmlRpcError,
    types::{MethodCall, MethodResponse, Value},
};

pub fn encode_call(call: &MethodCall) -> String {
    let mut ser = ser::XmlRpcSerializer::new();
    ser.write_call(call);
    ser.into_inner()
}

pub fn decode_response(src: &str) -> Result<MethodResponse, XmlRpcError> {
    de::XmlRpcDeserializer::new(src).read_response()
}
