//! JSON codec for call inputs and cached results
//!
//! JSON has no representation for `NaN` or the infinities; `serde_json`
//! silently writes them as `null`. Every value entering a key or a cache
//! entry goes through [`ensure_finite`] first, so such values are rejected
//! with [`Error::Serialization`] instead of colliding with `null`.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::ser::{self, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Reject values containing a non-finite `f32`/`f64` anywhere in their tree
pub fn ensure_finite<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    value
        .serialize(FiniteCheck)
        .map_err(|e| Error::serialization("Value cannot be encoded as JSON", e))
}

/// Convert to a JSON value, rejecting non-finite floats
pub fn to_checked_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    ensure_finite(value)?;
    serde_json::to_value(value).map_err(|e| Error::serialization("Failed to encode value", e))
}

/// Encode a computation result as a cache entry
pub fn encode_entry<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    ensure_finite(value)?;
    serde_json::to_vec(value).map_err(|e| Error::serialization("Failed to encode cache entry", e))
}

/// Decode a cache entry into the expected result type
pub fn decode_entry<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| Error::deserialization("Failed to decode cache entry", e))
}

/// Why a value was refused by [`FiniteCheck`]
#[derive(Debug)]
struct NonFiniteValue(String);

impl fmt::Display for NonFiniteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for NonFiniteValue {}

impl ser::Error for NonFiniteValue {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

/// Serializer that walks a value and produces nothing, failing on
/// non-finite floats. Map keys are walked like any other value.
#[derive(Clone, Copy)]
struct FiniteCheck;

type Check = std::result::Result<(), NonFiniteValue>;

fn check_float(v: f64) -> Check {
    if v.is_finite() {
        Ok(())
    } else {
        Err(NonFiniteValue(format!("non-finite float {v} has no JSON form")))
    }
}

impl Serializer for FiniteCheck {
    type Ok = ();
    type Error = NonFiniteValue;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> Check {
        Ok(())
    }
    fn serialize_i8(self, _v: i8) -> Check {
        Ok(())
    }
    fn serialize_i16(self, _v: i16) -> Check {
        Ok(())
    }
    fn serialize_i32(self, _v: i32) -> Check {
        Ok(())
    }
    fn serialize_i64(self, _v: i64) -> Check {
        Ok(())
    }
    fn serialize_i128(self, _v: i128) -> Check {
        Ok(())
    }
    fn serialize_u8(self, _v: u8) -> Check {
        Ok(())
    }
    fn serialize_u16(self, _v: u16) -> Check {
        Ok(())
    }
    fn serialize_u32(self, _v: u32) -> Check {
        Ok(())
    }
    fn serialize_u64(self, _v: u64) -> Check {
        Ok(())
    }
    fn serialize_u128(self, _v: u128) -> Check {
        Ok(())
    }
    fn serialize_f32(self, v: f32) -> Check {
        check_float(f64::from(v))
    }
    fn serialize_f64(self, v: f64) -> Check {
        check_float(v)
    }
    fn serialize_char(self, _v: char) -> Check {
        Ok(())
    }
    fn serialize_str(self, _v: &str) -> Check {
        Ok(())
    }
    fn serialize_bytes(self, _v: &[u8]) -> Check {
        Ok(())
    }
    fn serialize_none(self) -> Check {
        Ok(())
    }
    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Check {
        value.serialize(self)
    }
    fn serialize_unit(self) -> Check {
        Ok(())
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Check {
        Ok(())
    }
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Check {
        Ok(())
    }
    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Check {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Check {
        value.serialize(self)
    }
    fn serialize_seq(self, _len: Option<usize>) -> std::result::Result<Self, NonFiniteValue> {
        Ok(self)
    }
    fn serialize_tuple(self, _len: usize) -> std::result::Result<Self, NonFiniteValue> {
        Ok(self)
    }
    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, NonFiniteValue> {
        Ok(self)
    }
    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, NonFiniteValue> {
        Ok(self)
    }
    fn serialize_map(self, _len: Option<usize>) -> std::result::Result<Self, NonFiniteValue> {
        Ok(self)
    }
    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, NonFiniteValue> {
        Ok(self)
    }
    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, NonFiniteValue> {
        Ok(self)
    }
}

impl ser::SerializeSeq for FiniteCheck {
    type Ok = ();
    type Error = NonFiniteValue;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }
    fn end(self) -> Check {
        Ok(())
    }
}

impl ser::SerializeTuple for FiniteCheck {
    type Ok = ();
    type Error = NonFiniteValue;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }
    fn end(self) -> Check {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for FiniteCheck {
    type Ok = ();
    type Error = NonFiniteValue;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }
    fn end(self) -> Check {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for FiniteCheck {
    type Ok = ();
    type Error = NonFiniteValue;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }
    fn end(self) -> Check {
        Ok(())
    }
}

impl ser::SerializeMap for FiniteCheck {
    type Ok = ();
    type Error = NonFiniteValue;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Check {
        key.serialize(*self)
    }
    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }
    fn end(self) -> Check {
        Ok(())
    }
}

impl ser::SerializeStruct for FiniteCheck {
    type Ok = ();
    type Error = NonFiniteValue;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _key: &'static str, value: &T) -> Check {
        value.serialize(*self)
    }
    fn end(self) -> Check {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FiniteCheck {
    type Ok = ();
    type Error = NonFiniteValue;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _key: &'static str, value: &T) -> Check {
        value.serialize(*self)
    }
    fn end(self) -> Check {
        Ok(())
    }
}
