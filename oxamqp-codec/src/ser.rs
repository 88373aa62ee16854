//! Serializer for the AMQP 1.0 binary type grammar
//!
//! The most compact legal format code is always chosen. Array elements share
//! a single constructor, so they use the widest code of their type.

use bytes::BufMut;
use serde::ser::{self, Serialize};

use crate::{
    __constants::{
        ARRAY, DECIMAL128, DECIMAL32, DECIMAL64, DESCRIBED_BASIC, DESCRIBED_LIST, DESCRIPTOR,
        SYMBOL, TIMESTAMP, UUID,
    },
    fixed_width::{DECIMAL128_WIDTH, DECIMAL32_WIDTH, DECIMAL64_WIDTH, UUID_WIDTH},
    format_code::EncodingCodes,
    util::{IsArrayElement, NewType, StructEncoding},
    value::Value,
    Error,
};

/// Serialize an instance of type `T` into a byte vector
///
/// # Example
///
/// ```rust
/// use oxamqp_codec::{to_vec, Value};
///
/// let buf = to_vec(&Value::UInt(0)).unwrap();
/// assert_eq!(buf, vec![0x43]);
///
/// let buf = to_vec(&vec![1u32, 2]).unwrap();
/// assert_eq!(buf, vec![0xc0, 0x05, 0x02, 0x52, 0x01, 0x52, 0x02]);
/// ```
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>, Error>
where
    T: Serialize + ?Sized,
{
    let mut writer = Vec::new();
    let mut serializer = Serializer::new(&mut writer);
    value.serialize(&mut serializer)?;
    Ok(writer)
}

/// Encoder writing values one after another into a buffer
#[derive(Debug, Default)]
pub struct Encoder<B> {
    buf: B,
}

impl<B: BufMut> Encoder<B> {
    /// Creates a new encoder over `buf`
    pub fn new(buf: B) -> Self {
        Self { buf }
    }

    /// Appends one encoded value
    pub fn encode<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(&mut Serializer::new(&mut self.buf))
    }

    /// Get a reference to the underlying buffer
    pub fn get_ref(&self) -> &B {
        &self.buf
    }

    /// Consumes the encoder into the underlying buffer
    pub fn into_inner(self) -> B {
        self.buf
    }
}

/// Writes one value with its constructor
pub fn write_value<B: BufMut>(buf: &mut B, value: &Value) -> Result<(), Error> {
    value.serialize(&mut Serializer::new(buf))
}

/// A serializer that writes the AMQP 1.0 binary encoding into a [`BufMut`]
#[derive(Debug)]
pub struct Serializer<W> {
    writer: W,
    new_type: NewType,
    is_array_elem: IsArrayElement,
}

impl<W: BufMut> Serializer<W> {
    /// Creates a new serializer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            new_type: NewType::None,
            is_array_elem: IsArrayElement::False,
        }
    }

    fn array_elements(writer: W) -> Self {
        Self {
            is_array_elem: IsArrayElement::FirstElement,
            ..Self::new(writer)
        }
    }

    /// Consumes the serializer into the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn is_array_elem(&self) -> bool {
        !matches!(self.is_array_elem, IsArrayElement::False)
    }

    /// Writes the constructor and returns the code whose payload must follow.
    ///
    /// Outside arrays that is `compact`. Inside an array every element uses
    /// `wide` and only the first element writes it.
    fn constructor(
        &mut self,
        compact: EncodingCodes,
        wide: EncodingCodes,
    ) -> Result<EncodingCodes, Error> {
        match self.is_array_elem {
            IsArrayElement::False => {
                self.writer.put_u8(compact as u8);
                Ok(compact)
            }
            IsArrayElement::FirstElement => {
                self.writer.put_u8(wide as u8);
                self.is_array_elem = IsArrayElement::OtherElement(wide);
                Ok(wide)
            }
            IsArrayElement::OtherElement(code) if code == wide => Ok(wide),
            IsArrayElement::OtherElement(code) => Err(Error::validation(
                format!("array element of code {}", code),
                wide,
            )),
        }
    }

    fn write_variable(
        &mut self,
        bytes: &[u8],
        small: EncodingCodes,
        wide: EncodingCodes,
    ) -> Result<(), Error> {
        let len = u32::try_from(bytes.len()).map_err(|_| Error::TooLong)?;
        let compact = match len <= u8::MAX as u32 {
            true => small,
            false => wide,
        };
        match self.constructor(compact, wide)? {
            code if code == small => self.writer.put_u8(len as u8),
            _ => self.writer.put_u32(len),
        }
        self.writer.put_slice(bytes);
        Ok(())
    }

    fn write_fixed(
        &mut self,
        code: EncodingCodes,
        bytes: &[u8],
        width: usize,
    ) -> Result<(), Error> {
        if bytes.len() != width {
            return Err(Error::validation(
                format!("{} bytes for {}", width, code),
                format!("{} bytes", bytes.len()),
            ));
        }
        self.constructor(code, code)?;
        self.writer.put_slice(bytes);
        Ok(())
    }

    fn write_list(&mut self, count: usize, body: &[u8]) -> Result<(), Error> {
        let compact = match (count, fits_small(count, body.len())) {
            (0, _) => EncodingCodes::List0,
            (_, true) => EncodingCodes::List8,
            (_, false) => EncodingCodes::List32,
        };
        match self.constructor(compact, EncodingCodes::List32)? {
            EncodingCodes::List0 => Ok(()),
            code => write_sized(&mut self.writer, code == EncodingCodes::List32, count, body),
        }
    }

    fn write_map(&mut self, count: usize, body: &[u8]) -> Result<(), Error> {
        let compact = match fits_small(count, body.len()) {
            true => EncodingCodes::Map8,
            false => EncodingCodes::Map32,
        };
        let code = self.constructor(compact, EncodingCodes::Map32)?;
        write_sized(&mut self.writer, code == EncodingCodes::Map32, count, body)
    }

    /// `body` starts with the shared element constructor unless the array is
    /// empty
    fn write_array(&mut self, count: usize, mut body: Vec<u8>) -> Result<(), Error> {
        if count == 0 {
            body.push(EncodingCodes::Null as u8);
        }
        let compact = match fits_small(count, body.len()) {
            true => EncodingCodes::Array8,
            false => EncodingCodes::Array32,
        };
        let code = self.constructor(compact, EncodingCodes::Array32)?;
        write_sized(&mut self.writer, code == EncodingCodes::Array32, count, &body)
    }
}

/// Whether the compound fits the one-octet size and count encoding
fn fits_small(count: usize, body_len: usize) -> bool {
    count <= u8::MAX as usize && body_len < u8::MAX as usize
}

/// Writes size, count and body. The size covers the count and the body.
fn write_sized<B: BufMut>(buf: &mut B, wide: bool, count: usize, body: &[u8]) -> Result<(), Error> {
    match wide {
        false => {
            let size = u8::try_from(body.len() + 1).map_err(|_| Error::TooLong)?;
            let count = u8::try_from(count).map_err(|_| Error::TooLong)?;
            buf.put_u8(size);
            buf.put_u8(count);
        }
        true => {
            let size = u32::try_from(body.len() + 4).map_err(|_| Error::TooLong)?;
            let count = u32::try_from(count).map_err(|_| Error::TooLong)?;
            buf.put_u32(size);
            buf.put_u32(count);
        }
    }
    buf.put_slice(body);
    Ok(())
}

impl<'a, W: BufMut> ser::Serializer for &'a mut Serializer<W> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a, W>;
    type SerializeTuple = SeqSerializer<'a, W>;
    type SerializeTupleStruct = SeqSerializer<'a, W>;
    type SerializeTupleVariant = ser::Impossible<(), Error>;
    type SerializeMap = MapSerializer<'a, W>;
    type SerializeStruct = StructSerializer<'a, W>;
    type SerializeStructVariant = ser::Impossible<(), Error>;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn serialize_bool(self, v: bool) -> Result<Self::Ok, Self::Error> {
        let compact = match v {
            true => EncodingCodes::BooleanTrue,
            false => EncodingCodes::BooleanFalse,
        };
        if self.constructor(compact, EncodingCodes::Boolean)? == EncodingCodes::Boolean {
            self.writer.put_u8(u8::from(v));
        }
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok, Self::Error> {
        self.constructor(EncodingCodes::Byte, EncodingCodes::Byte)?;
        self.writer.put_i8(v);
        Ok(())
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok, Self::Error> {
        self.constructor(EncodingCodes::Short, EncodingCodes::Short)?;
        self.writer.put_i16(v);
        Ok(())
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok, Self::Error> {
        let compact = match i8::try_from(v) {
            Ok(_) => EncodingCodes::SmallInt,
            Err(_) => EncodingCodes::Int,
        };
        match self.constructor(compact, EncodingCodes::Int)? {
            EncodingCodes::SmallInt => self.writer.put_i8(v as i8),
            _ => self.writer.put_i32(v),
        }
        Ok(())
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok, Self::Error> {
        if let NewType::Timestamp = std::mem::take(&mut self.new_type) {
            self.constructor(EncodingCodes::Timestamp, EncodingCodes::Timestamp)?;
            self.writer.put_i64(v);
            return Ok(());
        }

        let compact = match i8::try_from(v) {
            Ok(_) => EncodingCodes::SmallLong,
            Err(_) => EncodingCodes::Long,
        };
        match self.constructor(compact, EncodingCodes::Long)? {
            EncodingCodes::SmallLong => self.writer.put_i8(v as i8),
            _ => self.writer.put_i64(v),
        }
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok, Self::Error> {
        self.constructor(EncodingCodes::UByte, EncodingCodes::UByte)?;
        self.writer.put_u8(v);
        Ok(())
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok, Self::Error> {
        self.constructor(EncodingCodes::UShort, EncodingCodes::UShort)?;
        self.writer.put_u16(v);
        Ok(())
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok, Self::Error> {
        let compact = match v {
            0 => EncodingCodes::UInt0,
            1..=255 => EncodingCodes::SmallUInt,
            _ => EncodingCodes::UInt,
        };
        match self.constructor(compact, EncodingCodes::UInt)? {
            EncodingCodes::UInt0 => {}
            EncodingCodes::SmallUInt => self.writer.put_u8(v as u8),
            _ => self.writer.put_u32(v),
        }
        Ok(())
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok, Self::Error> {
        let compact = match v {
            0 => EncodingCodes::ULong0,
            1..=255 => EncodingCodes::SmallULong,
            _ => EncodingCodes::ULong,
        };
        match self.constructor(compact, EncodingCodes::ULong)? {
            EncodingCodes::ULong0 => {}
            EncodingCodes::SmallULong => self.writer.put_u8(v as u8),
            _ => self.writer.put_u64(v),
        }
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok, Self::Error> {
        self.constructor(EncodingCodes::Float, EncodingCodes::Float)?;
        self.writer.put_f32(v);
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok, Self::Error> {
        self.constructor(EncodingCodes::Double, EncodingCodes::Double)?;
        self.writer.put_f64(v);
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok, Self::Error> {
        self.constructor(EncodingCodes::Char, EncodingCodes::Char)?;
        self.writer.put_u32(u32::from(v));
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok, Self::Error> {
        match std::mem::take(&mut self.new_type) {
            NewType::Symbol => {
                if !v.is_ascii() {
                    return Err(Error::validation(
                        "symbol (seven bit ASCII)",
                        format!("{:?}", v),
                    ));
                }
                self.write_variable(v.as_bytes(), EncodingCodes::Sym8, EncodingCodes::Sym32)
            }
            _ => self.write_variable(v.as_bytes(), EncodingCodes::Str8, EncodingCodes::Str32),
        }
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, Self::Error> {
        match std::mem::take(&mut self.new_type) {
            NewType::Dec32 => self.write_fixed(EncodingCodes::Decimal32, v, DECIMAL32_WIDTH),
            NewType::Dec64 => self.write_fixed(EncodingCodes::Decimal64, v, DECIMAL64_WIDTH),
            NewType::Dec128 => self.write_fixed(EncodingCodes::Decimal128, v, DECIMAL128_WIDTH),
            NewType::Uuid => self.write_fixed(EncodingCodes::Uuid, v, UUID_WIDTH),
            _ => self.write_variable(v, EncodingCodes::VBin8, EncodingCodes::VBin32),
        }
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        self.serialize_unit()
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        self.constructor(EncodingCodes::Null, EncodingCodes::Null)?;
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        self.serialize_u32(variant_index)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        self.new_type = match name {
            SYMBOL => NewType::Symbol,
            TIMESTAMP => NewType::Timestamp,
            UUID => NewType::Uuid,
            DECIMAL32 => NewType::Dec32,
            DECIMAL64 => NewType::Dec64,
            DECIMAL128 => NewType::Dec128,
            ARRAY => NewType::Array,
            _ => NewType::None,
        };
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        match name {
            DESCRIPTOR if self.is_array_elem() => Err(Error::IsDescribedType),
            DESCRIPTOR => {
                self.writer.put_u8(EncodingCodes::DescribedType as u8);
                value.serialize(self)
            }
            _ => Err(Error::OperationNotSupported("enum variant with data")),
        }
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        match std::mem::take(&mut self.new_type) {
            NewType::Array => Ok(SeqSerializer::array(self)),
            _ => Ok(SeqSerializer::list(self)),
        }
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Ok(SeqSerializer::list(self))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Ok(SeqSerializer::list(self))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Err(Error::OperationNotSupported("enum variant with data"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(MapSerializer::new(self))
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        let encoding = match name {
            DESCRIBED_BASIC | DESCRIBED_LIST if self.is_array_elem() => {
                return Err(Error::IsDescribedType)
            }
            DESCRIBED_BASIC => StructEncoding::DescribedBasic,
            DESCRIBED_LIST => StructEncoding::DescribedList,
            _ => StructEncoding::None,
        };
        Ok(StructSerializer::new(self, encoding))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Err(Error::OperationNotSupported("enum variant with data"))
    }
}

/// Serializer for lists and arrays
#[derive(Debug)]
pub struct SeqSerializer<'a, W> {
    se: &'a mut Serializer<W>,
    elements: Serializer<Vec<u8>>,
    is_array: bool,
    count: usize,
}

impl<'a, W: BufMut> SeqSerializer<'a, W> {
    fn list(se: &'a mut Serializer<W>) -> Self {
        Self {
            se,
            elements: Serializer::new(Vec::new()),
            is_array: false,
            count: 0,
        }
    }

    fn array(se: &'a mut Serializer<W>) -> Self {
        Self {
            se,
            elements: Serializer::array_elements(Vec::new()),
            is_array: true,
            count: 0,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        value.serialize(&mut self.elements)?;
        self.count += 1;
        Ok(())
    }

    fn finish(self) -> Result<(), Error> {
        let body = self.elements.into_inner();
        match self.is_array {
            true => self.se.write_array(self.count, body),
            false => self.se.write_list(self.count, &body),
        }
    }
}

impl<'a, W: BufMut> ser::SerializeSeq for SeqSerializer<'a, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.push(value)
    }

    fn end(self) -> Result<(), Error> {
        self.finish()
    }
}

impl<'a, W: BufMut> ser::SerializeTuple for SeqSerializer<'a, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.push(value)
    }

    fn end(self) -> Result<(), Error> {
        self.finish()
    }
}

impl<'a, W: BufMut> ser::SerializeTupleStruct for SeqSerializer<'a, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.push(value)
    }

    fn end(self) -> Result<(), Error> {
        self.finish()
    }
}

/// Serializer for maps. The count covers keys and values.
#[derive(Debug)]
pub struct MapSerializer<'a, W> {
    se: &'a mut Serializer<W>,
    entries: Serializer<Vec<u8>>,
    count: usize,
}

impl<'a, W: BufMut> MapSerializer<'a, W> {
    fn new(se: &'a mut Serializer<W>) -> Self {
        Self {
            se,
            entries: Serializer::new(Vec::new()),
            count: 0,
        }
    }
}

impl<'a, W: BufMut> ser::SerializeMap for MapSerializer<'a, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Error> {
        key.serialize(&mut self.entries)?;
        self.count += 1;
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        value.serialize(&mut self.entries)?;
        self.count += 1;
        Ok(())
    }

    fn end(self) -> Result<(), Error> {
        let body = self.entries.into_inner();
        self.se.write_map(self.count, &body)
    }
}

/// Serializer for described values and plain structs.
///
/// The descriptor field is written straight through. A described basic value
/// writes its value the same way, every other struct collects its fields
/// into a list.
#[derive(Debug)]
pub struct StructSerializer<'a, W> {
    se: &'a mut Serializer<W>,
    encoding: StructEncoding,
    fields: Serializer<Vec<u8>>,
    count: usize,
}

impl<'a, W: BufMut> StructSerializer<'a, W> {
    fn new(se: &'a mut Serializer<W>, encoding: StructEncoding) -> Self {
        Self {
            se,
            encoding,
            fields: Serializer::new(Vec::new()),
            count: 0,
        }
    }
}

impl<'a, W: BufMut> ser::SerializeStruct for StructSerializer<'a, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        match (key, self.encoding) {
            (DESCRIPTOR, _) | (_, StructEncoding::DescribedBasic) => value.serialize(&mut *self.se),
            _ => {
                value.serialize(&mut self.fields)?;
                self.count += 1;
                Ok(())
            }
        }
    }

    fn end(self) -> Result<(), Error> {
        match self.encoding {
            StructEncoding::DescribedBasic => Ok(()),
            StructEncoding::DescribedList | StructEncoding::None => {
                let body = self.fields.into_inner();
                self.se.write_list(self.count, &body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ordered_float::OrderedFloat;
    use serde_bytes::ByteBuf;

    use super::*;
    use crate::{
        described::Described,
        descriptor::Descriptor,
        list::List,
        primitives::{Array, OrderedMap, Symbol, Timestamp},
    };

    fn assert_eq_on_serialized_vs_expected(value: Value, expected: &[u8]) {
        let serialized = to_vec(&value).unwrap();
        assert_eq!(&serialized[..], expected);
    }

    #[test]
    fn test_bool() {
        assert_eq_on_serialized_vs_expected(Value::Bool(true), &[EncodingCodes::BooleanTrue as u8]);
        assert_eq_on_serialized_vs_expected(
            Value::Bool(false),
            &[EncodingCodes::BooleanFalse as u8],
        );
    }

    #[test]
    fn test_uint_picks_compact_code() {
        assert_eq_on_serialized_vs_expected(Value::UInt(0), &[EncodingCodes::UInt0 as u8]);
        assert_eq_on_serialized_vs_expected(
            Value::UInt(255),
            &[EncodingCodes::SmallUInt as u8, 255],
        );
        assert_eq_on_serialized_vs_expected(
            Value::UInt(256),
            &[EncodingCodes::UInt as u8, 0, 0, 1, 0],
        );
    }

    #[test]
    fn test_ulong_picks_compact_code() {
        assert_eq_on_serialized_vs_expected(Value::ULong(0), &[EncodingCodes::ULong0 as u8]);
        assert_eq_on_serialized_vs_expected(
            Value::ULong(0x26),
            &[EncodingCodes::SmallULong as u8, 0x26],
        );
        assert_eq_on_serialized_vs_expected(
            Value::ULong(u64::MAX),
            &[EncodingCodes::ULong as u8, 255, 255, 255, 255, 255, 255, 255, 255],
        );
    }

    #[test]
    fn test_signed_picks_compact_code() {
        assert_eq_on_serialized_vs_expected(Value::Int(-1), &[EncodingCodes::SmallInt as u8, 0xff]);
        assert_eq_on_serialized_vs_expected(
            Value::Int(128),
            &[EncodingCodes::Int as u8, 0, 0, 0, 128],
        );
        assert_eq_on_serialized_vs_expected(
            Value::Long(127),
            &[EncodingCodes::SmallLong as u8, 127],
        );
        assert_eq_on_serialized_vs_expected(
            Value::Long(-129),
            &[EncodingCodes::Long as u8, 255, 255, 255, 255, 255, 255, 255, 0x7f],
        );
    }

    #[test]
    fn test_double() {
        let mut expected = vec![EncodingCodes::Double as u8];
        expected.extend_from_slice(&1.5f64.to_be_bytes());
        assert_eq_on_serialized_vs_expected(Value::Double(OrderedFloat(1.5)), &expected);
    }

    #[test]
    fn test_string_uses_byte_length() {
        let s = "ü";
        assert_eq_on_serialized_vs_expected(
            Value::String(s.into()),
            &[EncodingCodes::Str8 as u8, 2, 0xc3, 0xbc],
        );

        let long = "a".repeat(256);
        let buf = to_vec(&Value::String(long)).unwrap();
        assert_eq!(&buf[..5], &[EncodingCodes::Str32 as u8, 0, 0, 1, 0]);
        assert_eq!(buf.len(), 5 + 256);
    }

    #[test]
    fn test_symbol_rejects_non_ascii() {
        assert_eq_on_serialized_vs_expected(
            Value::Symbol(Symbol::from("ab")),
            &[EncodingCodes::Sym8 as u8, 2, b'a', b'b'],
        );
        assert!(to_vec(&Value::Symbol(Symbol::from("ä"))).is_err());
    }

    #[test]
    fn test_binary() {
        assert_eq_on_serialized_vs_expected(
            Value::Binary(ByteBuf::from(vec![1, 2, 3])),
            &[EncodingCodes::VBin8 as u8, 3, 1, 2, 3],
        );
    }

    #[test]
    fn test_list() {
        assert_eq_on_serialized_vs_expected(Value::List(List::new()), &[EncodingCodes::List0 as u8]);
        let list = List::from_values([Value::Bool(true), Value::UInt(1)]);
        assert_eq_on_serialized_vs_expected(
            Value::List(list),
            &[
                EncodingCodes::List8 as u8,
                4,
                2,
                EncodingCodes::BooleanTrue as u8,
                EncodingCodes::SmallUInt as u8,
                1,
            ],
        );
    }

    #[test]
    fn test_large_list_uses_list32() {
        let list: List = (0..300i64).map(|_| Value::Null).collect();
        let buf = to_vec(&Value::List(list)).unwrap();
        assert_eq!(buf[0], EncodingCodes::List32 as u8);
        assert_eq!(&buf[1..5], &(300u32 + 4).to_be_bytes());
        assert_eq!(&buf[5..9], &300u32.to_be_bytes());
    }

    #[test]
    fn test_map() {
        let mut map = OrderedMap::new();
        map.insert(Value::Symbol(Symbol::from("a")), Value::UByte(1));
        assert_eq_on_serialized_vs_expected(
            Value::Map(map),
            &[
                EncodingCodes::Map8 as u8,
                6,
                2,
                EncodingCodes::Sym8 as u8,
                1,
                b'a',
                EncodingCodes::UByte as u8,
                1,
            ],
        );
    }

    #[test]
    fn test_array_shares_constructor() {
        let array = Array::from(vec![Value::UInt(1), Value::UInt(300)]);
        assert_eq_on_serialized_vs_expected(
            Value::Array(array),
            &[
                EncodingCodes::Array8 as u8,
                10,
                2,
                EncodingCodes::UInt as u8,
                0,
                0,
                0,
                1,
                0,
                0,
                1,
                44,
            ],
        );
    }

    #[test]
    fn test_array_must_be_homogeneous() {
        let array = Array::from(vec![Value::UInt(1), Value::Long(1)]);
        assert!(matches!(
            to_vec(&Value::Array(array)),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_described_uses_code() {
        let released = Described::new(Descriptor::Code(0x26), Value::List(List::new()));
        assert_eq_on_serialized_vs_expected(
            Value::from(released),
            &[
                EncodingCodes::DescribedType as u8,
                EncodingCodes::SmallULong as u8,
                0x26,
                EncodingCodes::List0 as u8,
            ],
        );
    }

    #[test]
    fn test_serialize_native_sequence_as_list() {
        let expected = [
            EncodingCodes::List8 as u8,
            5,
            2,
            EncodingCodes::SmallUInt as u8,
            1,
            EncodingCodes::SmallUInt as u8,
            2,
        ];
        assert_eq!(to_vec(&vec![1u32, 2]).unwrap(), expected);
        assert_eq!(to_vec(&(1u32, 2u32)).unwrap(), expected);
    }

    #[test]
    fn test_serialize_typed_array_matches_value_array() {
        let typed = to_vec(&Array::from(vec![1u32, 300])).unwrap();
        let untyped =
            to_vec(&Value::Array(Array::from(vec![Value::UInt(1), Value::UInt(300)]))).unwrap();
        assert_eq!(typed, untyped);
    }

    #[test]
    fn test_array_of_strings_uses_str32() {
        let buf = to_vec(&Array::from(vec!["a", "bc"])).unwrap();
        assert_eq!(
            buf,
            vec![
                EncodingCodes::Array8 as u8,
                13,
                2,
                EncodingCodes::Str32 as u8,
                0,
                0,
                0,
                1,
                b'a',
                0,
                0,
                0,
                2,
                b'b',
                b'c',
            ]
        );
    }

    #[test]
    fn test_empty_array_has_null_constructor() {
        let buf = to_vec(&Array::<u32>::default()).unwrap();
        assert_eq!(
            buf,
            vec![EncodingCodes::Array8 as u8, 2, 0, EncodingCodes::Null as u8]
        );
    }

    #[test]
    fn test_described_array_element_is_rejected() {
        let element = Value::from(Described::new(Descriptor::Code(1), Value::Null));
        assert_eq!(
            to_vec(&Value::Array(Array::from(vec![element]))),
            Err(Error::IsDescribedType)
        );
    }

    #[test]
    fn test_option_and_timestamp() {
        assert_eq!(to_vec(&None::<u32>).unwrap(), vec![EncodingCodes::Null as u8]);
        assert_eq!(to_vec(&Some(0u64)).unwrap(), vec![EncodingCodes::ULong0 as u8]);

        let mut expected = vec![EncodingCodes::Timestamp as u8];
        expected.extend_from_slice(&1_000i64.to_be_bytes());
        assert_eq!(to_vec(&Timestamp::from_milliseconds(1_000)).unwrap(), expected);
    }

    #[test]
    fn test_encoder_appends_values() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.encode(&Value::Bool(true)).unwrap();
        encoder.encode(&Symbol::from("a")).unwrap();
        assert_eq!(
            encoder.into_inner(),
            vec![
                EncodingCodes::BooleanTrue as u8,
                EncodingCodes::Sym8 as u8,
                1,
                b'a'
            ]
        );
    }
}
