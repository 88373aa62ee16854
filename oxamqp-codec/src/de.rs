//! Deserializer for the AMQP 1.0 binary type grammar

use serde::de::{self, Deserialize};

use crate::{
    __constants::{
        ARRAY, DECIMAL128, DECIMAL32, DECIMAL64, DESCRIBED_BASIC, DESCRIPTOR, SYMBOL, TIMESTAMP,
        UUID, VALUE,
    },
    fixed_width::{DECIMAL128_WIDTH, DECIMAL32_WIDTH, DECIMAL64_WIDTH, UUID_WIDTH},
    format_code::EncodingCodes,
    read::SliceReader,
    util::{EnumType, NewType},
    value::Value,
    Error,
};

/// Largest element count accepted for an array whose elements occupy no
/// bytes (null, true, false, uint0, ulong0 and list0)
pub const MAX_ZERO_WIDTH_ELEMENTS: usize = u16::MAX as usize;

/// Deserialize exactly one instance of type `T` from a byte slice.
///
/// Trailing bytes fail with [`Error::InvalidLength`]
pub fn from_slice<'de, T: Deserialize<'de>>(slice: &'de [u8]) -> Result<T, Error> {
    let mut de = Deserializer::new(slice);
    let value = T::deserialize(&mut de)?;
    match de.is_empty() {
        true => Ok(value),
        false => Err(Error::InvalidLength),
    }
}

/// Decoder reading consecutive values, e.g. the sections of a message
#[derive(Debug, Clone)]
pub struct Decoder<'de> {
    de: Deserializer<'de>,
}

impl<'de> Decoder<'de> {
    /// Creates a decoder over `slice`
    pub fn new(slice: &'de [u8]) -> Self {
        Self {
            de: Deserializer::new(slice),
        }
    }

    /// Whether all input has been consumed
    pub fn is_empty(&self) -> bool {
        self.de.is_empty()
    }

    /// Decodes the next value
    pub fn decode(&mut self) -> Result<Value, Error> {
        Value::deserialize(&mut self.de)
    }
}

impl<'de> Iterator for Decoder<'de> {
    type Item = Result<Value, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.is_empty() {
            true => None,
            false => Some(self.decode()),
        }
    }
}

/// A deserializer reading the AMQP 1.0 binary encoding from a byte slice
#[derive(Debug, Clone)]
pub struct Deserializer<'de> {
    reader: SliceReader<'de>,
    new_type: NewType,
    enum_type: EnumType,

    /// The constructor shared by the elements of the array being read
    elem_format_code: Option<EncodingCodes>,
}

impl<'de> Deserializer<'de> {
    /// Creates a new deserializer
    pub fn new(slice: &'de [u8]) -> Self {
        Self {
            reader: SliceReader::new(slice),
            new_type: NewType::None,
            enum_type: EnumType::None,
            elem_format_code: None,
        }
    }

    /// Whether all input has been consumed
    pub fn is_empty(&self) -> bool {
        self.reader.is_empty()
    }

    fn read_format_code(&mut self) -> Result<EncodingCodes, Error> {
        match self.elem_format_code {
            Some(code) => Ok(code),
            None => EncodingCodes::try_from(self.reader.next_byte()?),
        }
    }

    fn peek_format_code(&self) -> Result<u8, Error> {
        match self.elem_format_code {
            Some(code) => Ok(code as u8),
            None => self.reader.peek_byte(),
        }
    }

    fn read_len(&mut self, wide: bool) -> Result<usize, Error> {
        let len = match wide {
            false => self.reader.read_u8()? as usize,
            true => self.reader.read_u32()? as usize,
        };
        Ok(len)
    }

    fn parse_bool(&mut self) -> Result<bool, Error> {
        match self.read_format_code()? {
            EncodingCodes::Boolean => match self.reader.read_u8()? {
                0x00 => Ok(false),
                0x01 => Ok(true),
                _ => Err(Error::InvalidValue),
            },
            EncodingCodes::BooleanTrue => Ok(true),
            EncodingCodes::BooleanFalse => Ok(false),
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    fn parse_i8(&mut self) -> Result<i8, Error> {
        match self.read_format_code()? {
            EncodingCodes::Byte => self.reader.read_i8(),
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    fn parse_i16(&mut self) -> Result<i16, Error> {
        match self.read_format_code()? {
            EncodingCodes::Short => self.reader.read_i16(),
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    fn parse_i32(&mut self) -> Result<i32, Error> {
        match self.read_format_code()? {
            EncodingCodes::Int => self.reader.read_i32(),
            EncodingCodes::SmallInt => self.reader.read_i8().map(i32::from),
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    fn parse_i64(&mut self) -> Result<i64, Error> {
        let code = self.read_format_code()?;
        match (std::mem::take(&mut self.new_type), code) {
            (NewType::Timestamp, EncodingCodes::Timestamp) => self.reader.read_i64(),
            (NewType::Timestamp, code) => Err(Error::InvalidFormatCode(code as u8)),
            (_, EncodingCodes::Long) => self.reader.read_i64(),
            (_, EncodingCodes::SmallLong) => self.reader.read_i8().map(i64::from),
            (_, code) => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    fn parse_u8(&mut self) -> Result<u8, Error> {
        match self.read_format_code()? {
            EncodingCodes::UByte => self.reader.read_u8(),
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    fn parse_u16(&mut self) -> Result<u16, Error> {
        match self.read_format_code()? {
            EncodingCodes::UShort => self.reader.read_u16(),
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    fn parse_u32(&mut self) -> Result<u32, Error> {
        match self.read_format_code()? {
            EncodingCodes::UInt => self.reader.read_u32(),
            EncodingCodes::SmallUInt => self.reader.read_u8().map(u32::from),
            EncodingCodes::UInt0 => Ok(0),
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    fn parse_u64(&mut self) -> Result<u64, Error> {
        match self.read_format_code()? {
            EncodingCodes::ULong => self.reader.read_u64(),
            EncodingCodes::SmallULong => self.reader.read_u8().map(u64::from),
            EncodingCodes::ULong0 => Ok(0),
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    fn parse_f32(&mut self) -> Result<f32, Error> {
        match self.read_format_code()? {
            EncodingCodes::Float => self.reader.read_f32(),
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    fn parse_f64(&mut self) -> Result<f64, Error> {
        match self.read_format_code()? {
            EncodingCodes::Double => self.reader.read_f64(),
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    fn parse_char(&mut self) -> Result<char, Error> {
        match self.read_format_code()? {
            EncodingCodes::Char => {
                char::from_u32(self.reader.read_u32()?).ok_or(Error::InvalidValue)
            }
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    /// Strings, or symbols when reading a symbol newtype
    fn parse_str(&mut self) -> Result<&'de str, Error> {
        let code = self.read_format_code()?;
        let wide = match (std::mem::take(&mut self.new_type), code) {
            (NewType::Symbol, EncodingCodes::Sym8) => false,
            (NewType::Symbol, EncodingCodes::Sym32) => true,
            (NewType::None, EncodingCodes::Str8) => false,
            (NewType::None, EncodingCodes::Str32) => true,
            (_, code) => return Err(Error::InvalidFormatCode(code as u8)),
        };
        let len = self.read_len(wide)?;
        let bytes = self.reader.read_bytes(len)?;
        Ok(std::str::from_utf8(bytes)?)
    }

    /// Binary, or the raw bytes of a decimal or uuid newtype
    fn parse_bytes(&mut self) -> Result<&'de [u8], Error> {
        let code = self.read_format_code()?;
        match (std::mem::take(&mut self.new_type), code) {
            (NewType::Dec32, EncodingCodes::Decimal32) => self.reader.read_bytes(DECIMAL32_WIDTH),
            (NewType::Dec64, EncodingCodes::Decimal64) => self.reader.read_bytes(DECIMAL64_WIDTH),
            (NewType::Dec128, EncodingCodes::Decimal128) => {
                self.reader.read_bytes(DECIMAL128_WIDTH)
            }
            (NewType::Uuid, EncodingCodes::Uuid) => self.reader.read_bytes(UUID_WIDTH),
            (NewType::None, EncodingCodes::VBin8) => {
                let len = self.read_len(false)?;
                self.reader.read_bytes(len)
            }
            (NewType::None, EncodingCodes::VBin32) => {
                let len = self.read_len(true)?;
                self.reader.read_bytes(len)
            }
            (_, code) => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    /// Reads the size and count of a compound. Returns the count and the
    /// number of body bytes that follow the count.
    fn read_compound_header(&mut self, wide: bool) -> Result<(usize, usize), Error> {
        let size = self.read_len(wide)?;
        if size > self.reader.remaining().len() {
            return Err(Error::UnexpectedEof);
        }
        let count = self.read_len(wide)?;
        let width = match wide {
            true => 4,
            false => 1,
        };
        let body_len = size.checked_sub(width).ok_or(Error::InvalidLength)?;
        Ok((count, body_len))
    }

    /// Runs `visit` over a compound body of `body_len` bytes, which must be
    /// consumed exactly
    fn visit_compound<T, F>(
        &mut self,
        elem_format_code: Option<EncodingCodes>,
        body_len: usize,
        visit: F,
    ) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let outer = std::mem::replace(&mut self.elem_format_code, elem_format_code);
        let start = self.reader.remaining().len();
        let result = visit(self);
        self.elem_format_code = outer;

        let value = result?;
        match start - self.reader.remaining().len() == body_len {
            true => Ok(value),
            false => Err(Error::InvalidLength),
        }
    }
}

/// Every element takes at least one byte, except in arrays of a zero-width
/// constructor
fn check_element_count(
    elem_format_code: Option<EncodingCodes>,
    count: usize,
    body_len: usize,
) -> Result<(), Error> {
    let too_many = match elem_format_code {
        Some(EncodingCodes::DescribedType) => return Err(Error::IsDescribedType),
        Some(
            EncodingCodes::Null
            | EncodingCodes::BooleanTrue
            | EncodingCodes::BooleanFalse
            | EncodingCodes::UInt0
            | EncodingCodes::ULong0
            | EncodingCodes::List0,
        ) => count > MAX_ZERO_WIDTH_ELEMENTS,
        _ => count > body_len,
    };
    match too_many {
        true => Err(Error::InvalidLength),
        false => Ok(()),
    }
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = Error;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        match EncodingCodes::try_from(self.peek_format_code()?)? {
            EncodingCodes::Boolean | EncodingCodes::BooleanTrue | EncodingCodes::BooleanFalse => {
                self.deserialize_bool(visitor)
            }
            EncodingCodes::Byte => self.deserialize_i8(visitor),
            EncodingCodes::Short => self.deserialize_i16(visitor),
            EncodingCodes::Int | EncodingCodes::SmallInt => self.deserialize_i32(visitor),
            EncodingCodes::Long | EncodingCodes::SmallLong => self.deserialize_i64(visitor),
            EncodingCodes::UByte => self.deserialize_u8(visitor),
            EncodingCodes::UShort => self.deserialize_u16(visitor),
            EncodingCodes::UInt | EncodingCodes::SmallUInt | EncodingCodes::UInt0 => {
                self.deserialize_u32(visitor)
            }
            EncodingCodes::ULong | EncodingCodes::SmallULong | EncodingCodes::ULong0 => {
                self.deserialize_u64(visitor)
            }
            EncodingCodes::Float => self.deserialize_f32(visitor),
            EncodingCodes::Double => self.deserialize_f64(visitor),
            EncodingCodes::Char => self.deserialize_char(visitor),
            EncodingCodes::Str8 | EncodingCodes::Str32 => self.deserialize_str(visitor),
            EncodingCodes::VBin8 | EncodingCodes::VBin32 => self.deserialize_bytes(visitor),
            EncodingCodes::Null => self.deserialize_unit(visitor),
            EncodingCodes::Sym8 | EncodingCodes::Sym32 => {
                self.deserialize_newtype_struct(SYMBOL, visitor)
            }
            // Untyped visitors see the descriptor as a plain value
            EncodingCodes::DescribedType => {
                self.read_format_code()?;
                visitor.visit_seq(DescribedAccess::new(self))
            }
            EncodingCodes::List0
            | EncodingCodes::List8
            | EncodingCodes::List32
            | EncodingCodes::Array8
            | EncodingCodes::Array32 => self.deserialize_seq(visitor),
            EncodingCodes::Map8 | EncodingCodes::Map32 => self.deserialize_map(visitor),
            EncodingCodes::Decimal32 => self.deserialize_newtype_struct(DECIMAL32, visitor),
            EncodingCodes::Decimal64 => self.deserialize_newtype_struct(DECIMAL64, visitor),
            EncodingCodes::Decimal128 => self.deserialize_newtype_struct(DECIMAL128, visitor),
            EncodingCodes::Timestamp => self.deserialize_newtype_struct(TIMESTAMP, visitor),
            EncodingCodes::Uuid => self.deserialize_newtype_struct(UUID, visitor),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(self.parse_bool()?)
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i8(self.parse_i8()?)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i16(self.parse_i16()?)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i32(self.parse_i32()?)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.parse_i64()?)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u8(self.parse_u8()?)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u16(self.parse_u16()?)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u32(self.parse_u32()?)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u64(self.parse_u64()?)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f32(self.parse_f32()?)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f64(self.parse_f64()?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_char(self.parse_char()?)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.parse_str()?)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.parse_bytes()?)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        match self.peek_format_code()? == EncodingCodes::Null as u8 {
            true => {
                self.read_format_code()?;
                visitor.visit_none()
            }
            false => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        match self.read_format_code()? {
            EncodingCodes::Null => visitor.visit_unit(),
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }

    fn deserialize_unit_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        match name {
            SYMBOL => {
                self.new_type = NewType::Symbol;
                self.deserialize_str(visitor)
            }
            TIMESTAMP => {
                self.new_type = NewType::Timestamp;
                self.deserialize_i64(visitor)
            }
            DECIMAL32 => {
                self.new_type = NewType::Dec32;
                self.deserialize_bytes(visitor)
            }
            DECIMAL64 => {
                self.new_type = NewType::Dec64;
                self.deserialize_bytes(visitor)
            }
            DECIMAL128 => {
                self.new_type = NewType::Dec128;
                self.deserialize_bytes(visitor)
            }
            UUID => {
                self.new_type = NewType::Uuid;
                self.deserialize_bytes(visitor)
            }
            ARRAY => {
                self.new_type = NewType::Array;
                visitor.visit_newtype_struct(self)
            }
            _ => visitor.visit_newtype_struct(self),
        }
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        let expect_array = matches!(std::mem::take(&mut self.new_type), NewType::Array);
        let code = self.read_format_code()?;
        let (count, body_len, elem_format_code) = match code {
            EncodingCodes::List0 if !expect_array => (0, 0, None),
            EncodingCodes::List8 | EncodingCodes::List32 if !expect_array => {
                let (count, body_len) =
                    self.read_compound_header(code == EncodingCodes::List32)?;
                (count, body_len, None)
            }
            EncodingCodes::Array8 | EncodingCodes::Array32 => {
                let (count, body_len) =
                    self.read_compound_header(code == EncodingCodes::Array32)?;
                let elem_format_code = EncodingCodes::try_from(self.reader.next_byte()?)?;
                let body_len = body_len.checked_sub(1).ok_or(Error::InvalidLength)?;
                (count, body_len, Some(elem_format_code))
            }
            code => return Err(Error::InvalidFormatCode(code as u8)),
        };
        check_element_count(elem_format_code, count, body_len)?;

        self.visit_compound(elem_format_code, body_len, |de| {
            visitor.visit_seq(ListAccess::new(de, count))
        })
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        let wide = match self.read_format_code()? {
            EncodingCodes::Map8 => false,
            EncodingCodes::Map32 => true,
            code => return Err(Error::InvalidFormatCode(code as u8)),
        };
        let (count, body_len) = self.read_compound_header(wide)?;
        if count % 2 != 0 {
            return Err(Error::InvalidLength);
        }
        check_element_count(None, count, body_len)?;

        self.visit_compound(None, body_len, |de| {
            visitor.visit_map(MapAccess::new(de, count / 2))
        })
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        match name {
            DESCRIBED_BASIC => visitor.visit_seq(DescribedAccess::new(self)),
            _ => self.deserialize_seq(visitor),
        }
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        let outer = self.enum_type;
        self.enum_type = match name {
            VALUE => EnumType::Value,
            DESCRIPTOR => match self.read_format_code()? {
                EncodingCodes::DescribedType => EnumType::Descriptor,
                code => return Err(Error::InvalidFormatCode(code as u8)),
            },
            _ => return Err(Error::OperationNotSupported("enum")),
        };
        let result = visitor.visit_enum(VariantAccess::new(self));
        self.enum_type = outer;
        result
    }

    /// Variants of the polymorphic types are identified by the next format
    /// code, which is left for the variant itself to read
    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        match std::mem::take(&mut self.enum_type) {
            EnumType::Value | EnumType::Descriptor => visitor.visit_u8(self.peek_format_code()?),
            EnumType::None => self.deserialize_any(visitor),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_any(visitor)
    }
}

/// Accessor for the elements of lists and arrays
#[derive(Debug)]
struct ListAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    count: usize,
}

impl<'a, 'de> ListAccess<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>, count: usize) -> Self {
        Self { de, count }
    }
}

impl<'a, 'de> de::SeqAccess<'de> for ListAccess<'a, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Self::Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.count {
            0 => Ok(None),
            _ => {
                self.count -= 1;
                seed.deserialize(&mut *self.de).map(Some)
            }
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.count)
    }
}

/// Accessor for map entries, `count` is the number of pairs
#[derive(Debug)]
struct MapAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    count: usize,
}

impl<'a, 'de> MapAccess<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>, count: usize) -> Self {
        Self { de, count }
    }
}

impl<'a, 'de> de::MapAccess<'de> for MapAccess<'a, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.count {
            0 => Ok(None),
            _ => seed.deserialize(&mut *self.de).map(Some),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: de::DeserializeSeed<'de>,
    {
        self.count = self.count.saturating_sub(1);
        seed.deserialize(&mut *self.de)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.count)
    }
}

/// Accessor for the variants of [`Value`] and
/// [`Descriptor`](crate::descriptor::Descriptor)
#[derive(Debug)]
struct VariantAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
}

impl<'a, 'de> VariantAccess<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>) -> Self {
        Self { de }
    }
}

impl<'a, 'de> de::EnumAccess<'de> for VariantAccess<'a, 'de> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(mut self, seed: V) -> Result<(V::Value, Self::Variant), Self::Error>
    where
        V: de::DeserializeSeed<'de>,
    {
        let val = seed.deserialize(&mut *self.de)?;
        Ok((val, self))
    }
}

impl<'a, 'de> de::VariantAccess<'de> for VariantAccess<'a, 'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, Self::Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self.de)
    }

    fn tuple_variant<V>(self, _len: usize, _visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::OperationNotSupported("enum variant with data"))
    }

    fn struct_variant<V>(
        self,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::OperationNotSupported("enum variant with data"))
    }
}

/// Accessor yielding the descriptor and then the value of a described type
#[derive(Debug)]
struct DescribedAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    remaining: usize,
}

impl<'a, 'de> DescribedAccess<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>) -> Self {
        Self { de, remaining: 2 }
    }
}

impl<'a, 'de> de::SeqAccess<'de> for DescribedAccess<'a, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Self::Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.remaining {
            0 => Ok(None),
            _ => {
                self.remaining -= 1;
                seed.deserialize(&mut *self.de).map(Some)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        described::Described,
        descriptor::Descriptor,
        list::List,
        primitives::{Array, OrderedMap, Symbol, Timestamp},
        ser::to_vec,
    };

    #[test]
    fn test_decode_compact_codes() {
        assert_eq!(from_slice::<Value>(&[EncodingCodes::UInt0 as u8]), Ok(Value::UInt(0)));
        assert_eq!(
            from_slice::<Value>(&[EncodingCodes::SmallULong as u8, 7]),
            Ok(Value::ULong(7))
        );
        assert_eq!(
            from_slice::<Value>(&[EncodingCodes::SmallInt as u8, 0xff]),
            Ok(Value::Int(-1))
        );
    }

    #[test]
    fn test_decode_described_by_name() {
        let mut buf = vec![EncodingCodes::DescribedType as u8, EncodingCodes::Sym8 as u8, 18];
        buf.extend_from_slice(b"amqp:released:list");
        buf.push(EncodingCodes::List0 as u8);

        let value = from_slice::<Value>(&buf).unwrap();
        let described = Described::try_from(value).unwrap();
        assert_eq!(
            described.descriptor,
            Descriptor::Name(Symbol::from("amqp:released:list"))
        );
        assert_eq!(described.value, Value::List(List::new()));
    }

    #[test]
    fn test_decode_nested_compound() {
        let mut map = OrderedMap::new();
        map.insert(Value::from("k"), Value::List(List::from_values([1i64, 2])));
        map.insert(
            Value::Symbol(Symbol::from("arr")),
            Value::Array(Array::from(vec![Value::from("x"), Value::from("y")])),
        );
        let value = Value::Map(map);

        let buf = to_vec(&value).unwrap();
        assert_eq!(from_slice::<Value>(&buf), Ok(value));
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        assert_eq!(
            from_slice::<Value>(&[EncodingCodes::UInt as u8, 0, 0]),
            Err(Error::UnexpectedEof)
        );
        assert_eq!(
            from_slice::<Value>(&[EncodingCodes::List8 as u8, 3, 2, 0x40]),
            Err(Error::UnexpectedEof)
        );
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        assert_eq!(
            from_slice::<Value>(&[EncodingCodes::Null as u8, EncodingCodes::Null as u8]),
            Err(Error::InvalidLength)
        );
    }

    #[test]
    fn test_decoder_reads_consecutive_values() {
        let values: Result<Vec<_>, _> =
            Decoder::new(&[EncodingCodes::BooleanTrue as u8, EncodingCodes::Null as u8]).collect();
        assert_eq!(values, Ok(vec![Value::Bool(true), Value::Null]));
    }

    #[test]
    fn test_array_of_zero_width_elements_is_bounded() {
        let buf = [
            EncodingCodes::Array32 as u8,
            0,
            0,
            0,
            5,
            0x0f,
            0xff,
            0xff,
            0xff,
            EncodingCodes::Null as u8,
        ];
        assert_eq!(from_slice::<Value>(&buf), Err(Error::InvalidLength));

        let nulls = Value::Array(Array::from(vec![Value::Null; 300]));
        let buf = to_vec(&nulls).unwrap();
        assert_eq!(from_slice::<Value>(&buf), Ok(nulls));
    }

    #[test]
    fn test_count_larger_than_body_is_rejected() {
        let array = [EncodingCodes::Array8 as u8, 3, 200, EncodingCodes::UByte as u8, 1];
        assert_eq!(from_slice::<Value>(&array), Err(Error::InvalidLength));

        let list = [EncodingCodes::List8 as u8, 2, 200, EncodingCodes::Null as u8];
        assert_eq!(from_slice::<Value>(&list), Err(Error::InvalidLength));

        let map = [EncodingCodes::Map8 as u8, 3, 100, 0x40, 0x40];
        assert_eq!(from_slice::<Value>(&map), Err(Error::InvalidLength));
    }

    #[test]
    fn test_size_must_match_body() {
        // size claims one byte more than the single element uses
        let buf = [
            EncodingCodes::List8 as u8,
            3,
            1,
            EncodingCodes::Null as u8,
            EncodingCodes::Null as u8,
        ];
        assert_eq!(from_slice::<Value>(&buf), Err(Error::InvalidLength));
    }

    #[test]
    fn test_array_elements_share_constructor() {
        let lists = Value::Array(Array::from(vec![
            Value::List(List::from_values([1u32])),
            Value::List(List::new()),
        ]));
        let buf = to_vec(&lists).unwrap();
        assert_eq!(buf[3], EncodingCodes::List32 as u8);
        assert_eq!(from_slice::<Value>(&buf), Ok(lists));
    }

    #[test]
    fn test_deserialize_native_types() {
        let buf = to_vec(&vec![1u32, 300]).unwrap();
        assert_eq!(from_slice::<Vec<u32>>(&buf), Ok(vec![1, 300]));

        let buf = to_vec(&Array::from(vec![-1i64, 2])).unwrap();
        assert_eq!(from_slice::<Array<i64>>(&buf), Ok(Array::from(vec![-1, 2])));

        let buf = to_vec(&Symbol::from("amqp:accepted:list")).unwrap();
        assert_eq!(
            from_slice::<Symbol>(&buf),
            Ok(Symbol::from("amqp:accepted:list"))
        );

        let buf = to_vec(&Timestamp::from_milliseconds(-5)).unwrap();
        assert_eq!(
            from_slice::<Timestamp>(&buf),
            Ok(Timestamp::from_milliseconds(-5))
        );

        assert_eq!(from_slice::<Option<bool>>(&[EncodingCodes::Null as u8]), Ok(None));
        assert_eq!(
            from_slice::<Option<bool>>(&[EncodingCodes::BooleanTrue as u8]),
            Ok(Some(true))
        );
    }

    #[test]
    fn test_typed_array_rejects_list() {
        let buf = to_vec(&vec![1u32]).unwrap();
        assert!(from_slice::<Array<u32>>(&buf).is_err());
    }

    #[test]
    fn test_described_round_trip() {
        let described = Described::new(Descriptor::name("x-opt:test"), vec![1i32, 2]);
        let buf = to_vec(&described).unwrap();
        assert_eq!(from_slice::<Described<Vec<i32>>>(&buf), Ok(described));
    }

    #[test]
    fn test_ignored_described_value_is_skipped() {
        let buf = [0x00, 0x53, 0x24, 0x45];
        assert_eq!(from_slice::<serde::de::IgnoredAny>(&buf), Ok(serde::de::IgnoredAny));
    }
}
