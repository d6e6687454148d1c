use chrono::{DateTime, Utc};

/// Ordered key/value pairs of an AMF0 object or ECMA array
pub type Amf0Properties = Vec<(String, Amf0Value)>;

/// AMF0 data types
#[derive(Debug, Clone, PartialEq)]
pub enum Amf0Value {
    Number(f64),                                         // 0x00
    Boolean(bool),                                       // 0x01
    String(String),                                      // 0x02
    Object(Amf0Properties),                              // 0x03
    Null,                                                // 0x05
    Undefined,                                           // 0x06
    EcmaArray(Amf0Properties),                           // 0x08
    StrictArray(Vec<Amf0Value>),                         // 0x0A
    Date { millis: f64, timezone: i16 },                 // 0x0B
    LongString(String),                                  // 0x0C
    Unsupported,                                         // 0x0D
    XmlDocument(String),                                 // 0x0F
    TypedObject { class_name: String, properties: Amf0Properties }, // 0x10
}

// AMF0 type markers
pub mod markers {
    pub const NUMBER: u8 = 0x00;
    pub const BOOLEAN: u8 = 0x01;
    pub const STRING: u8 = 0x02;
    pub const OBJECT: u8 = 0x03;
    pub const MOVIE_CLIP: u8 = 0x04;    // reserved, not supported
    pub const NULL: u8 = 0x05;
    pub const UNDEFINED: u8 = 0x06;
    pub const REFERENCE: u8 = 0x07;
    pub const ECMA_ARRAY: u8 = 0x08;
    pub const OBJECT_END: u8 = 0x09;
    pub const STRICT_ARRAY: u8 = 0x0A;
    pub const DATE: u8 = 0x0B;
    pub const LONG_STRING: u8 = 0x0C;
    pub const UNSUPPORTED: u8 = 0x0D;
    pub const RECORDSET: u8 = 0x0E;     // reserved, not supported
    pub const XML_DOCUMENT: u8 = 0x0F;
    pub const TYPED_OBJECT: u8 = 0x10;
}

/// The 13 AMF type discriminators that may lead a script data object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmfType {
    Number,
    Boolean,
    String,
    Object,
    MovieClip,
    Null,
    Undefined,
    Reference,
    EcmaArray,
    ObjectEnd,
    StrictArray,
    Date,
    LongString,
}

impl AmfType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            markers::NUMBER => Some(AmfType::Number),
            markers::BOOLEAN => Some(AmfType::Boolean),
            markers::STRING => Some(AmfType::String),
            markers::OBJECT => Some(AmfType::Object),
            markers::MOVIE_CLIP => Some(AmfType::MovieClip),
            markers::NULL => Some(AmfType::Null),
            markers::UNDEFINED => Some(AmfType::Undefined),
            markers::REFERENCE => Some(AmfType::Reference),
            markers::ECMA_ARRAY => Some(AmfType::EcmaArray),
            markers::OBJECT_END => Some(AmfType::ObjectEnd),
            markers::STRICT_ARRAY => Some(AmfType::StrictArray),
            markers::DATE => Some(AmfType::Date),
            markers::LONG_STRING => Some(AmfType::LongString),
            _ => None,
        }
    }

    pub fn marker(&self) -> u8 {
        match self {
            AmfType::Number => markers::NUMBER,
            AmfType::Boolean => markers::BOOLEAN,
            AmfType::String => markers::STRING,
            AmfType::Object => markers::OBJECT,
            AmfType::MovieClip => markers::MOVIE_CLIP,
            AmfType::Null => markers::NULL,
            AmfType::Undefined => markers::UNDEFINED,
            AmfType::Reference => markers::REFERENCE,
            AmfType::EcmaArray => markers::ECMA_ARRAY,
            AmfType::ObjectEnd => markers::OBJECT_END,
            AmfType::StrictArray => markers::STRICT_ARRAY,
            AmfType::Date => markers::DATE,
            AmfType::LongString => markers::LONG_STRING,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AmfType::Number => "Number",
            AmfType::Boolean => "Boolean",
            AmfType::String => "String",
            AmfType::Object => "Object",
            AmfType::MovieClip => "MovieClip",
            AmfType::Null => "Null",
            AmfType::Undefined => "Undefined",
            AmfType::Reference => "Reference",
            AmfType::EcmaArray => "ECMA Array",
            AmfType::ObjectEnd => "Object end marker",
            AmfType::StrictArray => "Strict array",
            AmfType::Date => "Date",
            AmfType::LongString => "Long string",
        }
    }

    /// Whether the length prefix of a script data object of this type is 4 bytes wide
    pub fn has_long_length(&self) -> bool {
        *self == AmfType::EcmaArray
    }
}

impl Amf0Value {
    /// Extract number value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Amf0Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string reference
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Amf0Value::String(s) | Amf0Value::LongString(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract boolean value
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Amf0Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract object properties
    pub fn as_object(&self) -> Option<&Amf0Properties> {
        match self {
            Amf0Value::Object(obj) | Amf0Value::EcmaArray(obj) => Some(obj),
            Amf0Value::TypedObject { properties, .. } => Some(properties),
            _ => None,
        }
    }

    /// Extract array reference
    pub fn as_array(&self) -> Option<&Vec<Amf0Value>> {
        match self {
            Amf0Value::StrictArray(arr) => Some(arr),
            _ => None,
        }
    }

    /// Convert a Date value; the timezone field is ignored as AMF0 requires it to be 0
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Amf0Value::Date { millis, .. } if millis.is_finite() => {
                DateTime::from_timestamp_millis(*millis as i64)
            }
            _ => None,
        }
    }

    /// Get property from object
    pub fn get_property(&self, key: &str) -> Option<&Amf0Value> {
        self.as_object()
            .and_then(|obj| obj.iter().find(|(name, _)| name == key).map(|(_, value)| value))
    }

    /// Check if null or undefined
    pub fn is_null(&self) -> bool {
        matches!(self, Amf0Value::Null | Amf0Value::Undefined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_table() {
        for marker in 0u8..13 {
            let amf_type = AmfType::from_byte(marker).unwrap();
            assert_eq!(amf_type.marker(), marker);
        }
        assert_eq!(AmfType::from_byte(13), None);
        assert_eq!(AmfType::from_byte(8).unwrap().name(), "ECMA Array");
        assert!(AmfType::EcmaArray.has_long_length());
        assert!(!AmfType::LongString.has_long_length());
    }

    #[test]
    fn test_get_property_preserves_order() {
        let value = Amf0Value::EcmaArray(vec![
            ("duration".to_string(), Amf0Value::Number(12.5)),
            ("stereo".to_string(), Amf0Value::Boolean(true)),
        ]);
        assert_eq!(value.get_property("duration").and_then(|v| v.as_number()), Some(12.5));
        assert_eq!(value.get_property("stereo").and_then(|v| v.as_boolean()), Some(true));
        assert!(value.get_property("width").is_none());
        assert_eq!(value.as_object().unwrap()[0].0, "duration");
    }

    #[test]
    fn test_date_conversion() {
        let date = Amf0Value::Date { millis: 1_000_000_000_000.0, timezone: 0 };
        let datetime = date.as_datetime().unwrap();
        assert_eq!(datetime.timestamp(), 1_000_000_000);
        assert!(Amf0Value::Null.as_datetime().is_none());
    }
}
