use crate::amf::amf0::{markers, Amf0Properties, Amf0Value};
use crate::{ByteBuffer, Error, Result};

const MAX_NESTING_DEPTH: usize = 64;

/// A finished complex value and the bytes it stands for once expanded
struct Referenced {
    value: Amf0Value,
    expanded_size: usize,
}

/// Structured AMF0 decoder over a borrowed buffer.
///
/// Complex values (objects, arrays, typed objects) are recorded in a reference
/// table in the order they start, so `Reference` markers resolve to a copy of
/// the earlier value. Copies are charged against a budget equal to the input
/// length, which keeps the decoded tree linear in the input size.
pub struct Amf0Decoder<'a> {
    buffer: ByteBuffer<'a>,
    references: Vec<Option<Referenced>>,
    depth: usize,
    expanded: usize,
    expansion_limit: usize,
}

impl<'a> Amf0Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Amf0Decoder {
            buffer: ByteBuffer::new(data),
            references: Vec::new(),
            depth: 0,
            expanded: 0,
            expansion_limit: data.len(),
        }
    }

    /// Check if decoder has remaining data to decode
    pub fn has_remaining(&self) -> bool {
        self.buffer.remaining() > 0
    }

    pub fn position(&self) -> usize {
        self.buffer.position()
    }

    /// Decode values until the input is exhausted
    pub fn decode_all(&mut self) -> Result<Vec<Amf0Value>> {
        let mut values = Vec::new();
        while self.has_remaining() {
            values.push(self.decode()?);
        }
        Ok(values)
    }

    pub fn decode(&mut self) -> Result<Amf0Value> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::amf_decode("nesting too deep"));
        }
        self.depth += 1;
        let result = self.decode_marker();
        self.depth -= 1;
        result
    }

    fn decode_marker(&mut self) -> Result<Amf0Value> {
        let marker = self.buffer.read_u8()?;
        match marker {
            markers::NUMBER => Ok(Amf0Value::Number(self.buffer.read_f64_be()?)),
            markers::BOOLEAN => Ok(Amf0Value::Boolean(self.buffer.read_u8()? != 0)),
            markers::STRING => Ok(Amf0Value::String(self.read_short_string()?)),
            markers::OBJECT => self.decode_complex(|d| Ok(Amf0Value::Object(d.read_properties()?))),
            markers::NULL => Ok(Amf0Value::Null),
            markers::UNDEFINED => Ok(Amf0Value::Undefined),
            markers::REFERENCE => self.decode_reference(),
            markers::ECMA_ARRAY => self.decode_complex(|d| {
                // the count is only a hint, properties run until the end marker
                let _count = d.buffer.read_u32_be()?;
                Ok(Amf0Value::EcmaArray(d.read_properties()?))
            }),
            markers::STRICT_ARRAY => self.decode_complex(|d| {
                let count = d.buffer.read_u32_be()? as usize;
                // each element takes at least one byte
                let mut array = Vec::with_capacity(count.min(d.buffer.remaining()));
                for _ in 0..count {
                    array.push(d.decode()?);
                }
                Ok(Amf0Value::StrictArray(array))
            }),
            markers::DATE => {
                let millis = self.buffer.read_f64_be()?;
                let timezone = self.buffer.read_i16_be()?;
                Ok(Amf0Value::Date { millis, timezone })
            }
            markers::LONG_STRING => Ok(Amf0Value::LongString(self.read_long_string()?)),
            markers::UNSUPPORTED => Ok(Amf0Value::Unsupported),
            markers::XML_DOCUMENT => Ok(Amf0Value::XmlDocument(self.read_long_string()?)),
            markers::TYPED_OBJECT => self.decode_complex(|d| {
                let class_name = d.read_short_string()?;
                let properties = d.read_properties()?;
                Ok(Amf0Value::TypedObject { class_name, properties })
            }),
            markers::OBJECT_END => Err(Error::amf_decode(format!(
                "unexpected object end marker at offset {}",
                self.buffer.position() - 1
            ))),
            markers::MOVIE_CLIP | markers::RECORDSET => Err(Error::amf_decode(format!(
                "reserved AMF0 marker 0x{:02x}",
                marker
            ))),
            _ => Err(Error::amf_decode(format!("Unknown AMF0 marker: 0x{:02x}", marker))),
        }
    }

    fn decode_complex<F>(&mut self, decode_body: F) -> Result<Amf0Value>
    where
        F: FnOnce(&mut Self) -> Result<Amf0Value>,
    {
        let slot = self.references.len();
        self.references.push(None);
        // the marker byte was already consumed
        let start = self.buffer.position() - 1;
        let expanded_before = self.expanded;

        let value = decode_body(self)?;

        let expanded_size =
            (self.buffer.position() - start) + (self.expanded - expanded_before);
        self.references[slot] = Some(Referenced {
            value: value.clone(),
            expanded_size,
        });
        Ok(value)
    }

    fn decode_reference(&mut self) -> Result<Amf0Value> {
        let index = self.buffer.read_u16_be()? as usize;
        let referenced = match self.references.get(index) {
            Some(Some(referenced)) => referenced,
            Some(None) => {
                return Err(Error::amf_decode(format!(
                    "reference {} points into a value still being decoded",
                    index
                )))
            }
            None => return Err(Error::amf_decode(format!("reference {} out of range", index))),
        };

        let expanded = self.expanded + referenced.expanded_size;
        if expanded > self.expansion_limit {
            return Err(Error::amf_decode(format!(
                "references expand to more than {} bytes",
                self.expansion_limit
            )));
        }
        let value = referenced.value.clone();
        self.expanded = expanded;
        Ok(value)
    }

    fn read_properties(&mut self) -> Result<Amf0Properties> {
        let mut properties = Vec::new();
        loop {
            let name = self.read_short_string()?;
            if name.is_empty() {
                let end = self.buffer.read_u8()?;
                if end != markers::OBJECT_END {
                    return Err(Error::amf_decode(format!(
                        "expected object end marker, found 0x{:02x}",
                        end
                    )));
                }
                break;
            }
            let value = self.decode()?;
            properties.push((name, value));
        }
        Ok(properties)
    }

    fn read_short_string(&mut self) -> Result<String> {
        let len = self.buffer.read_u16_be()? as usize;
        self.read_utf8(len)
    }

    fn read_long_string(&mut self) -> Result<String> {
        let len = self.buffer.read_u32_be()? as usize;
        self.read_utf8(len)
    }

    fn read_utf8(&mut self, len: usize) -> Result<String> {
        let bytes = self.buffer.read_bytes(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::amf_decode(format!("Invalid UTF-8 in string: {}", e)))
    }
}

/// Decode every AMF0 value in `data`
pub fn decode_amf0(data: &[u8]) -> Result<Vec<Amf0Value>> {
    Amf0Decoder::new(data).decode_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_string(s: &str) -> Vec<u8> {
        let mut out = (s.len() as u16).to_be_bytes().to_vec();
        out.extend_from_slice(s.as_bytes());
        out
    }

    #[test]
    fn test_decode_scalars() {
        let mut data = vec![markers::NUMBER];
        data.extend_from_slice(&2.5f64.to_be_bytes());
        data.extend_from_slice(&[markers::BOOLEAN, 0x01, markers::NULL, markers::UNDEFINED]);
        data.push(markers::STRING);
        data.extend(short_string("hi"));

        let values = decode_amf0(&data).unwrap();
        assert_eq!(
            values,
            vec![
                Amf0Value::Number(2.5),
                Amf0Value::Boolean(true),
                Amf0Value::Null,
                Amf0Value::Undefined,
                Amf0Value::String("hi".to_string()),
            ]
        );
    }

    #[test]
    fn test_decode_on_metadata() {
        let mut data = vec![markers::STRING];
        data.extend(short_string("onMetaData"));
        data.push(markers::ECMA_ARRAY);
        data.extend_from_slice(&2u32.to_be_bytes());
        data.extend(short_string("width"));
        data.push(markers::NUMBER);
        data.extend_from_slice(&640f64.to_be_bytes());
        data.extend(short_string("stereo"));
        data.extend_from_slice(&[markers::BOOLEAN, 0x00]);
        data.extend_from_slice(&[0x00, 0x00, markers::OBJECT_END]);

        let values = decode_amf0(&data).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].as_string(), Some("onMetaData"));
        assert_eq!(values[1].get_property("width").and_then(|v| v.as_number()), Some(640.0));
        assert_eq!(values[1].get_property("stereo").and_then(|v| v.as_boolean()), Some(false));
    }

    #[test]
    fn test_reference_resolves_earlier_object() {
        let mut data = vec![markers::OBJECT];
        data.extend(short_string("a"));
        data.extend_from_slice(&[markers::NULL, 0x00, 0x00, markers::OBJECT_END]);
        data.extend_from_slice(&[markers::REFERENCE, 0x00, 0x00]);

        let values = decode_amf0(&data).unwrap();
        assert_eq!(values[0], values[1]);

        let err = decode_amf0(&[markers::REFERENCE, 0x00, 0x03]).unwrap_err();
        assert!(matches!(err, Error::AmfDecode(_)));
    }

    #[test]
    fn test_reference_to_unfinished_value() {
        // object whose only property refers back to the object itself
        let mut data = vec![markers::OBJECT];
        data.extend(short_string("self"));
        data.extend_from_slice(&[markers::REFERENCE, 0x00, 0x00, 0x00, 0x00, markers::OBJECT_END]);

        let err = decode_amf0(&data).unwrap_err();
        assert!(matches!(err, Error::AmfDecode(_)));
    }

    /// Each layer is a two-element strict array of references to the previous layer
    fn doubling_layers(layers: u16) -> Vec<u8> {
        let mut data = vec![markers::OBJECT, 0x00, 0x00, markers::OBJECT_END];
        for k in 1..=layers {
            let previous = (k - 1).to_be_bytes();
            data.extend_from_slice(&[markers::STRICT_ARRAY, 0x00, 0x00, 0x00, 0x02]);
            data.extend_from_slice(&[markers::REFERENCE, previous[0], previous[1]]);
            data.extend_from_slice(&[markers::REFERENCE, previous[0], previous[1]]);
        }
        data
    }

    #[test]
    fn test_repeated_references_within_budget() {
        let values = decode_amf0(&doubling_layers(1)).unwrap();
        assert_eq!(values.len(), 2);
        let copies = values[1].as_array().unwrap();
        assert_eq!(copies.len(), 2);
        assert_eq!(copies[0], values[0]);
        assert_eq!(copies[1], values[0]);
    }

    #[test]
    fn test_reference_expansion_is_bounded() {
        // 40 layers would expand to 2^40 leaves without a budget
        let data = doubling_layers(40);
        let err = decode_amf0(&data).unwrap_err();
        assert!(matches!(err, Error::AmfDecode(_)), "got {:?}", err);
    }

    #[test]
    fn test_strict_array_and_date() {
        let mut data = vec![markers::STRICT_ARRAY, 0x00, 0x00, 0x00, 0x02];
        data.extend_from_slice(&[markers::BOOLEAN, 0x00, markers::NULL]);
        data.push(markers::DATE);
        data.extend_from_slice(&0f64.to_be_bytes());
        data.extend_from_slice(&[0x00, 0x00]);

        let values = decode_amf0(&data).unwrap();
        assert_eq!(values[0].as_array().map(|a| a.len()), Some(2));
        assert_eq!(values[1], Amf0Value::Date { millis: 0.0, timezone: 0 });
    }

    #[test]
    fn test_truncated_string() {
        let err = decode_amf0(&[markers::STRING, 0x00, 0x05, b'a']).unwrap_err();
        assert!(err.is_truncation());
    }

    #[test]
    fn test_rejects_stray_end_marker_and_unknown() {
        assert!(matches!(decode_amf0(&[markers::OBJECT_END]), Err(Error::AmfDecode(_))));
        assert!(matches!(decode_amf0(&[markers::MOVIE_CLIP]), Err(Error::AmfDecode(_))));
        assert!(matches!(decode_amf0(&[0x11]), Err(Error::AmfDecode(_))));
    }

    #[test]
    fn test_nesting_limit() {
        let data = vec![markers::STRICT_ARRAY, 0x00, 0x00, 0x00, 0x01].repeat(MAX_NESTING_DEPTH + 1);
        let err = decode_amf0(&data).unwrap_err();
        assert!(matches!(err, Error::AmfDecode(_)));
    }
}
