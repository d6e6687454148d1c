use std::fmt;
use byteorder::{BigEndian, ByteOrder};
use log::trace;
use crate::amf::{decode_amf0, Amf0Value, AmfType};
use crate::format::{SCRIPT_DATA_END_LENGTH, SCRIPT_DATA_END_MARKER};
use crate::payload::Metadata;
use crate::{ByteBuffer, Error, Result};

/// One type + length + raw value run of a script data body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmfObject {
    pub amf_type: AmfType,
    pub length: u32,
    pub value: Vec<u8>,
}

/// Decoded script data tag body
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptDataPayload {
    /// Empty when the body was kept without scanning
    pub objects: Vec<AmfObject>,
    /// Complete tag body, end marker included
    pub data: Vec<u8>,
}

impl ScriptDataPayload {
    /// Keep the body without the length-prefixed scan; only the end marker is checked
    pub fn deferred(bytes: &[u8]) -> Result<Self> {
        check_end_marker(bytes)?;
        Ok(ScriptDataPayload {
            objects: Vec::new(),
            data: bytes.to_vec(),
        })
    }

    /// Decode the body as a sequence of structured AMF0 values
    pub fn values(&self) -> Result<Vec<Amf0Value>> {
        decode_amf0(&self.data)
    }

    /// Extract `onMetaData` properties
    pub fn metadata(&self) -> Result<Metadata> {
        Metadata::from_values(&self.values()?)
    }
}

fn check_end_marker(bytes: &[u8]) -> Result<usize> {
    if bytes.is_empty() {
        return Err(Error::format("empty script data tag body"));
    }
    if bytes.len() < SCRIPT_DATA_END_LENGTH {
        return Err(Error::format(format!(
            "script data of {} bytes cannot hold the end marker",
            bytes.len()
        )));
    }

    let end = bytes.len() - SCRIPT_DATA_END_LENGTH;
    let marker = BigEndian::read_u24(&bytes[end..]);
    if marker != SCRIPT_DATA_END_MARKER {
        return Err(Error::format(format!(
            "invalid end value {}, should be {}",
            marker, SCRIPT_DATA_END_MARKER
        )));
    }
    Ok(end)
}

/// Scan a script data body as type + length + value runs up to the end marker.
///
/// ECMA arrays carry a 4-byte length, every other type a 2-byte length.
pub fn decode_script_data(bytes: &[u8]) -> Result<ScriptDataPayload> {
    let end = check_end_marker(bytes)?;

    let mut buffer = ByteBuffer::new(&bytes[..end]);
    let mut objects = Vec::new();
    while buffer.has_remaining(1) {
        let offset = buffer.position();
        let marker = buffer.read_u8()?;
        let amf_type = AmfType::from_byte(marker).ok_or_else(|| {
            Error::format(format!("unknown AMF type {} at offset {}", marker, offset))
        })?;

        let length = if amf_type.has_long_length() {
            buffer.read_u32_be()?
        } else {
            buffer.read_u16_be()? as u32
        };
        let value = buffer.read_bytes(length as usize)?;
        trace!("script object {} at offset {}: {} bytes", amf_type.name(), offset, length);

        objects.push(AmfObject {
            amf_type,
            length,
            value: value.to_vec(),
        });
    }

    Ok(ScriptDataPayload {
        objects,
        data: bytes.to_vec(),
    })
}

impl fmt::Display for ScriptDataPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "script data info:")?;
        for object in &self.objects {
            writeln!(f, "\tType - {}", object.amf_type.name())?;
            writeln!(f, "\tSize - {}", object.length)?;
        }
        writeln!(f, "\tObjects - {}", self.objects.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_counts_runs() {
        let body = [
            0x02, 0x00, 0x03, b'a', b'b', b'c', // String "abc"
            0x08, 0x00, 0x00, 0x00, 0x02, 0x11, 0x22, // ECMA array, 4-byte length
            0x00, 0x00, 0x09,
        ];
        let payload = decode_script_data(&body).unwrap();
        assert_eq!(payload.objects.len(), 2);
        assert_eq!(payload.objects[0].amf_type, AmfType::String);
        assert_eq!(payload.objects[0].value, b"abc".to_vec());
        assert_eq!(payload.objects[1].amf_type, AmfType::EcmaArray);
        assert_eq!(payload.objects[1].length, 2);
        assert_eq!(payload.data, body.to_vec());
    }

    #[test]
    fn test_only_end_marker() {
        let payload = decode_script_data(&[0x00, 0x00, 0x09]).unwrap();
        assert!(payload.objects.is_empty());
    }

    #[test]
    fn test_missing_end_marker() {
        let err = decode_script_data(&[0x02, 0x00, 0x00, 0x00, 0x00, 0x08]).unwrap_err();
        assert!(matches!(err, Error::Format(_)));

        let err = decode_script_data(&[0x09]).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_empty_body() {
        assert!(matches!(decode_script_data(&[]), Err(Error::Format(_))));
    }

    #[test]
    fn test_length_overrun_is_truncation() {
        // declares 16 bytes, only 1 before the end marker
        let err = decode_script_data(&[0x02, 0x00, 0x10, 0x41, 0x00, 0x00, 0x09]).unwrap_err();
        assert!(err.is_truncation());

        // length field itself cut short
        let err = decode_script_data(&[0x08, 0x00, 0x00, 0x00, 0x09]).unwrap_err();
        assert!(err.is_truncation());
    }

    #[test]
    fn test_unknown_type() {
        let err = decode_script_data(&[0x0D, 0x00, 0x00, 0x00, 0x00, 0x09]).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_deferred_keeps_raw_body() {
        let body = [0x02, 0x00, 0x02, b'o', b'k', 0x00, 0x00, 0x09];
        let payload = ScriptDataPayload::deferred(&body).unwrap();
        assert!(payload.objects.is_empty());
        assert_eq!(payload.data, body.to_vec());

        assert!(matches!(ScriptDataPayload::deferred(&[0x00, 0x00, 0x08]), Err(Error::Format(_))));
    }

    #[test]
    fn test_values_reject_reference_blowup() {
        // empty object, then layers of [ref prev, ref prev] that double in size
        let mut body = vec![0x03, 0x00, 0x00, 0x09];
        for k in 1..=40u16 {
            let [hi, lo] = (k - 1).to_be_bytes();
            body.extend_from_slice(&[0x0A, 0x00, 0x00, 0x00, 0x02, 0x07, hi, lo, 0x07, hi, lo]);
        }
        body.extend_from_slice(&[0x03, 0x00, 0x00, 0x09]);

        let payload = ScriptDataPayload::deferred(&body).unwrap();
        assert!(matches!(payload.values(), Err(Error::AmfDecode(_))));
        assert!(payload.metadata().is_err());
    }

    #[test]
    fn test_display() {
        let payload = decode_script_data(&[0x05, 0x00, 0x00, 0x00, 0x00, 0x09]).unwrap();
        assert_eq!(
            payload.to_string(),
            "script data info:\n\tType - Null\n\tSize - 0\n\tObjects - 1\n"
        );
    }
}
