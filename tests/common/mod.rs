// Common test utilities for building FLV byte streams
#![allow(dead_code)]

pub const TAG_HEADER_LENGTH: u32 = 11;

/// File header with the given flags followed by the leading zero size echo
pub fn file_header(flags: u8) -> Vec<u8> {
    vec![0x46, 0x4c, 0x56, 0x01, flags, 0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x00]
}

/// Raw tag bytes with an explicit size echo
pub fn tag_with_echo(
    tag_type: u8,
    timestamp: u32,
    timestamp_ext: u8,
    stream_id: u32,
    body: &[u8],
    echo: u32,
) -> Vec<u8> {
    let mut out = vec![tag_type];
    out.extend_from_slice(&(body.len() as u32).to_be_bytes()[1..]);
    out.extend_from_slice(&timestamp.to_be_bytes()[1..]);
    out.push(timestamp_ext);
    out.extend_from_slice(&stream_id.to_be_bytes()[1..]);
    out.extend_from_slice(body);
    out.extend_from_slice(&echo.to_be_bytes());
    out
}

/// Correctly framed tag
pub fn tag(tag_type: u8, timestamp: u32, body: &[u8]) -> Vec<u8> {
    tag_with_echo(tag_type, timestamp, 0, 0, body, body.len() as u32 + TAG_HEADER_LENGTH)
}

/// AVC keyframe carrying a sequence header prefix
pub fn avc_sequence_header() -> Vec<u8> {
    vec![0x17, 0x00, 0x00, 0x00, 0x00, 0x01, 0x64, 0x00, 0x1F]
}

/// AAC raw frame
pub fn aac_frame() -> Vec<u8> {
    vec![0xAF, 0x01, 0x21, 0x10]
}

/// Script data body in the length-prefixed layout: a name string and one ECMA array run
pub fn scanned_script_body() -> Vec<u8> {
    let mut body = vec![0x02, 0x00, 0x0A];
    body.extend_from_slice(b"onMetaData");
    body.extend_from_slice(&[0x08, 0x00, 0x00, 0x00, 0x03, 0xAA, 0xBB, 0xCC]);
    body.extend_from_slice(&[0x00, 0x00, 0x09]);
    body
}

fn amf_name(out: &mut Vec<u8>, name: &str) {
    out.extend_from_slice(&(name.len() as u16).to_be_bytes());
    out.extend_from_slice(name.as_bytes());
}

/// `onMetaData` as real encoders write it: string + ECMA array of properties
pub fn on_metadata_body(duration: f64, width: f64, height: f64) -> Vec<u8> {
    let mut body = vec![0x02];
    amf_name(&mut body, "onMetaData");
    body.push(0x08);
    body.extend_from_slice(&3u32.to_be_bytes());
    for (key, value) in [("duration", duration), ("width", width), ("height", height)] {
        amf_name(&mut body, key);
        body.push(0x00);
        body.extend_from_slice(&value.to_be_bytes());
    }
    body.extend_from_slice(&[0x00, 0x00, 0x09]);
    body
}
