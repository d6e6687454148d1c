use std::fmt;
use crate::payload::{decode_audio, decode_script_data, decode_video};
use crate::payload::{AudioPayload, ScriptDataPayload, VideoPayload};
use crate::reader::ScriptDataMode;
use crate::Result;

mod framer;
mod header;

pub use framer::*;
pub use header::*;

/// Decoded tag body, one variant per tag type
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Audio(AudioPayload),
    Video(VideoPayload),
    ScriptData(ScriptDataPayload),
}

impl Payload {
    pub fn decode(tag_type: TagType, body: &[u8], script_data: ScriptDataMode) -> Result<Self> {
        Ok(match tag_type {
            TagType::Audio => Payload::Audio(decode_audio(body)?),
            TagType::Video => Payload::Video(decode_video(body)?),
            TagType::ScriptData => match script_data {
                ScriptDataMode::Scan => Payload::ScriptData(decode_script_data(body)?),
                ScriptDataMode::Deferred => Payload::ScriptData(ScriptDataPayload::deferred(body)?),
            },
        })
    }

    pub fn tag_type(&self) -> TagType {
        match self {
            Payload::Audio(_) => TagType::Audio,
            Payload::Video(_) => TagType::Video,
            Payload::ScriptData(_) => TagType::ScriptData,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Audio(audio) => fmt::Display::fmt(audio, f),
            Payload::Video(video) => fmt::Display::fmt(video, f),
            Payload::ScriptData(script) => fmt::Display::fmt(script, f),
        }
    }
}

/// One framed unit of the stream
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub tag_type: TagType,
    pub data_size: u32,
    pub timestamp: u32,
    pub timestamp_extension: u8,
    pub stream_id: u32,
    pub payload: Payload,
}

impl Tag {
    /// Timestamp with the extension byte as its upper 8 bits
    pub fn full_timestamp(&self) -> u32 {
        ((self.timestamp_extension as u32) << 24) | self.timestamp
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} tag: size {}, timestamp {}, stream id {}",
            self.tag_type.name(),
            self.data_size,
            self.full_timestamp(),
            self.stream_id
        )?;
        fmt::Display::fmt(&self.payload, f)
    }
}
