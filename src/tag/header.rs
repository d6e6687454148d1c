use crate::format::{TAG_HEADER_LENGTH, TAG_TYPE_AUDIO, TAG_TYPE_SCRIPT_DATA, TAG_TYPE_VIDEO};
use crate::{ByteBuffer, Result};

/// Tag discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagType {
    Audio,
    Video,
    ScriptData,
}

impl TagType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            TAG_TYPE_AUDIO => Some(TagType::Audio),
            TAG_TYPE_VIDEO => Some(TagType::Video),
            TAG_TYPE_SCRIPT_DATA => Some(TagType::ScriptData),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            TagType::Audio => TAG_TYPE_AUDIO,
            TagType::Video => TAG_TYPE_VIDEO,
            TagType::ScriptData => TAG_TYPE_SCRIPT_DATA,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TagType::Audio => "audio",
            TagType::Video => "video",
            TagType::ScriptData => "script data",
        }
    }
}

/// The fixed 11-byte tag header.
///
/// `tag_type` is kept as the raw byte so the framer can decide what to do
/// with discriminators outside the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub tag_type: u8,
    pub data_size: u32,
    pub timestamp: u32,
    pub timestamp_extension: u8,
    pub stream_id: u32,
}

impl TagHeader {
    pub fn parse(bytes: &[u8; TAG_HEADER_LENGTH]) -> Result<Self> {
        let mut buffer = ByteBuffer::new(bytes);
        Ok(TagHeader {
            tag_type: buffer.read_u8()?,
            data_size: buffer.read_u24_be()?,
            timestamp: buffer.read_u24_be()?,
            timestamp_extension: buffer.read_u8()?,
            stream_id: buffer.read_u24_be()?,
        })
    }

    pub fn kind(&self) -> Option<TagType> {
        TagType::from_byte(self.tag_type)
    }

    /// Header plus body length; the value the trailing size echo must carry
    pub fn tag_size(&self) -> u32 {
        self.data_size + TAG_HEADER_LENGTH as u32
    }
}
