use std::fmt;
use crate::{ByteBuffer, Error, Result};
use crate::format::{FILE_HEADER_LENGTH, FLAG_AUDIO, FLAG_VIDEO, FLV_SIGNATURE, FLV_VERSION};

/// The 9-byte FLV file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    version: u8,
    flags: u8,
    data_offset: u32,
}

impl FileHeader {
    /// Validate and parse the file header.
    ///
    /// Only the audio-only, video-only and audio+video flag combinations are
    /// accepted, and the data offset must equal the header length.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != FILE_HEADER_LENGTH {
            return Err(Error::format(format!(
                "header length {} is not {}",
                bytes.len(),
                FILE_HEADER_LENGTH
            )));
        }

        let mut buffer = ByteBuffer::new(bytes);
        let signature = buffer.read_bytes(3)?;
        if signature != &FLV_SIGNATURE[..] {
            return Err(Error::format(format!(
                "signature {} is not FLV",
                String::from_utf8_lossy(signature)
            )));
        }

        let version = buffer.read_u8()?;
        if version != FLV_VERSION {
            return Err(Error::format(format!("version {} is not 1", version)));
        }

        let flags = buffer.read_u8()?;
        if !matches!(flags, 1 | 4 | 5) {
            return Err(Error::format(format!("invalid audio/video flags {:#04x}", flags)));
        }

        let data_offset = buffer.read_u32_be()?;
        if data_offset != FILE_HEADER_LENGTH as u32 {
            return Err(Error::format(format!(
                "data offset {} is not {}",
                data_offset, FILE_HEADER_LENGTH
            )));
        }

        Ok(FileHeader {
            version,
            flags,
            data_offset,
        })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }

    pub fn has_audio(&self) -> bool {
        self.flags & FLAG_AUDIO == FLAG_AUDIO
    }

    pub fn has_video(&self) -> bool {
        self.flags & FLAG_VIDEO == FLAG_VIDEO
    }

    /// Multi-line debug rendering of the header fields
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

/// Parse a file header; see [`FileHeader::parse`]
pub fn parse_header(bytes: &[u8]) -> Result<FileHeader> {
    FileHeader::parse(bytes)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FLV file version {}", self.version)?;
        writeln!(f, "  has audio tags: {}", yes_no(self.has_audio()))?;
        writeln!(f, "  has video tags: {}", yes_no(self.has_video()))?;
        writeln!(f, "  Data offset: {}", self.data_offset)
    }
}
