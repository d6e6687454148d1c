use std::fmt;
use crate::{ByteBuffer, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    /// Keyframe (for AVC, a seekable frame)
    Keyframe,
    /// Inter frame (for AVC, a non-seekable frame)
    InterFrame,
    /// Disposable inter frame (H.263 only)
    DisposableInterFrame,
    /// Generated keyframe (reserved for server use only)
    GeneratedKeyframe,
    /// Video info/command frame
    CommandFrame,
    /// Code 0 or 6..=15
    Reserved(u8),
}

impl FrameType {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x0F {
            1 => FrameType::Keyframe,
            2 => FrameType::InterFrame,
            3 => FrameType::DisposableInterFrame,
            4 => FrameType::GeneratedKeyframe,
            5 => FrameType::CommandFrame,
            code => FrameType::Reserved(code),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FrameType::Keyframe => "keyframe (for AVC, a seekable frame)",
            FrameType::InterFrame => "inter frame (for AVC, a non-seekable frame)",
            FrameType::DisposableInterFrame => "disposable inter frame (H.263 only)",
            FrameType::GeneratedKeyframe => "generated keyframe (reserved for server use only)",
            FrameType::CommandFrame => "video info/command frame",
            FrameType::Reserved(_) => "not defined by standard",
        }
    }

    pub fn is_keyframe(&self) -> bool {
        matches!(self, FrameType::Keyframe | FrameType::GeneratedKeyframe)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCodec {
    /// JPEG (currently unused)
    Jpeg,
    /// Sorenson H.263
    SorensonH263,
    /// Screen video
    ScreenVideo,
    /// On2 VP6
    Vp6,
    /// On2 VP6 with alpha channel
    Vp6Alpha,
    /// Screen video version 2
    ScreenVideo2,
    /// AVC
    Avc,
    /// Code 0 or 8..=15
    Reserved(u8),
}

impl VideoCodec {
    /// Parse from the 4-bit codec ID
    pub fn from_codec_id(id: u8) -> Self {
        match id & 0x0F {
            1 => VideoCodec::Jpeg,
            2 => VideoCodec::SorensonH263,
            3 => VideoCodec::ScreenVideo,
            4 => VideoCodec::Vp6,
            5 => VideoCodec::Vp6Alpha,
            6 => VideoCodec::ScreenVideo2,
            7 => VideoCodec::Avc,
            code => VideoCodec::Reserved(code),
        }
    }

    /// Get codec name
    pub fn name(&self) -> &'static str {
        match self {
            VideoCodec::Jpeg => "JPEG (currently unused)",
            VideoCodec::SorensonH263 => "Sorenson H.263",
            VideoCodec::ScreenVideo => "Screen video",
            VideoCodec::Vp6 => "On2 VP6",
            VideoCodec::Vp6Alpha => "On2 VP6 with alpha channel",
            VideoCodec::ScreenVideo2 => "Screen video version 2",
            VideoCodec::Avc => "AVC",
            VideoCodec::Reserved(_) => "not defined by standard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvcPacketType {
    SequenceHeader,
    Nalu,
    EndOfSequence,
}

impl AvcPacketType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(AvcPacketType::SequenceHeader),
            1 => Some(AvcPacketType::Nalu),
            2 => Some(AvcPacketType::EndOfSequence),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AvcPacketType::SequenceHeader => "AVC sequence header",
            AvcPacketType::Nalu => "AVC NALU",
            AvcPacketType::EndOfSequence => "AVC end of sequence",
        }
    }
}

/// AVC packet prefix: packet type + signed 24-bit composition time offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvcPacket {
    pub packet_type: AvcPacketType,
    pub composition_time: i32,
}

/// Decoded video tag body
#[derive(Debug, Clone, PartialEq)]
pub struct VideoPayload {
    pub frame_type: FrameType,
    pub codec: VideoCodec,
    /// Present only for AVC
    pub avc: Option<AvcPacket>,
    /// Codec payload following the descriptor byte (and AVC prefix), unparsed
    pub data: Vec<u8>,
}

impl VideoPayload {
    pub fn is_keyframe(&self) -> bool {
        self.frame_type.is_keyframe()
    }

    pub fn is_avc_sequence_header(&self) -> bool {
        matches!(
            self.avc,
            Some(AvcPacket { packet_type: AvcPacketType::SequenceHeader, .. })
        )
    }
}

/// Decode a video tag body.
///
/// Descriptor byte layout, MSB first: frame type(4) codec id(4).
///
/// Fails on an empty body. AVC bodies must also carry the packet type byte and
/// the 24-bit composition time: fewer than 5 bytes is a truncation error and a
/// packet type above 2 is a format error.
pub fn decode_video(bytes: &[u8]) -> Result<VideoPayload> {
    if bytes.is_empty() {
        return Err(Error::format("empty video tag body"));
    }

    let mut buffer = ByteBuffer::new(bytes);
    let descriptor = buffer.read_u8()?;
    let frame_type = FrameType::from_bits(descriptor >> 4);
    let codec = VideoCodec::from_codec_id(descriptor);

    let avc = if codec == VideoCodec::Avc {
        let type_byte = buffer.read_u8()?;
        let packet_type = AvcPacketType::from_byte(type_byte)
            .ok_or_else(|| Error::format(format!("unknown AVC packet type {}", type_byte)))?;
        let composition_time = buffer.read_i24_be()?;
        Some(AvcPacket {
            packet_type,
            composition_time,
        })
    } else {
        None
    };

    Ok(VideoPayload {
        frame_type,
        codec,
        avc,
        data: buffer.remaining_slice().to_vec(),
    })
}

impl fmt::Display for VideoPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "video tag info:")?;
        writeln!(f, "\tFrame Type - {}", self.frame_type.name())?;
        writeln!(f, "\tCodec - {}", self.codec.name())?;
        if let Some(avc) = &self.avc {
            writeln!(f, "\tAVC Packet Type - {}", avc.packet_type.name())?;
            writeln!(f, "\tComposition Time - {}", avc.composition_time)?;
        }
        Ok(())
    }
}
