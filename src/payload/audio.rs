use std::fmt;
use crate::{ByteBuffer, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundFormat {
    /// Linear PCM, platform endian
    LinearPcm,
    /// ADPCM
    Adpcm,
    /// MP3
    Mp3,
    /// Linear PCM, little endian
    LinearPcmLittleEndian,
    /// Nellymoser 16kHz mono
    Nellymoser16kHzMono,
    /// Nellymoser 8kHz mono
    Nellymoser8kHzMono,
    /// Nellymoser
    Nellymoser,
    /// G.711 A-law
    G711ALaw,
    /// G.711 mu-law
    G711MuLaw,
    /// Codes 9, 12 and 13
    Reserved(u8),
    /// AAC
    Aac,
    /// Speex
    Speex,
    /// MP3 8kHz
    Mp38kHz,
    /// Device specific
    DeviceSpecific,
}

impl SoundFormat {
    /// Parse from the 4-bit sound format field
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x0F {
            0 => SoundFormat::LinearPcm,
            1 => SoundFormat::Adpcm,
            2 => SoundFormat::Mp3,
            3 => SoundFormat::LinearPcmLittleEndian,
            4 => SoundFormat::Nellymoser16kHzMono,
            5 => SoundFormat::Nellymoser8kHzMono,
            6 => SoundFormat::Nellymoser,
            7 => SoundFormat::G711ALaw,
            8 => SoundFormat::G711MuLaw,
            10 => SoundFormat::Aac,
            11 => SoundFormat::Speex,
            14 => SoundFormat::Mp38kHz,
            15 => SoundFormat::DeviceSpecific,
            code => SoundFormat::Reserved(code),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            SoundFormat::LinearPcm => 0,
            SoundFormat::Adpcm => 1,
            SoundFormat::Mp3 => 2,
            SoundFormat::LinearPcmLittleEndian => 3,
            SoundFormat::Nellymoser16kHzMono => 4,
            SoundFormat::Nellymoser8kHzMono => 5,
            SoundFormat::Nellymoser => 6,
            SoundFormat::G711ALaw => 7,
            SoundFormat::G711MuLaw => 8,
            SoundFormat::Reserved(code) => *code,
            SoundFormat::Aac => 10,
            SoundFormat::Speex => 11,
            SoundFormat::Mp38kHz => 14,
            SoundFormat::DeviceSpecific => 15,
        }
    }

    /// Get format name
    pub fn name(&self) -> &'static str {
        match self {
            SoundFormat::LinearPcm => "Linear PCM, platform endian",
            SoundFormat::Adpcm => "ADPCM",
            SoundFormat::Mp3 => "MP3",
            SoundFormat::LinearPcmLittleEndian => "Linear PCM, little endian",
            SoundFormat::Nellymoser16kHzMono => "Nellymoser 16-kHz mono",
            SoundFormat::Nellymoser8kHzMono => "Nellymoser 8-kHz mono",
            SoundFormat::Nellymoser => "Nellymoser",
            SoundFormat::G711ALaw => "G.711 A-law logarithmic PCM",
            SoundFormat::G711MuLaw => "G.711 mu-law logarithmic PCM",
            SoundFormat::Reserved(_) => "not defined by standard",
            SoundFormat::Aac => "AAC",
            SoundFormat::Speex => "Speex",
            SoundFormat::Mp38kHz => "MP3 8-Khz",
            SoundFormat::DeviceSpecific => "Device-specific sound",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundRate {
    Rate5_5kHz,
    Rate11kHz,
    Rate22kHz,
    Rate44kHz,
}

impl SoundRate {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => SoundRate::Rate5_5kHz,
            1 => SoundRate::Rate11kHz,
            2 => SoundRate::Rate22kHz,
            _ => SoundRate::Rate44kHz,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SoundRate::Rate5_5kHz => "5.5-Khz",
            SoundRate::Rate11kHz => "11-Khz",
            SoundRate::Rate22kHz => "22-Khz",
            SoundRate::Rate44kHz => "44-Khz",
        }
    }

    pub fn as_hz(&self) -> u32 {
        match self {
            SoundRate::Rate5_5kHz => 5512,
            SoundRate::Rate11kHz => 11025,
            SoundRate::Rate22kHz => 22050,
            SoundRate::Rate44kHz => 44100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundSize {
    Bits8,
    Bits16,
}

impl SoundSize {
    pub fn from_bits(bits: u8) -> Self {
        if bits & 0x01 == 0 { SoundSize::Bits8 } else { SoundSize::Bits16 }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SoundSize::Bits8 => "8 bit",
            SoundSize::Bits16 => "16 bit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundType {
    Mono,
    Stereo,
}

impl SoundType {
    pub fn from_bits(bits: u8) -> Self {
        if bits & 0x01 == 0 { SoundType::Mono } else { SoundType::Stereo }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SoundType::Mono => "Mono",
            SoundType::Stereo => "Stereo",
        }
    }
}

/// Decoded audio tag body
#[derive(Debug, Clone, PartialEq)]
pub struct AudioPayload {
    pub sound_format: SoundFormat,
    pub sound_rate: SoundRate,
    pub sound_size: SoundSize,
    pub sound_type: SoundType,
    /// Codec payload following the descriptor byte, unparsed
    pub data: Vec<u8>,
}

impl AudioPayload {
    /// AAC packet type 0 carries the AudioSpecificConfig
    pub fn is_aac_sequence_header(&self) -> bool {
        self.sound_format == SoundFormat::Aac && self.data.first() == Some(&0)
    }
}

/// Decode an audio tag body.
///
/// Descriptor byte layout, MSB first: format(4) rate(2) size(1) type(1).
pub fn decode_audio(bytes: &[u8]) -> Result<AudioPayload> {
    if bytes.is_empty() {
        return Err(Error::format("empty audio tag body"));
    }

    let mut buffer = ByteBuffer::new(bytes);
    let descriptor = buffer.read_u8()?;

    Ok(AudioPayload {
        sound_format: SoundFormat::from_bits(descriptor >> 4),
        sound_rate: SoundRate::from_bits(descriptor >> 2),
        sound_size: SoundSize::from_bits(descriptor >> 1),
        sound_type: SoundType::from_bits(descriptor),
        data: buffer.remaining_slice().to_vec(),
    })
}

impl fmt::Display for AudioPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "audio tag info:")?;
        writeln!(f, "\tFormat - {}", self.sound_format.name())?;
        writeln!(f, "\tRate - {}", self.sound_rate.name())?;
        writeln!(f, "\tSample bits - {}", self.sound_size.name())?;
        writeln!(f, "\tType - {}", self.sound_type.name())
    }
}
