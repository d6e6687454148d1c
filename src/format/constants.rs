// File header
pub const FLV_SIGNATURE: &[u8; 3] = b"FLV";
pub const FLV_VERSION: u8 = 1;
pub const FILE_HEADER_LENGTH: usize = 9;
pub const FLAG_VIDEO: u8 = 0x01;
pub const FLAG_AUDIO: u8 = 0x04;

// Tag framing
pub const TAG_HEADER_LENGTH: usize = 11;
pub const PREVIOUS_TAG_SIZE_LENGTH: usize = 4;
pub const MAX_DATA_SIZE: u32 = 0x00FF_FFFF;

// Tag types
pub const TAG_TYPE_AUDIO: u8 = 8;
pub const TAG_TYPE_VIDEO: u8 = 9;
pub const TAG_TYPE_SCRIPT_DATA: u8 = 18;

// Script data
pub const SCRIPT_DATA_END_MARKER: u32 = 9;
pub const SCRIPT_DATA_END_LENGTH: usize = 3;
