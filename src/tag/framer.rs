use byteorder::{BigEndian, ByteOrder};
use log::{debug, warn};
use crate::format::{PREVIOUS_TAG_SIZE_LENGTH, TAG_HEADER_LENGTH};
use crate::reader::{ReaderConfig, UnknownTagPolicy};
use crate::tag::{Payload, Tag, TagHeader};
use crate::{ByteSource, Error, Result};

/// Reads tag header, body and trailing size echo, one tag per call.
///
/// Never buffers more than one tag body. Once an error is returned the
/// source position is undefined and the stream must be discarded.
pub struct TagFramer {
    config: ReaderConfig,
    bytes_consumed: u64,
    tags_skipped: u64,
}

impl TagFramer {
    pub fn new(config: ReaderConfig) -> Self {
        TagFramer {
            config,
            bytes_consumed: 0,
            tags_skipped: 0,
        }
    }

    /// Bytes pulled from the source by this framer
    pub fn bytes_consumed(&self) -> u64 {
        self.bytes_consumed
    }

    /// Tags dropped under `UnknownTagPolicy::Skip`
    pub fn tags_skipped(&self) -> u64 {
        self.tags_skipped
    }

    /// Read the size echo that precedes the first tag; it must be 0
    pub fn read_first_previous_tag_size<S: ByteSource>(&mut self, source: &mut S) -> Result<()> {
        let size = self.read_previous_tag_size(source)?;
        if size != 0 {
            return Err(Error::format(format!("invalid first previous tag size {}", size)));
        }
        Ok(())
    }

    /// Read the next tag, or `None` on a clean end-of-stream at a tag boundary
    pub fn read_tag<S: ByteSource>(&mut self, source: &mut S) -> Result<Option<Tag>> {
        loop {
            let mut header_bytes = [0u8; TAG_HEADER_LENGTH];
            let n = source.read_available(&mut header_bytes)?;
            self.bytes_consumed += n as u64;
            if n == 0 {
                debug!("end of stream after {} bytes", self.bytes_consumed);
                return Ok(None);
            }
            if n < TAG_HEADER_LENGTH {
                return Err(Error::truncated(format!(
                    "tag header: read {} of {} bytes",
                    n, TAG_HEADER_LENGTH
                )));
            }

            let header = TagHeader::parse(&header_bytes)?;
            if header.data_size > self.config.max_data_size {
                return Err(Error::format(format!(
                    "tag data size {} exceeds limit {}",
                    header.data_size, self.config.max_data_size
                )));
            }

            let mut body = vec![0u8; header.data_size as usize];
            let n = source.read_available(&mut body)?;
            self.bytes_consumed += n as u64;
            if n < body.len() {
                return Err(Error::truncated(format!(
                    "tag body: read {} of {} bytes",
                    n,
                    body.len()
                )));
            }

            let Some(tag_type) = header.kind() else {
                match self.config.unknown_tags {
                    UnknownTagPolicy::Fail => return Err(Error::UnsupportedTagType(header.tag_type)),
                    UnknownTagPolicy::Skip => {
                        self.check_previous_tag_size(source, &header)?;
                        self.tags_skipped += 1;
                        warn!(
                            "skipped tag of unknown type {} ({} bytes)",
                            header.tag_type, header.data_size
                        );
                        continue;
                    }
                }
            };

            let payload = Payload::decode(tag_type, &body, self.config.script_data)?;
            self.check_previous_tag_size(source, &header)?;

            debug!(
                "{} tag: {} bytes at timestamp {}",
                tag_type.name(),
                header.data_size,
                header.timestamp
            );

            return Ok(Some(Tag {
                tag_type,
                data_size: header.data_size,
                timestamp: header.timestamp,
                timestamp_extension: header.timestamp_extension,
                stream_id: header.stream_id,
                payload,
            }));
        }
    }

    fn check_previous_tag_size<S: ByteSource>(&mut self, source: &mut S, header: &TagHeader) -> Result<()> {
        let actual = self.read_previous_tag_size(source)?;
        let expected = header.tag_size();
        if actual != expected {
            return Err(Error::framing(expected, actual));
        }
        Ok(())
    }

    fn read_previous_tag_size<S: ByteSource>(&mut self, source: &mut S) -> Result<u32> {
        let mut bytes = [0u8; PREVIOUS_TAG_SIZE_LENGTH];
        let n = source.read_available(&mut bytes)?;
        self.bytes_consumed += n as u64;
        if n < PREVIOUS_TAG_SIZE_LENGTH {
            return Err(Error::truncated(format!(
                "previous tag size: read {} of {} bytes",
                n, PREVIOUS_TAG_SIZE_LENGTH
            )));
        }
        Ok(BigEndian::read_u32(&bytes))
    }
}
