use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use log::debug;
use crate::format::{FileHeader, FILE_HEADER_LENGTH};
use crate::reader::ReaderConfig;
use crate::tag::{Tag, TagFramer};
use crate::{ByteSource, Error, Result};

/// Pull-based FLV reader.
///
/// Construction parses the file header and the leading zero size echo; each
/// `next_tag` call then frames and decodes exactly one tag.
pub struct Reader<S> {
    source: S,
    header: FileHeader,
    framer: TagFramer,
    tags_read: u64,
    state: ReadState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    Reading,
    Finished,
    Failed,
}

impl Reader<BufReader<File>> {
    /// Open a file and parse its header
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Reader::open_with_config(path, ReaderConfig::default())
    }

    pub fn open_with_config(path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!("opened {}", path.as_ref().display());
        Reader::with_config(BufReader::new(file), config)
    }
}

impl<S: ByteSource> Reader<S> {
    /// Create a reader with the default configuration
    pub fn new(source: S) -> Result<Self> {
        Reader::with_config(source, ReaderConfig::default())
    }

    pub fn with_config(mut source: S, config: ReaderConfig) -> Result<Self> {
        config.validate()?;

        let mut header_bytes = [0u8; FILE_HEADER_LENGTH];
        let n = source.read_available(&mut header_bytes)?;
        if n < FILE_HEADER_LENGTH {
            return Err(Error::truncated(format!(
                "file header: read {} of {} bytes",
                n, FILE_HEADER_LENGTH
            )));
        }
        let header = FileHeader::parse(&header_bytes)?;
        debug!(
            "FLV version {}, audio: {}, video: {}",
            header.version(),
            header.has_audio(),
            header.has_video()
        );

        let mut framer = TagFramer::new(config);
        framer.read_first_previous_tag_size(&mut source)?;

        Ok(Reader {
            source,
            header,
            framer,
            tags_read: 0,
            state: ReadState::Reading,
        })
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Read the next tag; `Ok(None)` marks a clean end-of-stream.
    ///
    /// The reader never tries to resynchronize. Once a call has failed, every
    /// further call fails as well, so `Ok(None)` always means a clean end.
    pub fn next_tag(&mut self) -> Result<Option<Tag>> {
        match self.state {
            ReadState::Finished => return Ok(None),
            ReadState::Failed => return Err(Error::format("reader stopped after a previous error")),
            ReadState::Reading => {}
        }

        match self.framer.read_tag(&mut self.source) {
            Ok(Some(tag)) => {
                self.tags_read += 1;
                Ok(Some(tag))
            }
            Ok(None) => {
                self.state = ReadState::Finished;
                Ok(None)
            }
            Err(e) => {
                self.state = ReadState::Failed;
                Err(e)
            }
        }
    }

    /// Bytes consumed from the source, file header included
    pub fn position(&self) -> u64 {
        FILE_HEADER_LENGTH as u64 + self.framer.bytes_consumed()
    }

    pub fn tags_read(&self) -> u64 {
        self.tags_read
    }

    pub fn tags_skipped(&self) -> u64 {
        self.framer.tags_skipped()
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: ByteSource> Iterator for Reader<S> {
    type Item = Result<Tag>;

    /// Yields the first error once, then ends
    fn next(&mut self) -> Option<Self::Item> {
        if self.state == ReadState::Failed {
            return None;
        }
        self.next_tag().transpose()
    }
}

impl<S: ByteSource> std::iter::FusedIterator for Reader<S> {}
