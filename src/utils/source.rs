use std::io::{ErrorKind, Read, Result as IoResult};

/// A sequential byte source the reader pulls from.
///
/// `read_available` fills as much of `buf` as the source can provide and
/// returns the count; a short count means the source hit end-of-stream.
pub trait ByteSource {
    fn read_available(&mut self, buf: &mut [u8]) -> IoResult<usize>;
}

impl<R: Read> ByteSource for R {
    fn read_available(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}
