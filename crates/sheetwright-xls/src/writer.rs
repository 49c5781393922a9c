//! XLS file writer: a finished BIFF stream wrapped in a compound container.

use std::io::Write;
use std::path::Path;

use crate::biff::BiffWriter;
use crate::error::{XlsError, XlsResult};
use crate::ole::OleWriter;
use crate::options::WriteOptions;

/// XLS file writer
pub struct XlsWriter;

impl XlsWriter {
    /// Write an assembled stream to a file path.
    ///
    /// On error the file is left behind in an unusable state and should be
    /// deleted by the caller.
    pub fn write_file<P: AsRef<Path>>(
        biff: BiffWriter,
        path: P,
        options: &WriteOptions,
    ) -> XlsResult<()> {
        Self::check_version(&biff, options)?;
        let ole = OleWriter::create_with_options(path, options)?;
        Self::finish(biff, ole)?;
        Ok(())
    }

    /// Write an assembled stream to a writer, returning the writer.
    pub fn write<W: Write>(biff: BiffWriter, writer: W, options: &WriteOptions) -> XlsResult<W> {
        Self::check_version(&biff, options)?;
        Self::finish(biff, OleWriter::with_options(writer, options))
    }

    fn finish<W: Write>(biff: BiffWriter, mut ole: OleWriter<W>) -> XlsResult<W> {
        let stream = biff.into_bytes();
        ole.set_size(stream.len() as u64)?;
        ole.write_header()?;
        ole.write(&stream)?;
        ole.close()
    }

    fn check_version(biff: &BiffWriter, options: &WriteOptions) -> XlsResult<()> {
        if biff.version() != options.version {
            return Err(XlsError::misuse(format!(
                "stream assembled as {:?} but options target {:?}",
                biff.version(),
                options.version
            )));
        }
        Ok(())
    }
}
