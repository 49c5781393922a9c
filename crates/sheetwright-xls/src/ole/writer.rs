//! Sequential compound container writer.
//!
//! Usage follows a fixed lifecycle:
//!
//! 1. [`OleWriter::set_size`] with the exact length of the BIFF stream
//! 2. [`OleWriter::write_header`]
//! 3. [`OleWriter::write`], once or in several chunks
//! 4. [`OleWriter::close`], which pads the data region and writes the
//!    directory and the big block depot
//!
//! Output is strictly append-only. If any step fails, whatever reached the
//! sink is not a valid container and must be discarded.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::depot::depot_bytes;
use super::directory::property_storage_bytes;
use super::header::header_bytes;
use super::layout::ContainerLayout;
use crate::error::{XlsError, XlsResult};
use crate::options::WriteOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Created,
    SizeSet,
    HeaderWritten,
    DataWritten,
}

/// Writes one BIFF stream into a compound container.
#[derive(Debug)]
pub struct OleWriter<W: Write> {
    sink: W,
    state: State,
    layout: Option<ContainerLayout>,
    stream_name: &'static str,
    data_only: bool,
    written: u64,
}

impl OleWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write the container into it.
    pub fn create<P: AsRef<Path>>(path: P) -> XlsResult<Self> {
        Self::create_with_options(path, &WriteOptions::default())
    }

    pub fn create_with_options<P: AsRef<Path>>(path: P, options: &WriteOptions) -> XlsResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| XlsError::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_options(BufWriter::new(file), options))
    }
}

impl<W: Write> OleWriter<W> {
    /// Write the container into an already-open sink.
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, &WriteOptions::default())
    }

    pub fn with_options(sink: W, options: &WriteOptions) -> Self {
        Self {
            sink,
            state: State::Created,
            layout: None,
            stream_name: options.version.stream_name(),
            data_only: options.data_only,
            written: 0,
        }
    }

    /// Layout computed by the last successful [`set_size`](Self::set_size).
    pub fn layout(&self) -> Option<&ContainerLayout> {
        self.layout.as_ref()
    }

    pub fn is_data_only(&self) -> bool {
        self.data_only
    }

    /// Declare the exact length of the BIFF stream that will be written.
    ///
    /// Fails with [`XlsError::SizeExceeded`] above
    /// [`MAX_PAYLOAD_SIZE`](super::layout::MAX_PAYLOAD_SIZE); the writer then
    /// stays without a size and [`close`](Self::close) writes nothing.
    pub fn set_size(&mut self, size: u64) -> XlsResult<()> {
        if !matches!(self.state, State::Created | State::SizeSet) {
            return Err(XlsError::misuse(format!(
                "set_size called after the header was written (state {:?})",
                self.state
            )));
        }

        self.layout = None;
        self.state = State::Created;
        let layout = ContainerLayout::new(size)?;
        log::debug!(
            "container layout: payload {} bytes, {} big blocks, {} depot blocks, root at {}",
            layout.payload_size(),
            layout.big_blocks(),
            layout.list_blocks(),
            layout.root_start()
        );
        self.layout = Some(layout);
        self.state = State::SizeSet;
        Ok(())
    }

    /// Write the header sector. Does nothing in data-only mode.
    pub fn write_header(&mut self) -> XlsResult<()> {
        if self.data_only {
            return Ok(());
        }
        let layout = match (self.state, self.layout) {
            (State::SizeSet, Some(layout)) => layout,
            (state, _) => {
                return Err(XlsError::misuse(format!(
                    "write_header requires a size and must come first (state {state:?})"
                )))
            }
        };

        self.sink.write_all(&header_bytes(&layout))?;
        self.state = State::HeaderWritten;
        log::debug!("container header written");
        Ok(())
    }

    /// Write BIFF stream bytes.
    pub fn write(&mut self, data: &[u8]) -> XlsResult<()> {
        let ready = if self.data_only {
            self.state != State::Created
        } else {
            matches!(self.state, State::HeaderWritten | State::DataWritten)
        };
        let layout = match self.layout {
            Some(layout) if ready => layout,
            _ => {
                return Err(XlsError::misuse(format!(
                    "write called before set_size/write_header (state {:?})",
                    self.state
                )))
            }
        };

        let total = self.written + data.len() as u64;
        if total > layout.payload_size() {
            return Err(XlsError::misuse(format!(
                "{} bytes written but only {} declared by set_size",
                total,
                layout.payload_size()
            )));
        }

        self.sink.write_all(data)?;
        self.written = total;
        self.state = State::DataWritten;
        Ok(())
    }

    /// Finish the container and hand the sink back.
    ///
    /// Pads the data region, then writes the property storage and the big
    /// block depot. Without a successful [`set_size`](Self::set_size) this
    /// writes and flushes nothing. Consuming `self` makes the padding,
    /// directory and depot reachable once per container.
    pub fn close(mut self) -> XlsResult<W> {
        let Some(layout) = self.layout else {
            log::warn!("close() without a valid size, nothing written");
            return Ok(self.sink);
        };

        if self.written != layout.payload_size() {
            return Err(XlsError::misuse(format!(
                "{} bytes declared by set_size but {} written",
                layout.payload_size(),
                self.written
            )));
        }

        if !self.data_only {
            if self.state == State::SizeSet {
                return Err(XlsError::misuse("close called before write_header"));
            }
            self.write_padding(&layout)?;
            self.sink
                .write_all(&property_storage_bytes(&layout, self.stream_name))?;
            self.sink.write_all(&depot_bytes(&layout))?;
        }

        self.sink.flush()?;
        log::debug!("container closed after {} payload bytes", self.written);
        Ok(self.sink)
    }

    fn write_padding(&mut self, layout: &ContainerLayout) -> XlsResult<()> {
        let padding = layout.padding_len() as usize;
        if padding > 0 {
            self.sink.write_all(&vec![0u8; padding])?;
        }
        Ok(())
    }
}
