//! Generation of the C file that includes every configured header.
//!
//! The output is meant to be run through a C preprocessor so that type and
//! structure layout information can be extracted from the expanded headers.
//! Its shape is fixed:
//!
//! ```text
//! /* GENERATED BY AUTOBLOB GenerateInputCFile. DO NOT EDIT */
//!
//!
//! #include "j9.h"
//! #include "j9comp.h"
//! ```

use crate::error::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Tool name written into the banner unless overridden.
pub const DEFAULT_TOOL_NAME: &str = "AUTOBLOB GenerateInputCFile";

/// Anything that can enumerate header include paths in a stable order.
pub trait IncludeSource {
    /// The include paths, in the order they must be emitted.
    fn include_paths(&self) -> &[String];

    /// Writes one `#include "<path>"` line per include path.
    fn write_c_includes(&self, writer: &mut dyn Write) -> io::Result<()> {
        for path in self.include_paths() {
            writeln!(writer, "#include \"{}\"", path)?;
        }
        Ok(())
    }
}

impl IncludeSource for Vec<String> {
    fn include_paths(&self) -> &[String] {
        self
    }
}

/// Information about a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// The path where the file was written.
    pub path: PathBuf,
    /// The number of bytes written.
    pub bytes_written: usize,
    /// The number of include directives written.
    pub include_count: usize,
}

/// Writes the generated C include file.
#[derive(Debug, Clone)]
pub struct CFileGenerator {
    tool_name: String,
}

impl Default for CFileGenerator {
    fn default() -> Self {
        Self {
            tool_name: DEFAULT_TOOL_NAME.to_string(),
        }
    }
}

impl CFileGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the tool name shown in the banner.
    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = tool_name.into();
        self
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Writes the banner, two blank lines and the include directives to `output_path`.
    ///
    /// The file is truncated if it exists. Its parent directory must already
    /// exist. The handle is flushed before returning and closed on every
    /// path out of this function.
    pub fn generate(
        &self,
        output_path: impl AsRef<Path>,
        source: &impl IncludeSource,
    ) -> Result<GeneratedFile> {
        let output_path = output_path.as_ref();
        let display_path = std::path::absolute(output_path)
            .unwrap_or_else(|_| output_path.to_path_buf());

        let file = File::create(output_path).map_err(|e| {
            error!("Failed to open {:?} for writing: {}", display_path, e);
            e
        })?;
        info!("Writing C file: {}", display_path.display());

        let mut writer = CountingWriter::new(BufWriter::new(file));
        let written = self
            .write_c_file(&mut writer, source)
            .and_then(|()| writer.flush());

        if let Err(e) = written {
            error!("Error during write: {}", e);
            return Err(e.into());
        }

        info!("C file written");
        debug!(
            "{} include directives, {} bytes",
            source.include_paths().len(),
            writer.count
        );

        Ok(GeneratedFile {
            path: output_path.to_path_buf(),
            bytes_written: writer.count,
            include_count: source.include_paths().len(),
        })
    }

    /// Writes the generated content to any writer.
    pub fn write_c_file<W: Write>(
        &self,
        writer: &mut W,
        source: &impl IncludeSource,
    ) -> io::Result<()> {
        writeln!(writer, "/* GENERATED BY {}. DO NOT EDIT */", self.tool_name)?;
        writeln!(writer)?;
        writeln!(writer)?;
        source.write_c_includes(writer)
    }

    /// Renders the generated content into a string.
    pub fn render(&self, source: &impl IncludeSource) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write_c_file(&mut buffer, source)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

struct CountingWriter<W> {
    inner: W,
    count: usize,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
