// CIT - Capital Income Tax
// Written in 2024 by
//   The CIT developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! Files
//!
//! Output files. Reports are never written over existing data: creating a
//! file that is already there is an error.
//!

use anyhow::Context;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

/// A newly created text file
pub struct TextFile {
    path: PathBuf,
    inner: io::BufWriter<fs::File>,
}

impl TextFile {
    /// Creates a new file, failing if one already exists at `path`
    ///
    /// `purpose` only shows up in the log.
    pub fn create<P: AsRef<Path>>(path: P, purpose: &str) -> anyhow::Result<TextFile> {
        let path = path.as_ref().to_path_buf();
        let file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(anyhow::Error::msg(format!(
                    "File {} already exists. Refusing to overwrite.",
                    path.display()
                )))
            }
            Err(e) => {
                return Err(e).with_context(|| format!("creating file {}", path.display()))
            }
        };
        info!("Creating file {} {}.", path.display(), purpose);
        Ok(TextFile {
            path,
            inner: io::BufWriter::new(file),
        })
    }

    /// Accessor for the file's path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes formatted data; used by the write! and writeln! macros
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> anyhow::Result<()> {
        io::Write::write_fmt(&mut self.inner, args)
            .with_context(|| format!("writing to {}", self.path.display()))
    }

    /// Flushes buffered data to disk
    ///
    /// Dropping a [TextFile] without calling this loses any write error.
    pub fn finish(mut self) -> anyhow::Result<()> {
        io::Write::flush(&mut self.inner)
            .with_context(|| format!("flushing {}", self.path.display()))?;
        debug!("finished writing {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_overwrite() {
        let path = std::env::temp_dir().join(format!("cit-file-test-{}.txt", std::process::id()));
        let _ = fs::remove_file(&path);

        let mut file = TextFile::create(&path, "for testing").unwrap();
        assert_eq!(file.path(), path.as_path());
        writeln!(file, "line {}", 1).unwrap();
        file.finish().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "line 1\n");

        let err = TextFile::create(&path, "for testing").err().unwrap();
        assert!(err.to_string().contains("Refusing to overwrite"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "line 1\n");

        fs::remove_file(&path).unwrap();
    }
}
