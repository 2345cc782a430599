use super::{Address, Memory};
use crate::error;
use crate::lang::Error;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

type Result<T> = std::result::Result<T, Error>;

/// First byte of the program text. The rest follows downward.
pub const ENTRY: Address = -1;

/// ## Program text
///
/// Loaded verbatim, byte for byte, below address zero.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    text: Vec<u8>,
}

impl Program {
    pub fn new(text: &[u8]) -> Program {
        Program {
            text: text.to_vec(),
        }
    }

    pub fn load(path: &Path) -> Result<Program> {
        let mut text = vec![];
        let opened = File::open(path).and_then(|mut file| file.read_to_end(&mut text));
        if let Err(error) = opened {
            let msg = match error.kind() {
                ErrorKind::NotFound => format!("file not found: \"{}\"", path.display()),
                _ => format!("cannot open file \"{}\": {}", path.display(), error),
            };
            return Err(error!(SourceLoad; &msg));
        }
        Ok(Program { text })
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.text
    }

    /// Writes the text at `ENTRY`, `ENTRY - 1`, ... and returns the
    /// address just past the last byte.
    pub fn write_to(&self, memory: &mut Memory) -> Result<Address> {
        let mut address = ENTRY;
        for byte in &self.text {
            memory.write(address, *byte as i64)?;
            address -= 1;
        }
        Ok(address)
    }
}

impl From<&str> for Program {
    fn from(s: &str) -> Program {
        Program::new(s.as_bytes())
    }
}
