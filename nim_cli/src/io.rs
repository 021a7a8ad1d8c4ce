use std::{
    fs::File,
    io::{self, Stdin, stdin},
};

/// Input source given on the command line, `-` means standard input
#[derive(Debug, Clone)]
pub enum FileOrStdin {
    FilePath(String),
    Stdin,
}

impl ::core::fmt::Display for FileOrStdin {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        match self {
            Self::Stdin => write!(f, "-"),
            Self::FilePath(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for FileOrStdin {
    fn from(value: String) -> Self {
        if &value == "-" {
            Self::Stdin
        } else {
            Self::FilePath(value)
        }
    }
}

impl FileOrStdin {
    pub fn open(&self) -> io::Result<FileOrStdinReader> {
        match self {
            Self::FilePath(fp) => Ok(FileOrStdinReader::File(File::open(fp)?)),
            Self::Stdin => Ok(FileOrStdinReader::Stdin(stdin())),
        }
    }

    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Stdin)
    }
}

pub enum FileOrStdinReader {
    File(File),
    Stdin(Stdin),
}

impl io::Read for FileOrStdinReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(f) => f.read(buf),
            Self::Stdin(fd) => {
                let mut lock = fd.lock();
                lock.read(buf)
            }
        }
    }
}
