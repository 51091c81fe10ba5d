use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::cpu::MEMORY_SIZE;

/// `LDI R0,8; PRN R0; HLT`, run when no program file is given.
pub const DEFAULT_PROGRAM: [u8; 6] = [
    0b1000_0010, // LDI R0,8
    0b0000_0000,
    0b0000_1000,
    0b0100_0111, // PRN R0
    0b0000_0000,
    0b0000_0001, // HLT
];

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("line {line}: '{text}' is not an 8-bit binary literal")]
    InvalidLiteral { line: usize, text: String },
    #[error("program of {len} bytes does not fit in {capacity} bytes of memory")]
    TooLarge { len: usize, capacity: usize },
    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ProgramError>;

/// Parses program text with one binary byte literal per line. Everything
/// after `#` is a comment; blank lines are skipped.
pub fn parse_program(text: &str) -> Result<Vec<u8>> {
    let mut program = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split_once('#').map_or(raw, |(code, _)| code).trim();
        if line.is_empty() {
            continue;
        }

        let invalid = || ProgramError::InvalidLiteral {
            line: idx + 1,
            text: line.to_string(),
        };
        if !line.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(invalid());
        }
        let byte = u8::from_str_radix(line, 2).map_err(|_| invalid())?;
        program.push(byte);
    }

    if program.len() > MEMORY_SIZE {
        return Err(ProgramError::TooLarge {
            len: program.len(),
            capacity: MEMORY_SIZE,
        });
    }
    Ok(program)
}

pub fn load_program_file(path: &Path) -> Result<Vec<u8>> {
    let text = fs::read_to_string(path).map_err(|source| ProgramError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program = parse_program(&text)?;
    tracing::debug!("parsed {} bytes from '{}'", program.len(), path.display());
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_print8() {
        let program = parse_program(include_str!("../assets/print8.ls8")).unwrap();
        assert_eq!(program, DEFAULT_PROGRAM);
    }

    #[test]
    fn strips_comments_and_blank_lines() {
        let text = "# header\n\n   10000010   # LDI\n\t00000000\n#\n00001000#no space\n";
        assert_eq!(parse_program(text).unwrap(), vec![0x82, 0x00, 0x08]);
    }

    #[test]
    fn empty_text_is_empty_program() {
        assert_eq!(parse_program("").unwrap(), Vec::<u8>::new());
        assert_eq!(parse_program("# nothing\n\n").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn rejects_invalid_literals() {
        for (text, line, literal) in [
            ("00000001\n0000002\n", 2, "0000002"),
            ("LDI R0,8\n", 1, "LDI R0,8"),
            ("\n\n+0000001\n", 3, "+0000001"),
            ("111111111\n", 1, "111111111"),
            ("1000 0010\n", 1, "1000 0010"),
        ] {
            match parse_program(text) {
                Err(ProgramError::InvalidLiteral { line: l, text: t }) => {
                    assert_eq!(l, line);
                    assert_eq!(t, literal);
                }
                other => panic!("unexpected result for {:?}: {:?}", text, other),
            }
        }
    }

    #[test]
    fn rejects_oversized_program() {
        let text = "00000000\n".repeat(MEMORY_SIZE + 1);
        assert!(matches!(
            parse_program(&text),
            Err(ProgramError::TooLarge {
                len: 257,
                capacity: 256
            })
        ));
        let text = "00000000\n".repeat(MEMORY_SIZE);
        assert_eq!(parse_program(&text).unwrap().len(), MEMORY_SIZE);
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = Path::new("does/not/exist.ls8");
        assert!(matches!(
            load_program_file(path),
            Err(ProgramError::Io { .. })
        ));
    }
}
