use std::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ClassFileError {
    BadMagic,
    UnsupportedVersion { major: u16 },
    UnexpectedEof,
    InvalidConstantPoolTag(u8),
    InvalidConstantPoolIndex(u16),
    MissingCodeAttribute { method: String },
    InvalidUtf8,
}

impl Display for ClassFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassFileError::BadMagic => {
                write!(f, "not a Java class file: bad magic number")
            }
            ClassFileError::UnsupportedVersion { major } => {
                write!(f, "unsupported class file major version {}", major)
            }
            ClassFileError::UnexpectedEof => {
                write!(f, "unexpected end of class file data")
            }
            ClassFileError::InvalidConstantPoolTag(tag) => {
                write!(f, "invalid constant pool tag {}", tag)
            }
            ClassFileError::InvalidConstantPoolIndex(idx) => {
                write!(f, "constant pool index {} out of range", idx)
            }
            ClassFileError::MissingCodeAttribute { method } => {
                write!(f, "method {} has no Code attribute", method)
            }
            ClassFileError::InvalidUtf8 => {
                write!(f, "constant pool entry is not valid modified UTF-8")
            }
        }
    }
}

impl std::error::Error for ClassFileError {}
