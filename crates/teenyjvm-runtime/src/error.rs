use std::fmt::{self, Display};

/// The fatal-error taxonomy a running frame can hit. Every variant here is
/// unrecoverable — TeenyJVM has no try/catch, matching its reference: a
/// trusted, compiler-produced input is assumed, and any of these ends the
/// process with the runtime-failure exit code.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TrapError {
    StackUnderflow,
    DivisionByZero,
    NegativeArraySize(i32),
    UnknownOpcode(u8),
    InvalidArrayHandle(i32),
    IndexOutOfBounds {
        handle: i32,
        index: i32,
        length: i32,
    },
    InvalidConstant(u16),
    NonVoidMainReturn,
    MissingEntryPoint,
}

impl Display for TrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrapError::StackUnderflow => write!(f, "operand stack underflow"),
            TrapError::DivisionByZero => write!(f, "division or modulo by zero"),
            TrapError::NegativeArraySize(n) => write!(f, "negative array size: {}", n),
            TrapError::UnknownOpcode(op) => write!(f, "unsupported opcode: 0x{:02x}", op),
            TrapError::InvalidArrayHandle(h) => write!(f, "invalid array handle: {}", h),
            TrapError::IndexOutOfBounds {
                handle,
                index,
                length,
            } => write!(
                f,
                "array index {} out of bounds for handle {} of length {}",
                index, handle, length
            ),
            TrapError::InvalidConstant(idx) => {
                write!(
                    f,
                    "constant pool index {} is not a usable integer constant",
                    idx
                )
            }
            TrapError::NonVoidMainReturn => write!(f, "main() returned a value, expected void"),
            TrapError::MissingEntryPoint => {
                write!(f, "missing main([Ljava/lang/String;)V entry point")
            }
        }
    }
}

impl std::error::Error for TrapError {}
