use crate::mach::Address;
use std::rc::Rc;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: u16,
    address: Option<Address>,
    message: Rc<str>,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $addr:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).at($addr)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $addr:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at($addr)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            address: None,
            message: "".into(),
        }
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code as u16
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn at(&self, address: Address) -> Error {
        debug_assert!(self.address.is_none());
        Error {
            code: self.code,
            address: Some(address),
            message: self.message.clone(),
        }
    }

    /// Addresses only the errors that don't already know where they happened.
    pub fn at_if_unknown(self, address: Address) -> Error {
        if self.address.is_some() {
            self
        } else {
            self.at(address)
        }
    }

    pub fn message(&self, message: &str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            code: self.code,
            address: self.address,
            message: message.into(),
        }
    }
}

pub enum ErrorCode {
    BracketMismatch = 1,
    UnsupportedEscape = 2,
    StackUnderflow = 3,
    OutOfMemory = 4,
    SourceLoad = 5,
    Break = 6,
    InternalError = 51,
}

impl std::error::Error for Error {}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            1 => "BRACKET MISMATCH",
            2 => "UNSUPPORTED ESCAPE",
            3 => "STACK UNDERFLOW",
            4 => "OUT OF MEMORY",
            5 => "CANNOT LOAD SOURCE",
            6 => "BREAK",
            51 => "INTERNAL ERROR",
            _ => "",
        };
        let mut suffix = String::new();
        if let Some(address) = self.address {
            suffix.push_str(&format!(" AT {}", address));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if code_str.is_empty() {
            write!(f, "PROGRAM ERROR {}{}", self.code, suffix)
        } else {
            write!(f, "{}{}", code_str, suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(error!(StackUnderflow).to_string(), "STACK UNDERFLOW");
        assert_eq!(
            error!(BracketMismatch, -7; "unexpected ']' in '()' block").to_string(),
            "BRACKET MISMATCH AT -7; unexpected ']' in '()' block"
        );
    }

    #[test]
    fn test_at_if_unknown_keeps_first_address() {
        let e = error!(OutOfMemory, 3).at_if_unknown(9);
        assert_eq!(e.address(), Some(3));
        let e = error!(OutOfMemory).at_if_unknown(9);
        assert_eq!(e.address(), Some(9));
        assert!(e.is(ErrorCode::OutOfMemory));
    }
}
