/// ## The three bracket pairs

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Block {
    /// `[ ... ]` runs the body when the popped condition is nonzero.
    If,
    /// `( ... )` counted loop that the body may cut short.
    For,
    /// `{ ... }` procedure body, pushed as an address instead of run.
    Proc,
}

impl Block {
    pub fn open(&self) -> u8 {
        match self {
            Block::If => b'[',
            Block::For => b'(',
            Block::Proc => b'{',
        }
    }

    pub fn close(&self) -> u8 {
        match self {
            Block::If => b']',
            Block::For => b')',
            Block::Proc => b'}',
        }
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.open() as char, self.close() as char)
    }
}

/// ## Instructions that only touch the value stack, memory or the console

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Power,
    Greater,
    Less,
    Equal,
    And,
    Or,
    Xor,
    Complement,
    Not,
    Drop,
    Duplicate,
    Swap,
    Over,
    Rotate,
    Read,
    Write,
    Getc,
    Putc,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        let ch = match self {
            Add => '+',
            Subtract => '-',
            Multiply => '*',
            Divide => '/',
            Modulus => '%',
            Power => '`',
            Greater => '>',
            Less => '<',
            Equal => '=',
            And => '&',
            Or => '|',
            Xor => '^',
            Complement => '~',
            Not => '!',
            Drop => '.',
            Duplicate => ':',
            Swap => '\'',
            Over => ';',
            Rotate => ',',
            Read => '@',
            Write => '$',
            Getc => '_',
            Putc => '#',
        };
        write!(f, "{}", ch)
    }
}

/// ## One decoded byte as seen by normal dispatch

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    Digit(u8),
    Quote,
    Backslash,
    Open(Block),
    Close(Block),
    Invoke,
    Operator(Operator),
    /// Space and every byte without a meaning.
    Ignored(u8),
}

impl Token {
    pub fn from_byte(byte: u8) -> Token {
        use Operator::*;
        match byte {
            b'0'..=b'9' => Token::Digit(byte - b'0'),
            b'"' => Token::Quote,
            b'\\' => Token::Backslash,
            b'[' => Token::Open(Block::If),
            b'(' => Token::Open(Block::For),
            b'{' => Token::Open(Block::Proc),
            b']' => Token::Close(Block::If),
            b')' => Token::Close(Block::For),
            b'}' => Token::Close(Block::Proc),
            b'?' => Token::Invoke,
            b'+' => Token::Operator(Add),
            b'-' => Token::Operator(Subtract),
            b'*' => Token::Operator(Multiply),
            b'/' => Token::Operator(Divide),
            b'%' => Token::Operator(Modulus),
            b'`' => Token::Operator(Power),
            b'>' => Token::Operator(Greater),
            b'<' => Token::Operator(Less),
            b'=' => Token::Operator(Equal),
            b'&' => Token::Operator(And),
            b'|' => Token::Operator(Or),
            b'^' => Token::Operator(Xor),
            b'~' => Token::Operator(Complement),
            b'!' => Token::Operator(Not),
            b'.' => Token::Operator(Drop),
            b':' => Token::Operator(Duplicate),
            b'\'' => Token::Operator(Swap),
            b';' => Token::Operator(Over),
            b',' => Token::Operator(Rotate),
            b'@' => Token::Operator(Read),
            b'$' => Token::Operator(Write),
            b'_' => Token::Operator(Getc),
            b'#' => Token::Operator(Putc),
            _ => Token::Ignored(byte),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Digit(d) => write!(f, "{}", d),
            Quote => write!(f, "\""),
            Backslash => write!(f, "\\"),
            Open(b) => write!(f, "{}", b.open() as char),
            Close(b) => write!(f, "{}", b.close() as char),
            Invoke => write!(f, "?"),
            Operator(op) => write!(f, "{}", op),
            Ignored(byte) => write!(f, "{}", *byte as char),
        }
    }
}
