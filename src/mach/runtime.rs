use super::{Address, Config, Frame, Memory, Operation, Program, Stack, ENTRY};
use crate::error;
use crate::lang::{Block, Error, Operator, Token};
use std::collections::VecDeque;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, Error>;

/// ## Events
///
/// Returned from `Runtime::execute` whenever the host has to do
/// something. Output is always reported before the event that
/// follows it.

#[derive(Debug, PartialEq)]
pub enum Event {
    /// Reached the end of the program, or already stopped.
    Stopped,
    /// Cycle budget used up; call `execute` again.
    Running,
    /// `_` needs a byte. Answer with `input` or `close_input`.
    Input,
    /// Bytes written by `#`.
    Print(Vec<u8>),
    /// The run is over.
    Error(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    LineComment,
    BlockComment,
    Literal { escape: bool },
}

enum Step {
    Next,
    Halt,
    Input,
}

/// ## ForWhile virtual machine
///
/// Decodes one byte per cycle at the instruction pointer, which only
/// ever counts down. The same loop strips comments, collects string
/// and number literals, scans over disabled blocks, and runs
/// everything else.

pub struct Runtime {
    config: Config,
    memory: Memory,
    stack: Stack<i64>,
    control: Stack<Frame>,
    ip: Address,
    mode: Mode,
    skip: usize,
    number: bool,
    depth: usize,
    input: VecDeque<u8>,
    input_closed: bool,
    output: Vec<u8>,
    held: Option<Event>,
    stopped: bool,
    interrupted: bool,
    cycles: u64,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new(Config::default())
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("ip", &self.ip)
            .field("mode", &self.mode)
            .field("skip", &self.skip)
            .field("depth", &self.depth)
            .field("stack", &self.stack)
            .field("control", &self.control)
            .finish()
    }
}

impl Runtime {
    pub fn new(config: Config) -> Runtime {
        Runtime {
            config,
            memory: Memory::new(),
            stack: Stack::new("VALUE STACK"),
            control: Stack::new("CONTROL STACK"),
            ip: ENTRY,
            mode: Mode::Normal,
            skip: 0,
            number: false,
            depth: 0,
            input: VecDeque::new(),
            input_closed: false,
            output: vec![],
            held: None,
            stopped: true,
            interrupted: false,
            cycles: 0,
        }
    }

    /// Replaces memory with `program` and readies a fresh run.
    /// Pending console input is kept.
    pub fn load(&mut self, program: &Program) -> Result<()> {
        self.memory.clear();
        self.stack.clear();
        self.control.clear();
        self.ip = ENTRY;
        self.mode = Mode::Normal;
        self.skip = 0;
        self.number = false;
        self.depth = 0;
        self.output.clear();
        self.held = None;
        self.interrupted = false;
        self.cycles = 0;
        self.stopped = true;
        program.write_to(&mut self.memory)?;
        debug!(bytes = program.len(), "program loaded");
        self.stopped = false;
        Ok(())
    }

    /// Loads program text. A load failure is reported by the next `execute`.
    pub fn enter(&mut self, text: &str) {
        if let Err(error) = self.load(&Program::from(text)) {
            self.held = Some(Event::Error(error));
        }
    }

    pub fn input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }

    /// After the buffered input is used up `_` reads -1.
    pub fn close_input(&mut self) {
        self.input_closed = true;
    }

    pub fn interrupt(&mut self) {
        if !self.stopped {
            self.interrupted = true;
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped && self.held.is_none()
    }

    pub fn call_depth(&self) -> usize {
        self.depth
    }

    pub fn control_depth(&self) -> usize {
        self.control.len()
    }

    pub fn stack(&self) -> &Stack<i64> {
        &self.stack
    }

    /// Value stack, bottom to top.
    pub fn values(&self) -> Vec<i64> {
        self.stack.iter().cloned().collect()
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn execute(&mut self, cycles: usize) -> Event {
        if let Some(event) = self.held.take() {
            let answered = !self.input.is_empty() || self.input_closed;
            if !(event == Event::Input && answered) {
                return event;
            }
        }
        let event = self.run(cycles);
        if self.output.is_empty() {
            return event;
        }
        if event != Event::Running {
            self.held = Some(event);
        }
        Event::Print(std::mem::take(&mut self.output))
    }

    fn run(&mut self, cycles: usize) -> Event {
        if self.stopped {
            return Event::Stopped;
        }
        if self.interrupted {
            self.interrupted = false;
            self.stopped = true;
            return Event::Error(error!(Break, self.ip));
        }
        for _ in 0..cycles {
            let at = self.ip;
            self.cycles += 1;
            match self.cycle() {
                Ok(Step::Next) => {}
                Ok(Step::Halt) => {
                    self.stopped = true;
                    debug!(cycles = self.cycles, values = self.stack.len(), "halted");
                    return Event::Stopped;
                }
                Ok(Step::Input) => return Event::Input,
                Err(error) => {
                    self.stopped = true;
                    let error = error.at_if_unknown(at);
                    debug!(cycles = self.cycles, %error, "stopped on error");
                    return Event::Error(error);
                }
            }
        }
        Event::Running
    }

    fn byte_at(&self, address: Address) -> u8 {
        (self.memory.read(address) & 0xff) as u8
    }

    fn advance(&mut self) {
        self.ip = self.ip.wrapping_sub(1);
    }

    /// Consumes the next byte when it is `modifier`.
    fn fuse(&mut self, modifier: u8) -> bool {
        if self.byte_at(self.ip) == modifier {
            self.advance();
            true
        } else {
            false
        }
    }

    fn cycle(&mut self) -> Result<Step> {
        let byte = self.byte_at(self.ip);
        self.advance();
        if byte == 0 {
            return Ok(Step::Halt);
        }
        match self.mode {
            Mode::BlockComment => {
                if byte == b'\\' && self.closing_backslashes() {
                    self.mode = Mode::Normal;
                }
                return Ok(Step::Next);
            }
            Mode::LineComment => {
                if byte == b'\n' {
                    self.mode = Mode::Normal;
                }
                return Ok(Step::Next);
            }
            Mode::Literal { escape } => {
                self.literal(byte, escape)?;
                return Ok(Step::Next);
            }
            Mode::Normal => {}
        }
        let token = Token::from_byte(byte);
        if self.skip > 0 {
            self.skip_over(token)?;
            return Ok(Step::Next);
        }
        if let Token::Digit(digit) = token {
            if self.number {
                let val = self.pop()?;
                self.push(val.wrapping_mul(10).wrapping_add(digit as i64))?;
            } else {
                self.push(digit as i64)?;
                self.number = true;
            }
            return Ok(Step::Next);
        }
        self.number = false;
        self.dispatch(token)
    }

    /// True, and both consumed, when the next two bytes are backslashes.
    fn closing_backslashes(&mut self) -> bool {
        let next = self.ip;
        if self.byte_at(next) == b'\\' && self.byte_at(next.wrapping_sub(1)) == b'\\' {
            self.ip = next.wrapping_sub(2);
            true
        } else {
            false
        }
    }

    fn open_comment(&mut self) {
        if self.closing_backslashes() {
            self.mode = Mode::BlockComment;
        } else {
            self.mode = Mode::LineComment;
        }
    }

    fn literal(&mut self, byte: u8, escape: bool) -> Result<()> {
        let live = self.skip == 0;
        if escape {
            self.mode = Mode::Literal { escape: false };
            if !live {
                return Ok(());
            }
            let val = match byte {
                b'"' => b'"',
                b'\\' => b'\\',
                b'n' => b'\n',
                b't' => b'\t',
                b'r' => b'\r',
                _ => {
                    let msg = format!("unsupported escape sequence: \\{}", byte as char);
                    return Err(error!(UnsupportedEscape; &msg));
                }
            };
            return self.push(val as i64);
        }
        match byte {
            b'\\' => self.mode = Mode::Literal { escape: true },
            b'"' => {
                self.mode = Mode::Normal;
                if live {
                    match self.control.pop() {
                        Ok(Frame::Literal { mark }) => {
                            let len = self.stack.len().saturating_sub(mark);
                            self.push(len as i64)?;
                        }
                        _ => return Err(error!(InternalError; "STRING MARK LOST")),
                    }
                }
            }
            _ => {
                if live {
                    self.push(byte as i64)?;
                }
            }
        }
        Ok(())
    }

    /// Tracks nesting inside a disabled block without running anything.
    fn skip_over(&mut self, token: Token) -> Result<()> {
        match token {
            Token::Open(block) => {
                self.control.push(Frame::Disabled(block))?;
                self.skip += 1;
            }
            // Inside a nested `[` or `(` this is an early return, not the end.
            Token::Close(Block::Proc) => {
                if let Some(Frame::Disabled(Block::Proc)) = self.control.last() {
                    self.control.pop()?;
                    self.skip -= 1;
                }
            }
            Token::Close(block) => {
                self.close(block)?;
                self.skip -= 1;
            }
            Token::Quote => self.mode = Mode::Literal { escape: false },
            Token::Backslash => self.open_comment(),
            _ => {}
        }
        Ok(())
    }

    /// Pops the frame a closing bracket belongs to.
    fn close(&mut self, block: Block) -> Result<Frame> {
        let frame = match self.control.pop() {
            Ok(frame) => frame,
            Err(_) => {
                let msg = format!("unexpected '{}'", block.close() as char);
                return Err(error!(BracketMismatch; &msg));
            }
        };
        if frame.block() != Some(block) {
            let msg = format!("unexpected '{}' in {} block", block.close() as char, frame);
            return Err(error!(BracketMismatch; &msg));
        }
        Ok(frame)
    }

    fn dispatch(&mut self, token: Token) -> Result<Step> {
        match token {
            Token::Digit(_) | Token::Ignored(_) => {}
            Token::Quote => {
                let mark = self.stack.len();
                self.control.push(Frame::Literal { mark })?;
                self.mode = Mode::Literal { escape: false };
            }
            Token::Backslash => self.open_comment(),
            Token::Open(Block::If) => {
                if self.pop()? != 0 {
                    self.control.push(Frame::If)?;
                } else {
                    self.disable(Block::If)?;
                }
            }
            Token::Open(Block::For) => {
                let count = self.pop()?;
                if count > 0 {
                    let entry = self.ip;
                    self.control.push(Frame::For {
                        remaining: count,
                        entry,
                    })?;
                    self.push(count)?;
                } else {
                    self.disable(Block::For)?;
                }
            }
            Token::Open(Block::Proc) => {
                self.push(self.ip)?;
                self.disable(Block::Proc)?;
            }
            Token::Close(Block::If) => {
                self.close(Block::If)?;
            }
            Token::Close(Block::For) => self.repeat()?,
            Token::Close(Block::Proc) => self.ret()?,
            Token::Invoke => self.call()?,
            Token::Operator(op) => return self.operate(op),
        }
        Ok(Step::Next)
    }

    fn disable(&mut self, block: Block) -> Result<()> {
        self.control.push(Frame::Disabled(block))?;
        self.skip = 1;
        Ok(())
    }

    /// `)` loops back while the body left a nonzero flag and count remains.
    fn repeat(&mut self) -> Result<()> {
        let (remaining, entry) = match self.close(Block::For)? {
            Frame::For { remaining, entry } => (remaining, entry),
            frame => {
                let msg = format!("unexpected ')' in {} block", frame);
                return Err(error!(BracketMismatch; &msg));
            }
        };
        let flag = self.pop()?;
        let remaining = remaining - 1;
        if flag != 0 && remaining > 0 {
            self.ip = entry;
            self.control.push(Frame::For { remaining, entry })?;
            self.push(remaining)?;
        }
        Ok(())
    }

    fn call(&mut self) -> Result<()> {
        let address = self.pop()?;
        if self.depth >= self.config.max_call_depth {
            debug!(address, depth = self.depth, "call depth limit reached, call skipped");
            return Ok(());
        }
        self.control.push(Frame::Call { ret: self.ip })?;
        self.depth += 1;
        trace!(address, depth = self.depth, "call");
        self.ip = address;
        Ok(())
    }

    /// `}` abandons any open `[` and `(` up to the nearest call.
    fn ret(&mut self) -> Result<()> {
        loop {
            match self.control.pop() {
                Ok(Frame::Call { ret }) => {
                    self.ip = ret;
                    self.depth = self.depth.saturating_sub(1);
                    trace!(ret, depth = self.depth, "return");
                    return Ok(());
                }
                Ok(Frame::If) | Ok(Frame::For { .. }) => {}
                Ok(frame) => {
                    let msg = format!("unexpected '}}' in {} block", frame);
                    return Err(error!(BracketMismatch; &msg));
                }
                Err(_) => return Err(error!(BracketMismatch; "unexpected '}'")),
            }
        }
    }

    fn push(&mut self, val: i64) -> Result<()> {
        self.stack.push(val)
    }

    fn pop(&mut self) -> Result<i64> {
        match self.stack.pop() {
            Ok(val) => Ok(val),
            Err(_) if !self.config.check_underflow => Ok(0),
            Err(error) => Err(error),
        }
    }

    fn pop_2(&mut self) -> Result<(i64, i64)> {
        let rhs = self.pop()?;
        let lhs = self.pop()?;
        Ok((lhs, rhs))
    }

    fn peek(&self) -> Result<i64> {
        match self.stack.peek() {
            Ok(val) => Ok(*val),
            Err(_) if !self.config.check_underflow => Ok(0),
            Err(error) => Err(error),
        }
    }

    fn unary(&mut self, op: fn(i64) -> i64) -> Result<()> {
        let val = self.pop()?;
        self.push(op(val))
    }

    fn binary(&mut self, op: fn(i64, i64) -> i64) -> Result<()> {
        let (lhs, rhs) = self.pop_2()?;
        self.push(op(lhs, rhs))
    }

    fn operate(&mut self, op: Operator) -> Result<Step> {
        use Operator::*;
        match op {
            Add => self.binary(Operation::sum)?,
            Subtract => self.binary(Operation::subtract)?,
            Multiply => self.binary(Operation::multiply)?,
            Divide => self.binary(Operation::divide)?,
            Modulus => self.binary(Operation::modulus)?,
            Power => self.binary(Operation::power)?,
            Greater => self.binary(Operation::greater)?,
            Less => self.binary(Operation::less)?,
            Equal => self.binary(Operation::equal)?,
            And => self.binary(Operation::and)?,
            Or => self.binary(Operation::or)?,
            Xor => self.binary(Operation::xor)?,
            Not => self.unary(Operation::not)?,
            Complement => {
                let val = self.pop()?;
                if self.fuse(b'~') {
                    self.push(Operation::negate(val))?;
                } else {
                    self.push(Operation::complement(val))?;
                }
            }
            Drop => {
                self.pop()?;
            }
            Duplicate => {
                let val = self.peek()?;
                self.push(val)?;
            }
            Swap => {
                let (lhs, rhs) = self.pop_2()?;
                if self.fuse(b'>') {
                    self.push(Operation::shift_right(lhs, rhs))?;
                } else if self.fuse(b'<') {
                    self.push(Operation::shift_left(lhs, rhs))?;
                } else {
                    self.push(rhs)?;
                    self.push(lhs)?;
                }
            }
            Over => {
                let top = self.pop()?;
                let under = self.peek()?;
                self.push(top)?;
                self.push(under)?;
            }
            Rotate => {
                let count = self.pop()?;
                if self.config.check_underflow {
                    self.stack.rotate(count)?;
                } else {
                    self.stack.rotate_lenient(count)?;
                }
            }
            Read => {
                let address = self.pop()?;
                let val = self.memory.read(address);
                self.push(val)?;
            }
            Write => {
                let address = self.pop()?;
                let val = self.pop()?;
                self.memory.write(address, val)?;
            }
            Getc => match self.input.pop_front() {
                Some(byte) => self.push(byte as i64)?,
                None if self.input_closed => self.push(-1)?,
                None => {
                    self.ip = self.ip.wrapping_add(1);
                    return Ok(Step::Input);
                }
            },
            Putc => {
                let val = self.peek()?;
                self.output.push((val & 0xff) as u8);
            }
        }
        Ok(Step::Next)
    }
}
