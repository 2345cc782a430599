use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced vector
///
/// Growth is fallible so a runaway program reports OUT OF MEMORY
/// instead of aborting the process.

pub struct Stack<T> {
    overflow_message: &'static str,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(overflow_message: &'static str) -> Stack<T> {
        Stack {
            overflow_message,
            vec: vec![],
        }
    }
    fn underflow_error(&self) -> Error {
        error!(StackUnderflow)
    }
    pub fn clear(&mut self) {
        self.vec.clear()
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }
    /// Bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.vec.iter()
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        if self.vec.len() == self.vec.capacity() && self.vec.try_reserve(1).is_err() {
            return Err(error!(OutOfMemory; self.overflow_message));
        }
        self.vec.push(val);
        Ok(())
    }
    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error()),
        }
    }
    pub fn peek(&self) -> Result<&T> {
        match self.vec.last() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error()),
        }
    }
    /// Positive `count` brings the element `count` places down to the top,
    /// negative `count` buries the top element `-count` places down.
    pub fn rotate(&mut self, count: i64) -> Result<()> {
        let depth = count.unsigned_abs();
        if depth > self.vec.len() as u64 {
            return Err(self.underflow_error());
        }
        let start = self.vec.len() - depth as usize;
        let window = &mut self.vec[start..];
        if count > 0 {
            window.rotate_left(1);
        } else if count < 0 {
            window.rotate_right(1);
        }
        Ok(())
    }
}

impl<T: Default> Stack<T> {
    /// Like `rotate` but treats missing elements below the bottom as
    /// defaults: they can rotate into view and real elements can rotate
    /// out of it, the length never changes.
    pub fn rotate_lenient(&mut self, count: i64) -> Result<()> {
        if count.unsigned_abs() <= self.vec.len() as u64 {
            return self.rotate(count);
        }
        if self.vec.is_empty() {
            return Ok(());
        }
        if count > 0 {
            self.vec.remove(0);
            self.vec.push(T::default());
        } else {
            self.vec.pop();
            self.vec.insert(0, T::default());
        }
        Ok(())
    }
}
