use super::Address;
use crate::error;
use crate::lang::Error;
use rustc_hash::FxHashMap;

type Result<T> = std::result::Result<T, Error>;

pub const PAGE_SIZE: usize = 4096;
const PAGE_BITS: u32 = 12;
const PAGE_MASK: Address = PAGE_SIZE as Address - 1;

/// ## Sparse paged memory
///
/// Every signed 64-bit address is valid and reads as 0 until written.
/// Pages are allocated on the first non-zero write; the program text
/// lives below zero, data memory at zero and above.

#[derive(Default)]
pub struct Memory {
    pages: FxHashMap<Address, Box<[i64]>>,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memory {{ pages: {} }}", self.pages.len())
    }
}

fn split(address: Address) -> (Address, usize) {
    (address >> PAGE_BITS, (address & PAGE_MASK) as usize)
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn read(&self, address: Address) -> i64 {
        let (page, offset) = split(address);
        match self.pages.get(&page) {
            Some(cells) => cells[offset],
            None => 0,
        }
    }

    pub fn write(&mut self, address: Address, value: i64) -> Result<()> {
        let (page, offset) = split(address);
        if let Some(cells) = self.pages.get_mut(&page) {
            cells[offset] = value;
            return Ok(());
        }
        if value == 0 {
            return Ok(());
        }
        let mut cells = Memory::allocate()?;
        cells[offset] = value;
        if self.pages.try_reserve(1).is_err() {
            return Err(error!(OutOfMemory; "PAGE TABLE"));
        }
        self.pages.insert(page, cells);
        Ok(())
    }

    fn allocate() -> Result<Box<[i64]>> {
        let mut cells: Vec<i64> = Vec::new();
        if cells.try_reserve_exact(PAGE_SIZE).is_err() {
            return Err(error!(OutOfMemory; "PAGE"));
        }
        cells.resize(PAGE_SIZE, 0);
        Ok(cells.into_boxed_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_cells_read_zero() {
        let memory = Memory::new();
        assert_eq!(memory.read(0), 0);
        assert_eq!(memory.read(Address::MIN), 0);
        assert_eq!(memory.read(Address::MAX), 0);
    }

    #[test]
    fn test_extremes() {
        let mut memory = Memory::new();
        memory.write(Address::MIN, 7).unwrap();
        memory.write(Address::MAX, -7).unwrap();
        memory.write(-1, 1).unwrap();
        memory.write(0, 2).unwrap();
        assert_eq!(memory.read(Address::MIN), 7);
        assert_eq!(memory.read(Address::MAX), -7);
        assert_eq!(memory.read(-1), 1);
        assert_eq!(memory.read(0), 2);
        assert_eq!(memory.page_count(), 4);
    }

    #[test]
    fn test_zero_write_does_not_allocate() {
        let mut memory = Memory::new();
        memory.write(123_456_789, 0).unwrap();
        assert_eq!(memory.page_count(), 0);
        memory.write(123_456_789, 5).unwrap();
        memory.write(123_456_789, 0).unwrap();
        assert_eq!(memory.read(123_456_789), 0);
        assert_eq!(memory.page_count(), 1);
    }

    #[test]
    fn test_page_boundaries() {
        let mut memory = Memory::new();
        let edge = PAGE_SIZE as Address;
        memory.write(edge - 1, 1).unwrap();
        memory.write(edge, 2).unwrap();
        memory.write(-edge, 3).unwrap();
        memory.write(-edge - 1, 4).unwrap();
        assert_eq!(memory.read(edge - 1), 1);
        assert_eq!(memory.read(edge), 2);
        assert_eq!(memory.read(-edge), 3);
        assert_eq!(memory.read(-edge - 1), 4);
        assert_eq!(memory.page_count(), 4);
    }
}
