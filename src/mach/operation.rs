/// ## Integer operators
///
/// Nothing here can fail. Overflow wraps, division by zero has a
/// defined result.

pub struct Operation {}

fn flag(b: bool) -> i64 {
    b as i64
}

impl Operation {
    pub fn sum(lhs: i64, rhs: i64) -> i64 {
        lhs.wrapping_add(rhs)
    }

    pub fn subtract(lhs: i64, rhs: i64) -> i64 {
        lhs.wrapping_sub(rhs)
    }

    pub fn multiply(lhs: i64, rhs: i64) -> i64 {
        lhs.wrapping_mul(rhs)
    }

    pub fn divide(lhs: i64, rhs: i64) -> i64 {
        if rhs == 0 {
            0
        } else {
            lhs.wrapping_div(rhs)
        }
    }

    pub fn modulus(lhs: i64, rhs: i64) -> i64 {
        if rhs == 0 {
            lhs
        } else {
            lhs.wrapping_rem(rhs)
        }
    }

    /// Repeated squaring; a negative exponent gives 0.
    pub fn power(base: i64, exp: i64) -> i64 {
        if exp < 0 {
            return 0;
        }
        let mut base = base;
        let mut exp = exp;
        let mut result: i64 = 1;
        while exp != 0 {
            if exp & 1 == 1 {
                result = result.wrapping_mul(base);
            }
            base = base.wrapping_mul(base);
            exp >>= 1;
        }
        result
    }

    pub fn greater(lhs: i64, rhs: i64) -> i64 {
        flag(lhs > rhs)
    }

    pub fn less(lhs: i64, rhs: i64) -> i64 {
        flag(lhs < rhs)
    }

    pub fn equal(lhs: i64, rhs: i64) -> i64 {
        flag(lhs == rhs)
    }

    pub fn and(lhs: i64, rhs: i64) -> i64 {
        lhs & rhs
    }

    pub fn or(lhs: i64, rhs: i64) -> i64 {
        lhs | rhs
    }

    pub fn xor(lhs: i64, rhs: i64) -> i64 {
        lhs ^ rhs
    }

    pub fn not(val: i64) -> i64 {
        flag(val == 0)
    }

    pub fn complement(val: i64) -> i64 {
        !val
    }

    pub fn negate(val: i64) -> i64 {
        val.wrapping_neg()
    }

    /// Negative amounts shift right. Shifts of 64 or more clear the value.
    pub fn shift_left(val: i64, amount: i64) -> i64 {
        if amount < 0 {
            return if amount <= -64 {
                0
            } else {
                Operation::shift_right(val, -amount)
            };
        }
        if amount >= 64 {
            0
        } else {
            ((val as u64) << amount) as i64
        }
    }

    /// Logical shift. Negative amounts shift left.
    pub fn shift_right(val: i64, amount: i64) -> i64 {
        if amount < 0 {
            return if amount <= -64 {
                0
            } else {
                Operation::shift_left(val, -amount)
            };
        }
        if amount >= 64 {
            0
        } else {
            ((val as u64) >> amount) as i64
        }
    }
}
