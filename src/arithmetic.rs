use std::cmp::Ordering;
use std::ops;

use crate::ast::Num::{self, *};

// because math is hard

impl ops::Add for Num {
    type Output = Num;

    fn add(self, other: Num) -> Num {
        match (self, other) {
            (Int(a), Int(b)) => Int(a + b),
            (Float(a), Float(b)) => Float(a + b),
            (Int(a), Float(b)) => Float(a as f64 + b),
            (Float(a), Int(b)) => Float(a + b as f64),
        }
    }
}

impl ops::Sub for Num {
    type Output = Num;

    fn sub(self, other: Num) -> Num {
        match (self, other) {
            (Int(a), Int(b)) => Int(a - b),
            (Float(a), Float(b)) => Float(a - b),
            (Int(a), Float(b)) => Float(a as f64 - b),
            (Float(a), Int(b)) => Float(a - b as f64),
        }
    }
}

impl ops::Mul for Num {
    type Output = Num;

    fn mul(self, other: Num) -> Num {
        match (self, other) {
            (Int(a), Int(b)) => Int(a * b),
            (Float(a), Float(b)) => Float(a * b),
            (Int(a), Float(b)) => Float(a as f64 * b),
            (Float(a), Int(b)) => Float(a * b as f64),
        }
    }
}

impl ops::Div for Num {
    type Output = Num;

    /// integer division that divides evenly stays integral; everything else
    /// promotes to float. zero divisors fall through to float division.
    fn div(self, other: Num) -> Num {
        match (self, other) {
            (Int(a), Int(b)) if b != 0 && a % b == 0 => Int(a / b),
            (a, b) => Float(a.as_f64() / b.as_f64()),
        }
    }
}

impl ops::Rem for Num {
    type Output = Num;

    fn rem(self, modulus: Num) -> Num {
        match (self, modulus) {
            (Int(a), Int(b)) if b != 0 => Int(a % b),
            (a, b) => Float(a.as_f64() % b.as_f64()),
        }
    }
}

impl PartialEq for Num {
    fn eq(&self, other: &Num) -> bool {
        match (self, other) {
            (Int(a), Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl PartialOrd for Num {
    fn partial_cmp(&self, other: &Num) -> Option<Ordering> {
        self.as_f64().partial_cmp(&other.as_f64())
    }
}

// }}}
