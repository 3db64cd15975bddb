// Shared domain types

use std::fmt;

use crate::err::TableError;

// Aliases

// Position of a condition in registration order -- e.g. 0
pub type ConditionId = usize;

// Position of an action in registration order -- e.g. 3
pub type ActionId = usize;

// Position of a case in registration order -- e.g. 1
pub type CaseId = usize;

// Enums

/// Whether a condition's outcome matters for a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mask {
    Ignore, // 0
    Check,  // 1
}

/// Expected outcome of a condition after masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expect {
    True,     // 1
    False,    // -1
    DontCare, // 0
}

/// Outcome of evaluating a condition for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    True,  // 1
    False, // -1
}

// Impls

impl Mask {
    /// Multiplies an outcome by this mask: `Check` passes it through, `Ignore` zeroes it.
    pub fn apply(self, outcome: Outcome) -> Expect {
        match self {
            Mask::Check => Expect::from(outcome),
            Mask::Ignore => Expect::DontCare,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Mask::Ignore => 0,
            Mask::Check => 1,
        }
    }
}

impl Expect {
    pub fn as_i8(self) -> i8 {
        match self {
            Expect::True => 1,
            Expect::False => -1,
            Expect::DontCare => 0,
        }
    }
}

impl Outcome {
    pub fn as_i8(self) -> i8 {
        match self {
            Outcome::True => 1,
            Outcome::False => -1,
        }
    }
}

impl From<bool> for Mask {
    fn from(check: bool) -> Self {
        if check {
            Mask::Check
        } else {
            Mask::Ignore
        }
    }
}

impl From<bool> for Expect {
    fn from(value: bool) -> Self {
        Expect::from(Outcome::from(value))
    }
}

impl From<bool> for Outcome {
    fn from(value: bool) -> Self {
        if value {
            Outcome::True
        } else {
            Outcome::False
        }
    }
}

impl From<Outcome> for Expect {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::True => Expect::True,
            Outcome::False => Expect::False,
        }
    }
}

impl TryFrom<i8> for Mask {
    type Error = TableError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mask::Ignore),
            1 => Ok(Mask::Check),
            _ => Err(TableError::InvalidEncoding { kind: "mask", value }),
        }
    }
}

impl TryFrom<i8> for Expect {
    type Error = TableError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Expect::True),
            -1 => Ok(Expect::False),
            0 => Ok(Expect::DontCare),
            _ => Err(TableError::InvalidEncoding {
                kind: "result",
                value,
            }),
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}
