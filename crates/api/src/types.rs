//! Core types shared by engines and the harness

use core::fmt;

/// Machine word used for multi-limb scalars and field coordinates
///
/// Limb arrays are little endian: index 0 holds the least significant word.
pub type Limb = u64;

/// One side of the asymmetric exchange
///
/// The two roles draw private keys from different key spaces, so every
/// keygen and agreement call names the role it acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Alice, the power-of-two side
    A,
    /// Bob, the power-of-three side
    B,
}

impl Role {
    /// Both roles, in protocol order
    pub const ALL: [Role; 2] = [Role::A, Role::B];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::A => write!(f, "Alice"),
            Role::B => write!(f, "Bob"),
        }
    }
}
