//! Secret data types with guaranteed zeroization
//!
//! Key material and shared secrets live in [`SecureBuffer`]s for the whole
//! of a verification or benchmark run. The owning scope wraps them in a
//! [`ZeroizeGuard`] so the zero-fill happens on every exit path.

use core::fmt;
use core::ops::{Deref, DerefMut};

use isokex_api::{Error, Result};
use isokex_internal::constant_time::ct_eq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fixed-length byte buffer for secret material
///
/// Allocated zero-filled. [`wipe`](Self::wipe) zero-fills in place and keeps
/// the length, so one buffer can be reused across iterations and still read
/// back as all zero after cleanup. Dropping a buffer that still holds data
/// wipes it; one already cleared by its guard is not filled a second time.
pub struct SecureBuffer {
    data: Vec<u8>,
}

impl SecureBuffer {
    /// Allocate a zero-filled buffer of `len` bytes
    ///
    /// Fails with `NoMemory` if the allocation cannot be satisfied.
    pub fn new(len: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| Error::from(e).with_context("SecureBuffer::new"))?;
        data.resize(len, 0);
        Ok(Self { data })
    }

    /// Copy `bytes` into a new buffer
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut buf = Self::new(bytes.len())?;
        buf.data.copy_from_slice(bytes);
        Ok(buf)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Zero-fill the contents, keeping the length
    pub fn wipe(&mut self) {
        self.data.as_mut_slice().zeroize();
    }

    /// Whether every byte is zero
    pub fn is_zeroed(&self) -> bool {
        self.data.iter().fold(0u8, |acc, &b| acc | b) == 0
    }

    /// Constant-time content comparison
    pub fn ct_eq(&self, other: &Self) -> bool {
        ct_eq(&self.data, &other.data)
    }
}

impl Zeroize for SecureBuffer {
    fn zeroize(&mut self) {
        self.wipe();
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        if !self.is_zeroed() {
            self.wipe();
        }
    }
}

impl ZeroizeOnDrop for SecureBuffer {}

impl AsRef<[u8]> for SecureBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for SecureBuffer {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureBuffer<{}>([REDACTED])", self.data.len())
    }
}

/// Guard that zeroizes the borrowed value when it goes out of scope
pub struct ZeroizeGuard<'a, T: Zeroize> {
    value: &'a mut T,
}

impl<'a, T: Zeroize> ZeroizeGuard<'a, T> {
    /// Create a new zeroize guard for the given value
    pub fn new(value: &'a mut T) -> Self {
        Self { value }
    }
}

impl<T: Zeroize> Drop for ZeroizeGuard<'_, T> {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

impl<T: Zeroize> Deref for ZeroizeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value
    }
}

impl<T: Zeroize> DerefMut for ZeroizeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value
    }
}
