//! Key material and shared secret buffers for one exchange run

use isokex_api::{CurveParameterSet, Result, Role};
use isokex_common::SecureBuffer;
use zeroize::Zeroize;

/// The six buffers of a two-party exchange
///
/// Allocated once per run and reused across iterations. Wrap in a
/// [`ZeroizeGuard`](isokex_common::ZeroizeGuard) for the scope of the run.
#[derive(Debug)]
pub struct ExchangeBuffers {
    pub private_a: SecureBuffer,
    pub public_a: SecureBuffer,
    pub private_b: SecureBuffer,
    pub public_b: SecureBuffer,
    pub secret_a: SecureBuffer,
    pub secret_b: SecureBuffer,
}

impl ExchangeBuffers {
    /// Zero-filled buffers sized for `params`
    pub fn for_params(params: &CurveParameterSet) -> Result<Self> {
        Ok(Self {
            private_a: SecureBuffer::new(params.private_key_bytes())?,
            public_a: SecureBuffer::new(params.public_key_bytes())?,
            private_b: SecureBuffer::new(params.private_key_bytes())?,
            public_b: SecureBuffer::new(params.public_key_bytes())?,
            secret_a: SecureBuffer::new(params.shared_secret_bytes())?,
            secret_b: SecureBuffer::new(params.shared_secret_bytes())?,
        })
    }

    fn all(&self) -> [&SecureBuffer; 6] {
        [
            &self.private_a,
            &self.public_a,
            &self.private_b,
            &self.public_b,
            &self.secret_a,
            &self.secret_b,
        ]
    }

    /// Whether every buffer reads back as all zero
    pub fn is_zeroed(&self) -> bool {
        self.all().iter().all(|buf| buf.is_zeroed())
    }

    /// Byte-exact, constant-time comparison of the two shared secrets
    pub fn secrets_match(&self) -> bool {
        self.secret_a.ct_eq(&self.secret_b)
    }

    /// (private key, public key) of `role`, for key generation
    pub fn keypair_mut(&mut self, role: Role) -> (&mut [u8], &mut [u8]) {
        match role {
            Role::A => (self.private_a.as_mut_slice(), self.public_a.as_mut_slice()),
            Role::B => (self.private_b.as_mut_slice(), self.public_b.as_mut_slice()),
        }
    }

    /// (own private key, peer public key, own secret) of `role`, for agreement
    pub fn agreement_mut(&mut self, role: Role) -> (&[u8], &[u8], &mut [u8]) {
        match role {
            Role::A => (
                self.private_a.as_slice(),
                self.public_b.as_slice(),
                self.secret_a.as_mut_slice(),
            ),
            Role::B => (
                self.private_b.as_slice(),
                self.public_a.as_slice(),
                self.secret_b.as_mut_slice(),
            ),
        }
    }

    /// Public key of `role`
    pub fn public_key_mut(&mut self, role: Role) -> &mut [u8] {
        match role {
            Role::A => self.public_a.as_mut_slice(),
            Role::B => self.public_b.as_mut_slice(),
        }
    }
}

impl Zeroize for ExchangeBuffers {
    fn zeroize(&mut self) {
        self.private_a.wipe();
        self.public_a.wipe();
        self.private_b.wipe();
        self.public_b.wipe();
        self.secret_a.wipe();
        self.secret_b.wipe();
    }
}
