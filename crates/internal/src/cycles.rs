//! Raw processor cycle counter

/// Read the time-stamp counter.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn read_cycle_counter() -> u64 {
    let lo: u32;
    let hi: u32;
    // SAFETY: rdtsc only writes eax/edx and touches no memory.
    unsafe {
        core::arch::asm!(
            "rdtsc",
            out("eax") lo,
            out("edx") hi,
            options(nostack, nomem, preserves_flags)
        );
    }
    ((hi as u64) << 32) | (lo as u64)
}

/// ARM equivalent: CNTVCT_EL0 (generic timer virtual count).
#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub fn read_cycle_counter() -> u64 {
    let cnt: u64;
    // SAFETY: reading CNTVCT_EL0 is permitted at EL0 and has no side effects.
    unsafe {
        core::arch::asm!(
            "mrs {cnt}, CNTVCT_EL0",
            cnt = out(reg) cnt,
            options(nostack, nomem, preserves_flags)
        );
    }
    cnt
}

/// Fallback: monotonic nanoseconds since first use.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub fn read_cycle_counter() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    ANCHOR.get_or_init(Instant::now).elapsed().as_nanos() as u64
}
