//! Small arithmetic helpers: Fibonacci, primality, parity.
//!
//! These are standalone pure functions with no relation to the rest of
//! the workspace.

/// Return the `n`-th term of the Fibonacci sequence, 0-indexed
/// (0, 1, 1, 2, 3, 5, ...).
pub fn fibonacci(n: u32) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

/// Return true iff `n` is prime. Trial division up to the square root;
/// false for anything below 2.
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    let mut i = 2u64;
    // i <= n / i instead of i * i <= n, which overflows for n near u64::MAX.
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Return true iff `n` is even.
pub fn is_even(n: i64) -> bool {
    n % 2 == 0
}

/// Return true iff `n` is odd.
pub fn is_odd(n: i64) -> bool {
    n % 2 != 0
}
