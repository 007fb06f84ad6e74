//! Integer helpers shared by the wheel, the sieve workers and the index.

// ─── Roots and bounds ──────────────────────────────────────────────────────

/// Integer square root — overflow-safe for all u64 values.
#[inline]
pub fn isqrt(n: u64) -> u64 {
    if n == 0 { return 0; }
    let mut x = (n as f64).sqrt() as u64;
    while x > 0 && x.checked_mul(x).map_or(true, |sq| sq > n) { x -= 1; }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= n) { x += 1; }
    x
}

/// Upper bound on π(n) for pre-allocation. Overestimates by ~15%.
#[inline]
pub fn prime_count_upper(n: u64) -> usize {
    if n < 10 { return 4; }
    let nf = n as f64;
    (nf / nf.ln() * 1.15) as usize + 1
}

// ─── Initial primes ────────────────────────────────────────────────────────

/// Primes by trial division against the primes found so far.
///
/// Collects every prime below `bound`, then keeps going past it until at
/// least `min_count` primes exist.
pub fn trial_division_primes(bound: u32, min_count: usize) -> Vec<u32> {
    let mut primes: Vec<u32> =
        Vec::with_capacity(prime_count_upper(bound as u64).max(min_count));
    let mut candidate: u32 = 2;

    while candidate < bound || primes.len() < min_count {
        let root = isqrt(candidate as u64) as u32;
        let is_prime = primes
            .iter()
            .take_while(|&&p| p <= root)
            .all(|&p| candidate % p != 0);
        if is_prime {
            primes.push(candidate);
        }
        candidate += 1;
    }

    primes
}

/// Inverse of `a` modulo `m`, if `gcd(a, m) == 1`.
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m == 1 { return Some(0); }
    let (mut r0, mut r1) = (m as i64, (a % m) as i64);
    let (mut t0, mut t1) = (0i64, 1i64);
    while r1 != 0 {
        let q = r0 / r1;
        (r0, r1) = (r1, r0 - q * r1);
        (t0, t1) = (t1, t0 - q * t1);
    }
    if r0 != 1 { return None; }
    Some(t0.rem_euclid(m as i64) as u64)
}

// ─── Densities ─────────────────────────────────────────────────────────────

/// Share of integers divisible by at least one of `primes`.
///
/// Inclusion–exclusion accumulated one prime at a time:
/// `d_i = d_{i-1} + 1/p_i - d_{i-1}/p_i`, which telescopes to `1 - ∏(1 - 1/p)`.
pub fn divisible_density(primes: &[u32]) -> f64 {
    primes.iter().fold(0.0, |d, &p| {
        let p = p as f64;
        d + 1.0 / p - d / p
    })
}
