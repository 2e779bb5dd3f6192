//! Keyspace size for a search

/// Number of distinct prefixes of every length in `min_length..=max_length`
/// over `alphabet_size` symbols. `None` if it does not fit in a `u128`.
pub fn keyspace_size(alphabet_size: usize, min_length: usize, max_length: usize) -> Option<u128> {
    (min_length..=max_length).try_fold(0u128, |total, len| {
        let len = u32::try_from(len).ok()?;
        let count = (alphabet_size as u128).checked_pow(len)?;
        total.checked_add(count)
    })
}

/// Keyspace size as a float, for display when it overflows integers
pub fn keyspace_size_f64(alphabet_size: usize, min_length: usize, max_length: usize) -> f64 {
    (min_length..=max_length)
        .map(|len| (alphabet_size as f64).powi(len as i32))
        .sum()
}

/// Format a count as a human-readable string
pub fn format_count(count: f64) -> String {
    if count >= 1e15 {
        format!("{:.2}P", count / 1e15)
    } else if count >= 1e12 {
        format!("{:.2}T", count / 1e12)
    } else if count >= 1e9 {
        format!("{:.2}G", count / 1e9)
    } else if count >= 1e6 {
        format!("{:.2}M", count / 1e6)
    } else if count >= 1e3 {
        format!("{:.2}K", count / 1e3)
    } else {
        format!("{:.0}", count)
    }
}
