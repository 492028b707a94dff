#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ReadThroughMetricsSnapshot {
    pub get_calls: u64,
    pub hits: u64,
    pub misses: u64,
    pub store_errors: u64, // misses whose store fetch failed

    pub inserts: u64,
    pub updates: u64,
    pub evictions: u64,
    pub invalidations: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl ReadThroughMetricsSnapshot {
    /// Fraction of lookups served from memory, 0.0 when nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
