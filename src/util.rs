use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in seconds.
///
/// Not guaranteed to be monotonic; intended for coarse ad-hoc timing of
/// operation batches, not for profiling.
pub fn wall_time() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wall_time_advances() {
        let start = wall_time();
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(wall_time() > start);
    }
}
