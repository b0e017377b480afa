/// Truncate a newest-first series to its `count` newest entries.
///
/// A missing or non-positive count leaves the series unchanged, as does a
/// count beyond the series length. The series is never re-sorted; the
/// provider's newest-first ordering is trusted as-is.
pub fn window<T>(mut series: Vec<T>, count: Option<i64>) -> Vec<T> {
    if let Some(n) = count {
        if n > 0 {
            series.truncate(n as usize);
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_truncates_to_count() {
        let series = vec![5, 4, 3, 2, 1];
        assert_eq!(window(series, Some(2)), vec![5, 4]);
    }

    #[test]
    fn test_window_length_is_min_of_len_and_count() {
        let series = vec![1, 2, 3];
        assert_eq!(window(series.clone(), Some(10)), series);
        assert_eq!(window(series, Some(3)).len(), 3);
        assert_eq!(window(Vec::<i32>::new(), Some(4)), Vec::<i32>::new());
    }

    #[test]
    fn test_window_identity_without_positive_count() {
        let series = vec![1, 2, 3];
        assert_eq!(window(series.clone(), None), series);
        assert_eq!(window(series.clone(), Some(0)), series);
        assert_eq!(window(series.clone(), Some(-5)), series);
    }

    #[test]
    fn test_window_is_idempotent() {
        let series = vec![9, 8, 7, 6];
        let once = window(series, Some(3));
        let twice = window(once.clone(), Some(3));
        assert_eq!(once, twice);
    }
}
