/// Outcome of testing whether a row fits above a limit line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Centralized break test shared by the paginator and the invoice compositor.
///
/// * `cursor_y`: where the row would start.
/// * `row_height`: the height the row needs.
/// * `limit_y`: the y coordinate content may not cross, usually `page_height - bottom_margin`.
pub fn check_row_fit(cursor_y: f32, row_height: f32, limit_y: f32) -> BreakAnalysis {
    let available = (limit_y - cursor_y).max(0.0);
    // Use a small epsilon to handle floating point inaccuracies
    const EPSILON: f32 = 0.01;
    BreakAnalysis {
        should_break: cursor_y + row_height > limit_y + EPSILON,
        remaining_height: available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fit_does_not_break() {
        let fit = check_row_fit(268.0, 12.0, 280.0);
        assert!(!fit.should_break);
        assert_eq!(fit.remaining_height, 12.0);
    }

    #[test]
    fn one_unit_over_breaks() {
        assert!(check_row_fit(269.0, 12.0, 280.0).should_break);
        assert_eq!(check_row_fit(290.0, 12.0, 280.0).remaining_height, 0.0);
    }
}
