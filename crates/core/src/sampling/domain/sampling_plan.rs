/// Which source frames a single extraction run keeps.
///
/// Computed once from the caller's limits and the source frame rate, then
/// consulted frame by frame. A frame is selected when its 0-based source
/// index is a multiple of `stride`; selection ends once `limit` frames have
/// been taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingPlan {
    stride: usize,
    limit: Option<usize>,
}

impl SamplingPlan {
    /// Builds a plan from raw request values.
    ///
    /// - `max_frames <= 0` means no limit.
    /// - `target_fps <= 0`, a non-finite target, or a target at or above the
    ///   source rate keeps every frame.
    /// - Otherwise `stride = floor(source_fps / target_fps)`, never below 1.
    pub fn new(max_frames: i64, target_fps: f64, source_fps: f64) -> Self {
        Self {
            stride: compute_stride(target_fps, source_fps),
            limit: usize::try_from(max_frames).ok().filter(|&n| n > 0),
        }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Whether the frame at `source_index` falls on the stride grid.
    pub fn selects(&self, source_index: usize) -> bool {
        source_index % self.stride == 0
    }

    /// Whether `selected` frames already satisfy the limit.
    pub fn is_satisfied(&self, selected: usize) -> bool {
        self.limit.is_some_and(|limit| selected >= limit)
    }

    /// Number of frames this plan selects from a source of `source_frames`
    /// frames: `min(ceil(N / stride), limit)`.
    pub fn expected_count(&self, source_frames: usize) -> usize {
        let on_grid = source_frames.div_ceil(self.stride);
        match self.limit {
            Some(limit) => on_grid.min(limit),
            None => on_grid,
        }
    }
}

fn compute_stride(target_fps: f64, source_fps: f64) -> usize {
    if !(target_fps.is_finite() && target_fps > 0.0 && target_fps < source_fps) {
        return 1;
    }
    let ratio = (source_fps / target_fps).floor();
    if ratio.is_finite() && ratio >= 1.0 {
        // Float-to-int casts saturate at usize::MAX.
        ratio as usize
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::half_rate(15.0, 30.0, 2)]
    #[case::fractional_ratio(10.0, 27.0, 2)]
    #[case::exact_divisor(2.0, 30.0, 15)]
    #[case::just_below_source(29.9, 30.0, 1)]
    #[case::equal_to_source(30.0, 30.0, 1)]
    #[case::above_source(60.0, 30.0, 1)]
    #[case::zero_target(0.0, 30.0, 1)]
    #[case::negative_target(-1.0, 30.0, 1)]
    #[case::nan_target(f64::NAN, 30.0, 1)]
    #[case::unknown_source_rate(2.0, 0.0, 1)]
    #[case::ntsc(2.0, 29.97, 14)]
    fn test_stride(#[case] target: f64, #[case] source: f64, #[case] expected: usize) {
        assert_eq!(SamplingPlan::new(0, target, source).stride(), expected);
    }

    #[test]
    fn test_tiny_target_rate_saturates_instead_of_faulting() {
        let plan = SamplingPlan::new(0, 1e-300, 30.0);
        assert!(plan.stride() >= 1);
        assert!(plan.selects(0));
    }

    #[rstest]
    #[case::zero(0, None)]
    #[case::negative(-5, None)]
    #[case::positive(100, Some(100))]
    fn test_limit(#[case] max_frames: i64, #[case] expected: Option<usize>) {
        assert_eq!(SamplingPlan::new(max_frames, 0.0, 30.0).limit(), expected);
    }

    #[test]
    fn test_selects_multiples_of_stride() {
        let plan = SamplingPlan::new(0, 10.0, 27.0);
        let selected: Vec<usize> = (0..10).filter(|&i| plan.selects(i)).collect();
        assert_eq!(selected, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_stride_one_selects_everything() {
        let plan = SamplingPlan::new(0, 0.0, 30.0);
        assert!((0..50).all(|i| plan.selects(i)));
    }

    #[test]
    fn test_is_satisfied() {
        let limited = SamplingPlan::new(3, 0.0, 30.0);
        assert!(!limited.is_satisfied(2));
        assert!(limited.is_satisfied(3));

        let unlimited = SamplingPlan::new(0, 0.0, 30.0);
        assert!(!unlimited.is_satisfied(usize::MAX));
    }

    #[rstest]
    #[case::unlimited_even(10, 0, 2, 5)]
    #[case::unlimited_remainder(11, 0, 2, 6)]
    #[case::capped(20, 3, 1, 3)]
    #[case::cap_above_available(7, 100, 3, 3)]
    #[case::empty_source(0, 10, 1, 0)]
    fn test_expected_count(
        #[case] frames: usize,
        #[case] max_frames: i64,
        #[case] stride: usize,
        #[case] expected: usize,
    ) {
        // Source rate chosen so that target 1.0 yields the requested stride.
        let target = if stride == 1 { 0.0 } else { 1.0 };
        let plan = SamplingPlan::new(max_frames, target, stride as f64);
        assert_eq!(plan.stride(), stride);
        assert_eq!(plan.expected_count(frames), expected);
    }
}
