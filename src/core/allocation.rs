use std::ops::RangeInclusive;

use super::types::{AllocationSplit, BucketAmounts, Screen};

/// Saving share of the remainder when saving and investing are both zero.
const FALLBACK_SAVING_RATIO: f64 = 0.6;
const SLIDER_MIN: i32 = 5;

/// Half-up rounding, so 2.5 -> 3 and -2.5 -> -2.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

impl AllocationSplit {
    pub fn new(spending: i32, saving: i32, investing: i32) -> Self {
        Self {
            spending,
            saving,
            investing,
        }
    }

    pub fn total(self) -> i32 {
        self.spending + self.saving + self.investing
    }

    pub fn is_balanced(self) -> bool {
        self.total() == 100
    }

    /// Moves the spending slider and redistributes the remainder over saving
    /// and investing in their previous proportion.
    ///
    /// Saving and investing are rounded independently, so the total can land
    /// on 99 or 101. The value is not range checked.
    pub fn set_spending(&mut self, spending: i32) -> AllocationSplit {
        let remaining = f64::from(100 - spending);
        let pair = self.saving + self.investing;
        let ratio = if pair == 0 {
            FALLBACK_SAVING_RATIO
        } else {
            f64::from(self.saving) / f64::from(pair)
        };

        self.spending = spending;
        self.saving = round_half_up(remaining * ratio);
        self.investing = round_half_up(remaining * (1.0 - ratio));
        *self
    }

    /// Moves the saving slider; investing takes the exact remainder.
    /// A value above the remainder left by spending is ignored.
    pub fn set_saving(&mut self, saving: i32) -> AllocationSplit {
        let remaining = 100 - self.spending;
        if saving > remaining {
            return *self;
        }
        self.saving = saving;
        self.investing = remaining - saving;
        *self
    }

    /// Mirror of [`AllocationSplit::set_saving`] for the investing slider.
    pub fn set_investing(&mut self, investing: i32) -> AllocationSplit {
        let remaining = 100 - self.spending;
        if investing > remaining {
            return *self;
        }
        self.investing = investing;
        self.saving = remaining - investing;
        *self
    }

    pub fn amounts(self, income: f64) -> BucketAmounts {
        BucketAmounts {
            spending: income * f64::from(self.spending) / 100.0,
            saving: income * f64::from(self.saving) / 100.0,
            investing: income * f64::from(self.investing) / 100.0,
        }
    }
}

/// Slider ranges for the screens that host the allocation sliders.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SliderBounds {
    screen: Screen,
}

impl SliderBounds {
    pub fn for_screen(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn spending(self) -> RangeInclusive<i32> {
        match self.screen {
            Screen::Calculator => SLIDER_MIN..=85,
            Screen::Onboarding => 10..=80,
        }
    }

    /// Range shared by the saving and investing sliders.
    pub fn secondary(self, spending: i32) -> RangeInclusive<i32> {
        match self.screen {
            Screen::Calculator => SLIDER_MIN..=85,
            // max(min) keeps the range non-empty when spending sits at its cap
            Screen::Onboarding => SLIDER_MIN..=(100 - spending - SLIDER_MIN).max(SLIDER_MIN),
        }
    }

    pub fn clamp_spending(self, value: i32) -> i32 {
        clamp_to(value, self.spending())
    }

    pub fn clamp_secondary(self, spending: i32, value: i32) -> i32 {
        clamp_to(value, self.secondary(spending))
    }
}

fn clamp_to(value: i32, range: RangeInclusive<i32>) -> i32 {
    value.clamp(*range.start(), *range.end())
}

/// Slider moves to replay on top of a starting split, applied in the order
/// spending, saving, investing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliderMoves {
    pub spending: Option<i32>,
    pub saving: Option<i32>,
    pub investing: Option<i32>,
}

pub fn apply_slider_moves(
    start: AllocationSplit,
    bounds: SliderBounds,
    moves: SliderMoves,
) -> AllocationSplit {
    let mut split = start;
    if let Some(v) = moves.spending {
        split.set_spending(bounds.clamp_spending(v));
    }
    if let Some(v) = moves.saving {
        split.set_saving(bounds.clamp_secondary(split.spending, v));
    }
    if let Some(v) = moves.investing {
        split.set_investing(bounds.clamp_secondary(split.spending, v));
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    #[test]
    fn default_split_is_fifty_thirty_twenty() {
        let split = AllocationSplit::default();
        assert_eq!(split, AllocationSplit::new(50, 30, 20));
        assert!(split.is_balanced());
    }

    #[test]
    fn set_spending_preserves_saving_to_investing_ratio() {
        let mut split = AllocationSplit::default();
        let updated = split.set_spending(60);
        assert_eq!(updated, AllocationSplit::new(60, 24, 16));
        assert_eq!(split, updated);
    }

    #[test]
    fn set_spending_rounds_both_sides_independently() {
        let mut split = AllocationSplit::new(10, 30, 60);
        split.set_spending(1);
        assert_eq!(split, AllocationSplit::new(1, 33, 66));
        assert!(split.is_balanced());

        // ties round up on both sides
        let mut split = AllocationSplit::new(50, 25, 25);
        split.set_spending(49);
        assert_eq!(split, AllocationSplit::new(49, 26, 26));
        assert_eq!(split.total(), 101);
    }

    #[test]
    fn set_spending_uses_fallback_ratio_when_pair_is_empty() {
        let mut split = AllocationSplit::new(100, 0, 0);
        split.set_spending(40);
        assert_eq!(split, AllocationSplit::new(40, 36, 24));
    }

    #[test]
    fn set_spending_keeps_zero_saving_at_zero() {
        let mut split = AllocationSplit::new(50, 0, 50);
        split.set_spending(70);
        assert_eq!(split, AllocationSplit::new(70, 0, 30));
    }

    #[test]
    fn set_saving_above_remainder_is_ignored() {
        let mut split = AllocationSplit::default();
        let unchanged = split.set_saving(60);
        assert_eq!(unchanged, AllocationSplit::new(50, 30, 20));
        assert_eq!(split, unchanged);
    }

    #[test]
    fn set_saving_accepts_exact_remainder() {
        let mut split = AllocationSplit::default();
        split.set_saving(50);
        assert_eq!(split, AllocationSplit::new(50, 50, 0));
    }

    #[test]
    fn set_investing_derives_saving_from_remainder() {
        let mut split = AllocationSplit::default();
        split.set_investing(35);
        assert_eq!(split, AllocationSplit::new(50, 15, 35));

        let unchanged = split.set_investing(51);
        assert_eq!(unchanged, AllocationSplit::new(50, 15, 35));
    }

    #[test]
    fn amounts_scale_income_by_percentage() {
        let amounts = AllocationSplit::default().amounts(10_000.0);
        assert_eq!(amounts.spending, 5_000.0);
        assert_eq!(amounts.saving, 3_000.0);
        assert_eq!(amounts.investing, 2_000.0);
    }

    #[test]
    fn onboarding_bounds_track_spending() {
        let bounds = SliderBounds::for_screen(Screen::Onboarding);
        assert_eq!(bounds.spending(), 10..=80);
        assert_eq!(bounds.secondary(50), 5..=45);
        assert_eq!(bounds.secondary(80), 5..=15);
        assert_eq!(bounds.clamp_spending(95), 80);
        assert_eq!(bounds.clamp_secondary(60, 90), 35);
    }

    #[test]
    fn calculator_bounds_are_fixed() {
        let bounds = SliderBounds::for_screen(Screen::Calculator);
        assert_eq!(bounds.spending(), 5..=85);
        assert_eq!(bounds.secondary(70), 5..=85);
        assert_eq!(bounds.clamp_spending(0), 5);
    }

    #[test]
    fn slider_moves_apply_in_order_with_clamping() {
        let split = apply_slider_moves(
            AllocationSplit::default(),
            SliderBounds::for_screen(Screen::Onboarding),
            SliderMoves {
                spending: Some(90),
                saving: Some(2),
                investing: None,
            },
        );
        assert_eq!(split.spending, 80);
        assert_eq!(split.saving, 5);
        assert_eq!(split.investing, 15);
    }

    #[test]
    fn calculator_saving_move_past_remainder_is_dropped() {
        let split = apply_slider_moves(
            AllocationSplit::default(),
            SliderBounds::for_screen(Screen::Calculator),
            SliderMoves {
                spending: Some(70),
                saving: Some(40),
                investing: None,
            },
        );
        assert_eq!(split, AllocationSplit::new(70, 18, 12));
    }

    proptest! {
        #[test]
        fn prop_set_saving_within_remainder_balances_exactly(
            spending in 0i32..=100,
            start_saving in 0i32..=100,
            pick in 0u32..=1000,
        ) {
            let remaining = 100 - spending;
            let start_saving = start_saving.min(remaining);
            let mut split = AllocationSplit::new(spending, start_saving, remaining - start_saving);
            let saving = (pick as i32) % (remaining + 1);

            split.set_saving(saving);
            prop_assert_eq!(split.total(), 100);
            prop_assert_eq!(split.saving, saving);
            prop_assert_eq!(split.spending, spending);
        }

        #[test]
        fn prop_set_investing_within_remainder_balances_exactly(
            spending in 0i32..=100,
            pick in 0u32..=1000,
        ) {
            let remaining = 100 - spending;
            let mut split = AllocationSplit::new(spending, remaining, 0);
            let investing = (pick as i32) % (remaining + 1);

            split.set_investing(investing);
            prop_assert_eq!(split.total(), 100);
            prop_assert_eq!(split.investing, investing);
        }

        #[test]
        fn prop_set_saving_above_remainder_is_noop(
            spending in 0i32..=100,
            excess in 1i32..50,
        ) {
            let remaining = 100 - spending;
            let mut split = AllocationSplit::new(spending, remaining, 0);
            let before = split;
            split.set_saving(remaining + excess);
            prop_assert_eq!(split, before);
        }

        #[test]
        fn prop_set_spending_drifts_at_most_one(
            start_spending in 0i32..=100,
            start_saving in 0i32..=100,
            spending in 0i32..=100,
        ) {
            let remaining = 100 - start_spending;
            let start_saving = start_saving.min(remaining);
            let mut split = AllocationSplit::new(start_spending, start_saving, remaining - start_saving);

            split.set_spending(spending);
            prop_assert_eq!(split.spending, spending);
            prop_assert!((split.total() - 100).abs() <= 1);
            prop_assert!(split.saving >= 0 && split.investing >= 0);
        }
    }
}
