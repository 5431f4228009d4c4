//! Greedy slot filling shared by bundle coupons and combo tiers.

use smallvec::SmallVec;

use crate::cart::{Cart, OrderLine};

/// Outcome of filling an ordered list of slots from the cart.
#[derive(Debug)]
pub struct SlotFill<'s, S> {
    /// Line consumed by each matched slot, in slot order
    pub matched: SmallVec<[usize; 4]>,

    /// Slots no unused ordered occurrence could fill
    pub unmatched: Vec<&'s S>,
}

impl<S> SlotFill<'_, S> {
    /// Number of slots that consumed an ordered occurrence.
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }
}

/// Assign each slot, in order, the earliest line with an unused occurrence that
/// the slot accepts. The line at `skip` never fills a slot.
pub fn fill<'s, S>(
    slots: &'s [S],
    cart: &Cart<'_>,
    skip: Option<usize>,
    accepts: impl Fn(&S, &OrderLine<'_>) -> bool,
) -> SlotFill<'s, S> {
    let mut used = vec![0u32; cart.len()];
    let mut matched = SmallVec::new();
    let mut unmatched = Vec::new();

    for slot in slots {
        let found = cart.iter().enumerate().zip(used.iter_mut()).find(
            |((idx, line), used)| {
                Some(*idx) != skip && **used < line.quantity() && accepts(slot, line)
            },
        );

        match found {
            Some(((idx, _), used)) => {
                *used += 1;
                matched.push(idx);
            }
            None => unmatched.push(slot),
        }
    }

    SlotFill { matched, unmatched }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::TWD};
    use testresult::TestResult;

    use crate::names;

    use super::*;

    fn cart<'a>() -> Result<Cart<'a>, crate::cart::CartError> {
        Cart::with_lines(
            [
                OrderLine::new("大麥克", Money::from_major(75, TWD), 1),
                OrderLine::new("可樂(中)", Money::from_major(38, TWD), 1),
                OrderLine::new("雪碧(中)", Money::from_major(38, TWD), 1),
            ],
            TWD,
        )
    }

    #[test]
    fn fills_each_slot_with_earliest_unused_occurrence() -> TestResult {
        let cart = cart()?;
        let slots = ["drink", "drink", "drink"];

        let result = fill(&slots, &cart, None, |_, line| names::is_drink(line.name()));

        assert_eq!(result.matched.as_slice(), &[1, 2]);
        assert_eq!(result.unmatched.len(), 1);
        assert_eq!(result.matched_count(), 2);

        Ok(())
    }

    #[test]
    fn skipped_line_never_fills_a_slot() -> TestResult {
        let cart = cart()?;
        let slots = ["大麥克"];

        let result = fill(&slots, &cart, Some(0), |slot, line| {
            names::matches(line.name(), slot)
        });

        assert!(result.matched.is_empty());
        assert_eq!(result.unmatched, vec![&"大麥克"]);

        Ok(())
    }
}
