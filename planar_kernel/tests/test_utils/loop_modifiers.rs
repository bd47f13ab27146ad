#![allow(dead_code)]

use planar_kernel::stroke::{Loop, Stroke};

/// Cycles the segments forward by `n` so the loop starts at segment `n`.
pub fn cycle_start_forward(input: &Loop<f64>, n: usize) -> Loop<f64> {
    let segments = input.segments();
    assert!(n > 0, "cycling forward by 0 just returns the same loop");
    assert!(
        n < segments.len(),
        "cycling forward by more than the segment count is unnecessary"
    );
    Loop::new_unchecked(
        segments
            .iter()
            .cycle()
            .skip(n)
            .take(segments.len())
            .copied()
            .collect(),
    )
}

#[derive(Debug, Clone, Copy)]
pub struct ModifiedLoopState {
    pub inverted_direction: bool,
    pub cycle_position: usize,
}

impl ModifiedLoopState {
    pub fn new(inverted_direction: bool, cycle_position: usize) -> Self {
        Self {
            inverted_direction,
            cycle_position,
        }
    }
}

/// Every start segment and direction variant of a loop, for checking results do not depend on
/// how the input loop is traced.
#[derive(Debug, Clone)]
pub struct ModifiedLoopSet<'a> {
    pub input: &'a Loop<f64>,
    pub invert_direction: bool,
    pub cycle_start: bool,
}

impl<'a> ModifiedLoopSet<'a> {
    pub fn new(input: &'a Loop<f64>, invert_direction: bool, cycle_start: bool) -> Self {
        Self {
            input,
            invert_direction,
            cycle_start,
        }
    }

    pub fn accept_closure<F>(&self, visitor: &mut F)
    where
        F: FnMut(Loop<f64>, ModifiedLoopState),
    {
        visitor(self.input.clone(), ModifiedLoopState::new(false, 0));
        let inverted = self.input.reverse();
        if self.invert_direction {
            visitor(inverted.clone(), ModifiedLoopState::new(true, 0));
        }

        if self.cycle_start {
            for i in 1..self.input.segments().len() {
                visitor(
                    cycle_start_forward(self.input, i),
                    ModifiedLoopState::new(false, i),
                );
            }

            if self.invert_direction {
                for i in 1..inverted.segments().len() {
                    visitor(
                        cycle_start_forward(&inverted, i),
                        ModifiedLoopState::new(true, i),
                    );
                }
            }
        }
    }
}
