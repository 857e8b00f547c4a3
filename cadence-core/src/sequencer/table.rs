//! Ordered phase tables
//!
//! A routine's timeline is a table of phases with strictly ascending
//! inclusive upper bounds, closed by exactly one open-ended terminal phase.
//! Lookup is first-match-ascending, which makes the tick-to-phase mapping
//! total and free of overlaps for any table that passes [`PhaseTable::validate`].

use super::actuation::Subsystems;
use super::phase::{Phase, PhaseBound};
use crate::traits::{Drive, Feeder, Infrastructure, Shooter};

/// Errors detected when validating a phase table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Table has no phases
    Empty,
    /// First phase ends before tick 1 and can never run
    ZeroBound,
    /// Phase bound does not exceed the previous bound
    NotAscending {
        /// Index of the offending phase
        index: usize,
    },
    /// Last phase is bounded, so late ticks map to nothing
    MissingTerminal,
    /// Terminal phase appears before the end of the table
    TerminalNotLast {
        /// Index of the misplaced terminal phase
        index: usize,
    },
}

/// Ordered, first-match phase table
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseTable {
    phases: &'static [Phase],
}

impl PhaseTable {
    /// Wrap a static phase list
    pub const fn new(phases: &'static [Phase]) -> Self {
        Self { phases }
    }

    /// All phases, in ascending order
    pub const fn phases(&self) -> &'static [Phase] {
        self.phases
    }

    /// Number of phases, including the terminal phase
    pub const fn len(&self) -> usize {
        self.phases.len()
    }

    /// Check if the table has no phases
    pub const fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Index of the phase active at `tick`
    pub fn index_for(&self, tick: u32) -> Option<usize> {
        self.phases.iter().position(|phase| phase.bound.covers(tick))
    }

    /// Phase active at `tick`
    pub fn phase_for(&self, tick: u32) -> Option<&'static Phase> {
        let phases = self.phases;
        self.index_for(tick).map(|index| &phases[index])
    }

    /// Tick range of the phase at `index`
    ///
    /// Returns `(first, last)` where `last` is `None` for the terminal phase.
    pub fn range_of(&self, index: usize) -> Option<(u32, Option<u32>)> {
        let phase = self.phases.get(index)?;
        let first = match index {
            0 => 1,
            _ => self.phases[index - 1]
                .bound
                .last_tick()
                .map_or(u32::MAX, |last| last.saturating_add(1)),
        };
        Some((first, phase.bound.last_tick()))
    }

    /// Largest finite bound in the table
    pub fn max_bound(&self) -> u32 {
        self.phases
            .iter()
            .filter_map(|phase| phase.bound.last_tick())
            .max()
            .unwrap_or(0)
    }

    /// Scheduled time until the terminal phase at the given tick interval
    pub fn nominal_duration_ms(&self, tick_interval_ms: u32) -> u32 {
        self.max_bound().saturating_mul(tick_interval_ms)
    }

    /// Check ordering and termination
    pub fn validate(&self) -> Result<(), TableError> {
        let last_index = match self.phases.len() {
            0 => return Err(TableError::Empty),
            len => len - 1,
        };

        let mut previous: Option<u32> = None;
        for (index, phase) in self.phases.iter().enumerate() {
            match phase.bound {
                PhaseBound::Terminal if index != last_index => {
                    return Err(TableError::TerminalNotLast { index });
                }
                PhaseBound::Terminal => {}
                PhaseBound::Through(_) if index == last_index => {
                    return Err(TableError::MissingTerminal);
                }
                PhaseBound::Through(last) => {
                    let minimum = match previous {
                        None => 1,
                        Some(prev) => prev
                            .checked_add(1)
                            .ok_or(TableError::NotAscending { index })?,
                    };
                    if last < minimum {
                        return Err(match previous {
                            None => TableError::ZeroBound,
                            Some(_) => TableError::NotAscending { index },
                        });
                    }
                    previous = Some(last);
                }
            }
        }

        Ok(())
    }

    /// Run the phase active at `tick`
    ///
    /// Issues the phase's actuations in order, then its status signal.
    /// Returns `true` once the terminal phase is reached. A tick that maps to
    /// no phase (only possible for an invalid table) is treated as terminal.
    pub fn run<D, F, S, I>(&self, tick: u32, subsystems: &mut Subsystems<D, F, S, I>) -> bool
    where
        D: Drive,
        F: Feeder,
        S: Shooter,
        I: Infrastructure,
    {
        let Some(phase) = self.phase_for(tick) else {
            return true;
        };

        let feedback = subsystems.apply_all(phase.actions);
        if let Some(signal) = phase.signal.resolve(feedback) {
            subsystems.signal(signal);
        }

        phase.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use std::boxed::Box;
    use std::vec::Vec;

    use proptest::prelude::*;

    use super::*;
    use crate::sequencer::{Actuation, PhaseSignal};
    use crate::status::StatusSignal;
    use crate::testing::{Bench, Record};

    const HOLD: Phase = Phase::through("hold", 3, &[Actuation::DRIVE_STOP], PhaseSignal::Silent);
    const FIRE: Phase = Phase::through(
        "fire",
        6,
        &[Actuation::Fire],
        PhaseSignal::Fixed(StatusSignal::new(84)),
    );
    const DONE: Phase = Phase::terminal("done");

    const SAMPLE: PhaseTable = PhaseTable::new(&[HOLD, FIRE, DONE]);

    fn leak_table(bounds: &[u32]) -> PhaseTable {
        let mut phases: Vec<Phase> = bounds
            .iter()
            .map(|&last| Phase::through("step", last, &[], PhaseSignal::Silent))
            .collect();
        phases.push(Phase::terminal("done"));
        PhaseTable::new(Box::leak(phases.into_boxed_slice()))
    }

    #[test]
    fn test_first_match_lookup() {
        assert_eq!(SAMPLE.index_for(1), Some(0));
        assert_eq!(SAMPLE.index_for(3), Some(0));
        assert_eq!(SAMPLE.index_for(4), Some(1));
        assert_eq!(SAMPLE.index_for(6), Some(1));
        assert_eq!(SAMPLE.index_for(7), Some(2));
        assert_eq!(SAMPLE.phase_for(1_000).map(|p| p.label), Some("done"));
    }

    #[test]
    fn test_ranges_and_bounds() {
        assert_eq!(SAMPLE.range_of(0), Some((1, Some(3))));
        assert_eq!(SAMPLE.range_of(1), Some((4, Some(6))));
        assert_eq!(SAMPLE.range_of(2), Some((7, None)));
        assert_eq!(SAMPLE.range_of(3), None);
        assert_eq!(SAMPLE.max_bound(), 6);
        assert_eq!(SAMPLE.nominal_duration_ms(100), 600);
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert_eq!(SAMPLE.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_malformed_tables() {
        assert_eq!(PhaseTable::new(&[]).validate(), Err(TableError::Empty));
        assert_eq!(
            PhaseTable::new(&[HOLD, FIRE]).validate(),
            Err(TableError::MissingTerminal)
        );
        assert_eq!(
            PhaseTable::new(&[HOLD, DONE, FIRE]).validate(),
            Err(TableError::TerminalNotLast { index: 1 })
        );
        assert_eq!(
            PhaseTable::new(&[FIRE, HOLD, DONE]).validate(),
            Err(TableError::NotAscending { index: 1 })
        );
        assert_eq!(
            PhaseTable::new(&[HOLD, HOLD, DONE]).validate(),
            Err(TableError::NotAscending { index: 1 })
        );

        const NEVER: Phase = Phase::through("never", 0, &[], PhaseSignal::Silent);
        assert_eq!(
            PhaseTable::new(&[NEVER, DONE]).validate(),
            Err(TableError::ZeroBound)
        );
    }

    #[test]
    fn test_run_issues_actions_then_signal() {
        let bench = Bench::new();
        let mut subsystems = bench.subsystems();

        assert!(!SAMPLE.run(5, &mut subsystems));
        assert_eq!(
            bench.take().as_slice(),
            &[
                Record::Act(Actuation::Fire),
                Record::Status(StatusSignal::new(84)),
            ]
        );

        assert!(SAMPLE.run(7, &mut subsystems));
        assert!(bench.take().is_empty());
    }

    #[test]
    fn test_invalid_table_treats_gap_as_terminal() {
        let bench = Bench::new();
        let mut subsystems = bench.subsystems();
        let truncated = PhaseTable::new(&[HOLD]);

        assert!(!truncated.run(2, &mut subsystems));
        assert!(truncated.run(4, &mut subsystems));
    }

    proptest! {
        #[test]
        fn prop_ascending_tables_are_total_and_disjoint(
            bounds in proptest::collection::btree_set(1u32..400, 1..12)
        ) {
            let bounds: Vec<u32> = bounds.into_iter().collect();
            let table = leak_table(&bounds);
            prop_assert_eq!(table.validate(), Ok(()));

            let mut previous_index = 0;
            for tick in 1..=table.max_bound() + 1 {
                let matching = (0..table.len())
                    .filter(|&index| {
                        let (first, last) = table.range_of(index).unwrap();
                        tick >= first && last.map_or(true, |last| tick <= last)
                    })
                    .count();
                prop_assert_eq!(matching, 1, "tick {} matched {} phases", tick, matching);

                let index = table.index_for(tick).unwrap();
                prop_assert!(index >= previous_index);
                previous_index = index;
            }

            prop_assert!(table.phase_for(table.max_bound() + 1).unwrap().is_terminal());
        }

        #[test]
        fn prop_unsorted_bounds_are_rejected(
            first in 2u32..400,
            second in 1u32..400,
        ) {
            prop_assume!(second <= first);
            let table = leak_table(&[first, second]);
            prop_assert_eq!(table.validate(), Err(TableError::NotAscending { index: 1 }));
        }
    }
}
