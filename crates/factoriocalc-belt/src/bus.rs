//! The bus scheduler, grounded on the original `BeltManager`:
//! a greedy placer that slots steps onto a shared bus of parallel lines,
//! widening or compacting the bus as needed.

use crate::error::BusError;
use factoriocalc_calc::{Process, Step};
use factoriocalc_core::capacity::line_limit;
use factoriocalc_core::rational::rat;
use factoriocalc_core::{BeltType, Item, Rat};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// One line on the bus: an item flowing at up to `throughput` more, on top
/// of whatever is already spoken for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub item: Item,
    pub throughput: Rat,
}

/// A single step placed onto the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Bus state immediately before this placement.
    pub bus: Vec<Option<Line>>,
    pub width: usize,
    pub process: Process,
    /// bus line number -> (input y slot, whether this step drains the
    /// line completely). An exhausted line carries no further throughput
    /// and the bus loses it.
    pub inputs: BTreeMap<usize, (usize, bool)>,
    /// bus line number -> (item, output y slot).
    pub outputs: BTreeMap<usize, (Item, usize)>,
}

/// A bus-rewriting event that frees up room without placing a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compaction {
    pub bus: Vec<Option<Line>>,
    pub width: usize,
    /// `(dest, source)` pairs, merged with preference to `dest`.
    pub compactions: Vec<(usize, usize)>,
    /// `(from, to)` pairs, moving a line without merging it.
    pub shifts: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Placement(Placement),
    Compaction(Compaction),
}

fn inout_order(item: &Item, throughput: Rat) -> (u8, Reverse<Rat>, Item) {
    (if item.is_liquid() { 0 } else { 1 }, Reverse(throughput), item.clone())
}

/// Greedily schedules a pool of belt-capacity-limited steps onto a shared
/// bus.
pub struct BeltManager {
    pending: Vec<Step>,
    bus: Vec<Option<Line>>,
    output: Vec<BusEvent>,
    belt_type: BeltType,
}

impl BeltManager {
    /// `raw_steps` seed the initial bus state, in the order given;
    /// `pooled_steps` are the steps to be scheduled.
    pub fn new(raw_steps: Vec<Step>, pooled_steps: Vec<Step>, belt_type: BeltType) -> Self {
        let bus = raw_steps
            .iter()
            .map(|s| {
                Some(Line {
                    item: s.process.item.clone(),
                    throughput: s.process.throughput,
                })
            })
            .collect();
        BeltManager {
            pending: pooled_steps,
            bus,
            output: Vec::new(),
            belt_type,
        }
    }

    pub fn into_output(self) -> Vec<BusEvent> {
        self.output
    }

    pub fn bus(&self) -> &[Option<Line>] {
        &self.bus
    }

    /// Sequence every pending step.
    pub fn run(&mut self) -> Result<(), BusError> {
        while !self.pending.is_empty() {
            self.do_one()?;
        }
        Ok(())
    }

    fn do_one(&mut self) -> Result<(), BusError> {
        let candidates = self.find_candidates();
        if let Some(index) = self.pick_candidate(&candidates) {
            let step = self.pending.remove(index);
            self.add_step(step);
        } else {
            self.compact()?;
        }
        Ok(())
    }

    /// Indices into `pending` of steps whose every input is satisfiable
    /// right now.
    fn find_candidates(&self) -> Vec<usize> {
        let mut results = Vec::new();
        'outer: for (idx, step) in self.pending.iter().enumerate() {
            for (input, throughput) in step.inputs() {
                if self.find_lines(&input, throughput).is_empty() {
                    continue 'outer;
                }
            }
            results.push(idx);
        }
        results
    }

    /// Pick the best candidate index to do next.
    fn pick_candidate(&self, candidates: &[usize]) -> Option<usize> {
        candidates.first().copied()
    }

    fn add_step(&mut self, step: Step) {
        tracing::debug!(item = %step.process.item, throughput = %step.process.throughput, "placing step");
        let prev_bus = self.bus.clone();

        let inputs_map = step.inputs();
        let outputs_map = step.outputs();

        // Avoid y_slot 0 unless we truly need all 7 slots: the bus-line
        // pumps encroach on it.
        let total_slots = inputs_map.len() + outputs_map.len();
        let y_slots: Vec<usize> = if total_slots <= 6 { (1..7).collect() } else { (0..7).collect() };

        let mut inputs_in_order: Vec<(Item, Rat)> = inputs_map.into_iter().collect();
        inputs_in_order.sort_by_key(|(item, throughput)| inout_order(item, *throughput));

        let mut inputs = BTreeMap::new();
        for (y_slot, (item, throughput)) in y_slots.iter().zip(inputs_in_order.iter()) {
            let lines = self.find_lines(item, *throughput);
            let (line_num, _) = lines
                .into_iter()
                .min_by_key(|(i, line)| (line.throughput, Reverse(*i)))
                .expect("find_candidates guaranteed a feasible line");
            self.line_take(line_num, *throughput).expect("capacity already checked");
            let exhausted = self.bus[line_num].is_none();
            inputs.insert(line_num, (*y_slot, exhausted));
        }

        let mut outputs_in_order: Vec<(Item, Rat)> = outputs_map.into_iter().collect();
        outputs_in_order.sort_by_key(|(item, throughput)| inout_order(item, *throughput));

        let mut outputs = BTreeMap::new();
        for (y_slot, (item, throughput)) in y_slots.iter().rev().zip(outputs_in_order.iter()) {
            let line_num = self.add_line(item.clone(), *throughput);
            outputs.insert(line_num, (item.clone(), *y_slot));
        }

        let width = self.bus.len().max(prev_bus.len());
        self.output.push(BusEvent::Placement(Placement {
            bus: prev_bus,
            width,
            process: step.process,
            inputs,
            outputs,
        }));
    }

    /// Apply the best compaction available, possibly with shifts. Errors if
    /// no compaction is possible -- the bus is stuck.
    fn compact(&mut self) -> Result<(), BusError> {
        let prev_bus = self.bus.clone();
        let mut compactions = Vec::new();
        let mut shifts = Vec::new();

        let mut position = self.bus.len().saturating_sub(1);
        while position > 0 {
            let source = match &self.bus[position] {
                Some(line) => line.clone(),
                None => {
                    position -= 1;
                    continue;
                }
            };

            let limit_fn = |item: &Item| line_limit(item, self.belt_type);
            let candidates: Vec<(usize, Line)> = self.bus[..position]
                .iter()
                .enumerate()
                .filter_map(|(i, line)| {
                    line.clone().filter(|l| l.item == source.item && l.throughput < limit_fn(&l.item))
                        .map(|l| (i, l))
                })
                .collect();

            if !candidates.is_empty() {
                let (dest_pos, dest) = candidates
                    .into_iter()
                    .min_by_key(|(i, line)| (line.throughput, Reverse(*i)))
                    .expect("checked non-empty");
                let limit = line_limit(&dest.item, self.belt_type);
                if dest.throughput + source.throughput > limit {
                    let new_source = Line {
                        item: source.item.clone(),
                        throughput: dest.throughput + source.throughput - limit,
                    };
                    let new_dest = Line { item: dest.item.clone(), throughput: limit };
                    self.bus[position] = Some(new_source);
                    self.bus[dest_pos] = Some(new_dest);
                } else {
                    let new_dest = Line {
                        item: dest.item.clone(),
                        throughput: dest.throughput + source.throughput,
                    };
                    self.bus[dest_pos] = Some(new_dest);
                    self.line_take(position, source.throughput)?;
                }
                compactions.push((dest_pos, position));
                position = dest_pos.saturating_sub(1);
                if dest_pos == 0 {
                    break;
                }
                continue;
            }

            let mut shift_to = position;
            while shift_to > 0 && self.bus[shift_to - 1].is_none() {
                shift_to -= 1;
            }
            if shift_to != position {
                self.bus[shift_to] = self.bus[position].take();
                // self.bus[position] is now None; no throughput to give back,
                // just drop the trailing None per line_take's shrink rule.
                while self.bus.last().map(Option::is_none).unwrap_or(false) {
                    self.bus.pop();
                }
                shifts.push((position, shift_to));
                if shift_to == 0 {
                    break;
                }
                position = shift_to - 1;
                continue;
            }

            if position == 0 {
                break;
            }
            position -= 1;
        }

        if compactions.is_empty() {
            return Err(BusError::Stuck { pending_count: self.pending.len() });
        }

        self.output.push(BusEvent::Compaction(Compaction {
            width: prev_bus.len(),
            bus: prev_bus,
            compactions,
            shifts,
        }));
        Ok(())
    }

    /// Lines carrying `item` with at least `throughput` of spare capacity.
    fn find_lines(&self, item: &Item, throughput: Rat) -> Vec<(usize, Line)> {
        self.bus
            .iter()
            .enumerate()
            .filter_map(|(i, line)| line.clone().filter(|l| &l.item == item && l.throughput >= throughput).map(|l| (i, l)))
            .collect()
    }

    /// Remove `throughput` from line `num`'s spare capacity, freeing the
    /// slot (and trimming trailing empty slots) if it hits zero.
    fn line_take(&mut self, num: usize, throughput: Rat) -> Result<(), BusError> {
        let line = self.bus[num].clone().ok_or(BusError::EmptyLine { line: num })?;
        if throughput > line.throughput {
            return Err(BusError::Overdrawn {
                line: num,
                available: line.throughput.to_string(),
                amount: throughput.to_string(),
            });
        }
        let remaining = line.throughput - throughput;
        self.bus[num] = if remaining == rat(0) { None } else { Some(Line { throughput: remaining, ..line }) };
        while self.bus.last().map(Option::is_none).unwrap_or(false) {
            self.bus.pop();
        }
        Ok(())
    }

    /// Allocate a new line, reusing the leftmost empty slot if one exists.
    fn add_line(&mut self, item: Item, throughput: Rat) -> usize {
        let index = match self.bus.iter().position(Option::is_none) {
            Some(i) => i,
            None => {
                self.bus.push(None);
                self.bus.len() - 1
            }
        };
        self.bus[index] = Some(Line { item, throughput });
        index
    }
}
