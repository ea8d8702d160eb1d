//! Two-level hierarchical A*: an outer search over octants, with a nested
//! point-level search (or straight-line shortcut) realizing each octant hop.
//!
//! The outer search treats an octant connection as tentative until a
//! point-level route into the octant is proven by `can_path`. Candidate
//! predecessor octants accumulate in `prev_octants` and are tried
//! front-first; when none of them works the octant's open mark is rolled
//! back so a different neighbor may reach it later.

use std::collections::BinaryHeap;

use tracing::debug;

use crate::graph::NavGraph;
use crate::search::heap::OpenEntry;
use crate::search::helpers::track_closest;

impl NavGraph {
    /// A* over octants. `begin_index`/`end_index` are point arena indices;
    /// both points must belong to octants (the caller guarantees it) and the
    /// octants must differ.
    pub(crate) fn octants_solve(
        &mut self,
        begin_index: usize,
        end_index: usize,
        relevant_layers: u32,
    ) -> bool {
        self.oct_pass += 1;

        {
            let end = &self.points[end_index];
            if !end.enabled || !end.supports_layers(relevant_layers) {
                return false;
            }
        }

        let (Some(begin_octant), Some(end_octant)) =
            (self.points[begin_index].octant, self.points[end_index].octant)
        else {
            return false;
        };

        debug!(
            from = self.octants[begin_octant].id,
            to = self.octants[end_octant].id,
            "hierarchical solve"
        );

        let mut found_route = false;
        let mut open_list: BinaryHeap<OpenEntry> = BinaryHeap::new();

        let begin_estimate = self.estimate_octant_between(begin_octant, end_octant);
        {
            let octant = &mut self.octants[begin_octant];
            octant.search_point = Some(begin_index);
            octant.g_score = 0.0;
            octant.f_score = begin_estimate;
            octant.prev_octant = None;
            octant.prev_octants.clear();
            octant.open_pass = self.oct_pass;
        }
        open_list.push(OpenEntry::new(begin_octant, 0.0, begin_estimate));

        while let Some(entry) = open_list.pop() {
            let o = entry.index;
            {
                let octant = &self.octants[o];
                if octant.closed_pass == self.oct_pass
                    || octant.open_pass != self.oct_pass
                    || entry.g_score != octant.g_score
                {
                    continue; // superseded snapshot
                }
            }

            let candidates = std::mem::take(&mut self.octants[o].prev_octants);
            if candidates.is_empty() {
                // only the begin octant enters the open list without
                // predecessors
                self.octants[o].closed_pass = self.oct_pass;
            } else {
                // prove a point-level route into this octant, trying the
                // candidate predecessors front-first
                let mut connection: Option<usize> = None;
                let mut valid_prev: Option<usize> = None;

                for prev in candidates {
                    let Some(prev_search_point) = self.octants[prev].search_point else {
                        continue;
                    };
                    let prev_prev_id = self.octants[prev]
                        .prev_octant
                        .map(|index| self.octants[index].id)
                        .unwrap_or(-1);

                    let reach_end = o == end_octant;
                    let target = if reach_end {
                        end_index
                    } else {
                        match self.octants[o].origin {
                            Some(origin) => origin,
                            None => continue,
                        }
                    };

                    debug!(
                        octant = self.octants[o].id,
                        prev = self.octants[prev].id,
                        "can_path attempt"
                    );
                    if let Some(found) = self.can_path(
                        prev_search_point,
                        target,
                        relevant_layers,
                        prev,
                        o,
                        reach_end,
                        prev_prev_id,
                        begin_index,
                        end_index,
                    ) {
                        connection = Some(found);
                        valid_prev = Some(prev);
                        break;
                    }
                }

                match connection {
                    None => {
                        // let a different neighbor re-open this octant later
                        debug!(octant = self.octants[o].id, "no connection, re-opening");
                        self.octants[o].open_pass -= 1;
                        continue;
                    }
                    Some(search_point) => {
                        let octant = &mut self.octants[o];
                        octant.prev_octant = valid_prev;
                        octant.search_point = Some(search_point);
                        octant.closed_pass = self.oct_pass;
                    }
                }
            }

            if o == end_octant {
                found_route = true;
                break;
            }

            let neighbors: Vec<usize> = self.octants[o].neighbors.values().copied().collect();
            for oe in neighbors {
                {
                    let neighbor = &self.octants[oe];
                    if neighbor.closed_pass == self.oct_pass
                        || !neighbor.supports_layers(relevant_layers)
                    {
                        continue;
                    }
                }

                let weight_scale = self.octants[oe].weight_scale;
                let tentative_g =
                    self.octants[o].g_score + self.compute_octant_between(o, oe) * weight_scale;

                let new_octant = self.octants[oe].open_pass != self.oct_pass;
                if !new_octant && tentative_g >= self.octants[oe].g_score {
                    continue;
                }

                let estimate = self.estimate_octant_between(oe, end_octant);
                let neighbor = &mut self.octants[oe];
                if new_octant {
                    neighbor.prev_octants.clear();
                    neighbor.open_pass = self.oct_pass;
                }
                // improving predecessors go to the front of the try order
                neighbor.prev_octants.insert(0, o);
                neighbor.g_score = tentative_g;
                neighbor.f_score = tentative_g + estimate;
                open_list.push(OpenEntry::new(oe, tentative_g, tentative_g + estimate));
            }
        }

        debug!(found_route, "hierarchical solve finished");
        found_route
    }

    /// Try to reach `end_octant` from a point inside `begin_octant`, first
    /// through the registered straight-line hook and then through a bounded
    /// A* restricted to the two octants' points. Returns the arena index of
    /// the reached point, which becomes the target octant's search point.
    ///
    /// With `reach_end_point` the walk must arrive at `end_index` exactly
    /// (used when the target is the final octant); otherwise any point inside
    /// `end_octant` concludes it.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn can_path(
        &mut self,
        begin_index: usize,
        end_index: usize,
        relevant_layers: u32,
        begin_octant: usize,
        end_octant: usize,
        reach_end_point: bool,
        prev_octant_id: i64,
        absolute_begin: usize,
        absolute_end: usize,
    ) -> Option<usize> {
        // a lone member that is disabled or isolated can never be entered
        if self.octants[end_octant].points.len() == 1 {
            let &only = self.octants[end_octant].points.values().next()?;
            let point = &self.points[only];
            if !point.enabled || point.neighbors.is_empty() {
                return None;
            }
        }

        if begin_index == absolute_begin {
            let estimate = self.estimate_between(begin_index, absolute_end);
            let begin = &mut self.points[begin_index];
            begin.abs_g_score = 0.0;
            begin.abs_f_score = estimate;
        }

        let mut found_point = None;
        if self.straight_line.is_some() {
            found_point = self.straight_line_walk(
                begin_index,
                end_index,
                relevant_layers,
                begin_octant,
                end_octant,
                reach_end_point,
                prev_octant_id,
                absolute_end,
            );
        }
        if found_point.is_none() {
            found_point = self.inner_solve(
                begin_index,
                end_index,
                relevant_layers,
                begin_octant,
                end_octant,
                reach_end_point,
                prev_octant_id,
                absolute_end,
            );
        }
        found_point
    }

    /// Walk the id sequence proposed by the straight-line hook, validating
    /// every hop. The walk is abandoned (falling back to the bounded A*) at
    /// the first missing point, untraversable segment, disabled or
    /// layer-incompatible point, or weighted point.
    #[allow(clippy::too_many_arguments)]
    fn straight_line_walk(
        &mut self,
        begin_index: usize,
        end_index: usize,
        relevant_layers: u32,
        begin_octant: usize,
        end_octant: usize,
        reach_end_point: bool,
        prev_octant_id: i64,
        absolute_end: usize,
    ) -> Option<usize> {
        let line = {
            let hook = self.straight_line.as_ref()?;
            hook.line(self.points[begin_index].id, self.points[end_index].id)
        };

        let mut found_point = None;
        let mut prev = begin_index;

        for pair in line.windows(2) {
            let (prev_id, point_id) = (pair[0], pair[1]);
            let Some(&p) = self.point_ids.get(&point_id) else {
                break;
            };
            if !self.segments.connected(prev_id, point_id, false) {
                break;
            }
            {
                let point = &self.points[p];
                if !point.enabled
                    || !point.supports_layers(relevant_layers)
                    || point.weight_scale != 1.0
                {
                    break;
                }
            }

            // absolute bookkeeping feeds the closest-reachable tracker even
            // though the shortcut skips the inner search
            let cost = self.compute_between(p, prev);
            let prev_abs_g = self.points[prev].abs_g_score;
            let estimate = self.estimate_between(p, absolute_end);
            {
                let point = &mut self.points[p];
                point.abs_g_score = prev_abs_g + cost * point.weight_scale;
                point.abs_f_score = estimate;
            }
            track_closest(&mut self.closest_point_of_last_pathing_call, &self.points, p);

            let point_octant = self.points[p].octant;
            if point_octant != Some(begin_octant) {
                let source_key = self.octants[begin_octant].id;
                self.points[p].octant_source_prev_point.insert(source_key, prev);

                if point_octant == Some(end_octant) {
                    if reach_end_point {
                        if p == end_index {
                            found_point = Some(p);
                            break;
                        }
                    } else {
                        found_point = Some(p);
                        break;
                    }
                }
            } else {
                self.points[p]
                    .octant_source_prev_point
                    .insert(prev_octant_id, prev);
            }

            prev = p;
        }

        found_point
    }

    /// Bounded A* between two octants: expansion is restricted to points
    /// owned by either octant. Same relaxation rules as the flat solver, plus
    /// the hierarchical back-pointer bookkeeping.
    #[allow(clippy::too_many_arguments)]
    fn inner_solve(
        &mut self,
        begin_index: usize,
        end_index: usize,
        relevant_layers: u32,
        begin_octant: usize,
        end_octant: usize,
        reach_end_point: bool,
        prev_octant_id: i64,
        absolute_end: usize,
    ) -> Option<usize> {
        self.pass += 1;

        let mut found_point = None;
        let mut open_list: BinaryHeap<OpenEntry> = BinaryHeap::new();

        let begin_estimate = self.estimate_between(begin_index, end_index);
        {
            let begin = &mut self.points[begin_index];
            begin.g_score = 0.0;
            begin.f_score = begin_estimate;
            begin.open_pass = self.pass;
        }
        open_list.push(OpenEntry::new(begin_index, 0.0, begin_estimate));

        while let Some(entry) = open_list.pop() {
            let p = entry.index;
            {
                let point = &self.points[p];
                if point.closed_pass == self.pass
                    || point.open_pass != self.pass
                    || entry.g_score != point.g_score
                {
                    continue;
                }
            }

            track_closest(&mut self.closest_point_of_last_pathing_call, &self.points, p);

            if self.points[p].octant == Some(end_octant) {
                if reach_end_point {
                    if p == end_index {
                        found_point = Some(p);
                        break;
                    }
                } else {
                    found_point = Some(p);
                    break;
                }
            }

            self.points[p].closed_pass = self.pass;

            let neighbors: Vec<usize> = self.points[p].neighbors.values().copied().collect();
            for e in neighbors {
                {
                    let neighbor = &self.points[e];
                    if !neighbor.enabled
                        || neighbor.closed_pass == self.pass
                        || !neighbor.supports_layers(relevant_layers)
                    {
                        continue;
                    }
                    // stay inside the two octants of this hop
                    if neighbor.octant != Some(begin_octant)
                        && neighbor.octant != Some(end_octant)
                    {
                        continue;
                    }
                }

                let weight_scale = self.points[e].weight_scale;
                let cost = self.compute_between(p, e);
                let tentative_g = self.points[p].g_score + cost * weight_scale;

                if self.points[e].open_pass == self.pass && tentative_g >= self.points[e].g_score {
                    continue;
                }

                let source_key = if self.points[e].octant == Some(end_octant) {
                    self.octants[begin_octant].id
                } else {
                    prev_octant_id
                };
                let estimate = self.estimate_between(e, end_index);
                let absolute_estimate = self.estimate_between(p, absolute_end);
                let p_abs_g = self.points[p].abs_g_score;

                let neighbor = &mut self.points[e];
                neighbor.octant_source_prev_point.insert(source_key, p);
                neighbor.prev_point = Some(p);
                neighbor.g_score = tentative_g;
                neighbor.f_score = tentative_g + estimate;
                neighbor.abs_g_score = p_abs_g + cost * weight_scale;
                neighbor.abs_f_score = absolute_estimate;
                neighbor.open_pass = self.pass;
                open_list.push(OpenEntry::new(e, tentative_g, tentative_g + estimate));
            }
        }

        if let Some(found) = found_point {
            debug!(
                point = self.points[found].id,
                end_octant = self.octants[end_octant].id,
                "inner search reached target octant"
            );
        } else {
            debug!(
                end_octant = self.octants[end_octant].id,
                "inner search found no way into target octant"
            );
        }
        found_point
    }
}
