//! Classical A* over the flat point graph.

use std::collections::BinaryHeap;

use crate::graph::NavGraph;
use crate::search::heap::OpenEntry;
use crate::search::helpers::track_closest;

impl NavGraph {
    /// A* from `begin` to `end`, leaving `prev_point` back-pointers on the
    /// visited points for reconstruction. Returns whether a route was found.
    ///
    /// Open/closed membership is marked by stamping the current pass counter
    /// into each touched point, so no per-solve reset of the graph is needed.
    pub(crate) fn flat_solve(
        &mut self,
        begin_index: usize,
        end_index: usize,
        relevant_layers: u32,
    ) -> bool {
        self.pass += 1;

        {
            let end = &self.points[end_index];
            if !end.enabled || !end.supports_layers(relevant_layers) {
                return false;
            }
        }

        let mut found_route = false;
        let mut open_list: BinaryHeap<OpenEntry> = BinaryHeap::new();

        let begin_estimate = self.estimate_between(begin_index, end_index);
        {
            let begin = &mut self.points[begin_index];
            begin.g_score = 0.0;
            begin.f_score = begin_estimate;
            begin.abs_g_score = 0.0;
            begin.abs_f_score = begin_estimate;
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
                    continue; // superseded snapshot
                }
            }

            track_closest(&mut self.closest_point_of_last_pathing_call, &self.points, p);

            if p == end_index {
                found_route = true;
                break;
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
                }

                let weight_scale = self.points[e].weight_scale;
                let tentative_g =
                    self.points[p].g_score + self.compute_between(p, e) * weight_scale;

                if self.points[e].open_pass == self.pass && tentative_g >= self.points[e].g_score {
                    continue; // the new path is worse than the known one
                }

                let estimate = self.estimate_between(e, end_index);
                let neighbor = &mut self.points[e];
                neighbor.prev_point = Some(p);
                neighbor.g_score = tentative_g;
                neighbor.f_score = tentative_g + estimate;
                neighbor.abs_g_score = tentative_g;
                neighbor.abs_f_score = estimate;
                neighbor.open_pass = self.pass;
                open_list.push(OpenEntry::new(e, tentative_g, tentative_g + estimate));
            }
        }

        found_route
    }
}
