use std::collections::VecDeque;

use pathtrace_core::{Coord, GridError, GridModel, Recorder, Trace};

use crate::SearchField;

/// Which frontier an expansion belongs to.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Wave {
    Forward,
    Backward,
}

/// A contact edge between the two waves: the cell being expanded, the
/// already-stamped cell of the opposite wave, and the total path length
/// through the edge.
struct Contact {
    total: i32,
    this: usize,
    other: usize,
}

impl SearchField {
    /// Bidirectional breadth-first search.
    ///
    /// Two BFS waves, one rooted at each endpoint, expanded one layer per
    /// round in forward-then-backward order. `VisitStart`/`ExploreStart`
    /// events belong to the forward wave and `VisitEnd`/`ExploreEnd` to the
    /// backward one. The waves meet at the first cell discovered by both;
    /// the final path concatenates the forward partial path with the
    /// reversed backward partial path.
    ///
    /// A contact closes the round rather than the single expansion: the
    /// cheapest contact edge of the whole layer is kept, which is what makes
    /// the reported path length match unidirectional BFS.
    pub fn bidirectional(
        &mut self,
        grid: &GridModel,
        from: Coord,
        to: Coord,
    ) -> Result<Trace, GridError> {
        let (fwd_gen, start_idx, goal_idx) = self.begin_run(grid, from, to)?;
        if from == to {
            return Ok(self.record_trivial(from));
        }
        // Claim a second generation stamp so the two waves can share the
        // node array without clearing it: a cell belongs to whichever wave
        // stamped it first.
        let bwd_gen = fwd_gen.wrapping_add(1);
        self.generation = bwd_gen;

        let mut rec = Recorder::new();

        for (idx, stamp) in [(start_idx, fwd_gen), (goal_idx, bwd_gen)] {
            let n = &mut self.nodes[idx];
            n.g = 0;
            n.parent = usize::MAX;
            n.generation = stamp;
        }
        let mut fq: VecDeque<usize> = VecDeque::from([start_idx]);
        let mut bq: VecDeque<usize> = VecDeque::from([goal_idx]);

        let mut contact: Option<Contact> = None;
        while contact.is_none() && !fq.is_empty() && !bq.is_empty() {
            contact = self.expand_wave(grid, &mut rec, &mut fq, Wave::Forward, fwd_gen, bwd_gen);
            if contact.is_none() {
                contact =
                    self.expand_wave(grid, &mut rec, &mut bq, Wave::Backward, bwd_gen, fwd_gen);
            }
        }

        let Some(contact) = contact else {
            return Ok(rec.finish_not_found());
        };
        let (fwd_cell, bwd_cell) = if self.nodes[contact.this].generation == fwd_gen {
            (contact.this, contact.other)
        } else {
            (contact.other, contact.this)
        };

        // Forward partial path, start → meeting edge.
        let mut chain = Vec::new();
        let mut ci = fwd_cell;
        while ci != usize::MAX {
            chain.push(ci);
            ci = self.nodes[ci].parent;
        }
        for &i in chain.iter().rev() {
            rec.path(grid.coord(i));
        }
        // Backward partial path; its parent pointers already lead to the end.
        let mut ci = bwd_cell;
        while ci != usize::MAX {
            rec.path(grid.coord(ci));
            ci = self.nodes[ci].parent;
        }
        Ok(rec.finish_found())
    }

    /// Expand one full layer of `queue`, stamping discoveries with `my_gen`.
    ///
    /// Returns the cheapest contact edge against `other_gen` cells found
    /// anywhere in the layer, if any.
    fn expand_wave(
        &mut self,
        grid: &GridModel,
        rec: &mut Recorder,
        queue: &mut VecDeque<usize>,
        wave: Wave,
        my_gen: u32,
        other_gen: u32,
    ) -> Option<Contact> {
        let mut best: Option<Contact> = None;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let layer = queue.len();
        for _ in 0..layer {
            let Some(ci) = queue.pop_front() else {
                break;
            };
            let cp = grid.coord(ci);
            match wave {
                Wave::Forward => rec.visit_start(cp),
                Wave::Backward => rec.visit_end(cp),
            }
            let current_depth = self.nodes[ci].g;

            nbuf.clear();
            grid.neighbors4(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = grid.idx(np) else {
                    continue;
                };
                let stamp = self.nodes[ni].generation;
                if stamp == other_gen {
                    let total = current_depth + 1 + self.nodes[ni].g;
                    if best.as_ref().is_none_or(|b| total < b.total) {
                        best = Some(Contact {
                            total,
                            this: ci,
                            other: ni,
                        });
                    }
                    continue;
                }
                if stamp == my_gen {
                    continue;
                }
                let n = &mut self.nodes[ni];
                n.g = current_depth + 1;
                n.parent = ci;
                n.generation = my_gen;
                match wave {
                    Wave::Forward => rec.explore_start(np),
                    Wave::Backward => rec.explore_end(np),
                }
                queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;
        best
    }
}
