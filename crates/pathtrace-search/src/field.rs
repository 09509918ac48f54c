use pathtrace_core::{Coord, Endpoint, GridError, GridModel, Recorder, Trace};

/// Sentinel cost meaning "not yet reached".
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Internal node shared by every search strategy
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            f: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array for use in `BinaryHeap`.
///
/// Ordered so the heap pops the lowest `f` first, ties broken by lower `h`
/// (closer to the goal), then by insertion order (FIFO). The `seq` tie-break
/// is what makes priority frontiers deterministic.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct OpenRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) h: i32,
    pub(crate) seq: u64,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Cost of one step between adjacent cells.
///
/// The grid is uniform-cost; weighted terrain would key this off the
/// destination cell kind.
#[inline]
pub(crate) fn step_cost(_grid: &GridModel, _from: Coord, _to: Coord) -> i32 {
    1
}

// ---------------------------------------------------------------------------
// SearchField
// ---------------------------------------------------------------------------

/// Per-session coordinator for search runs on a grid.
///
/// `SearchField` owns the node array, the generation counter that lazily
/// invalidates it between runs, the FIFO sequence counter for priority
/// tie-breaking, and a scratch neighbour buffer, so repeated runs incur no
/// allocations after warm-up. All seven search strategies are methods on
/// this type, one per module.
///
/// A field never outlives its bookkeeping: counters are instance state, so
/// two fields used side by side produce independent, reproducible traces.
pub struct SearchField {
    pub(crate) rows: i32,
    pub(crate) cols: i32,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) seq: u64,
    pub(crate) nbuf: Vec<Coord>,
}

impl SearchField {
    /// Create a field sized for a `rows` × `cols` grid.
    pub fn new(rows: i32, cols: i32) -> Self {
        let len = (rows.max(0) * cols.max(0)) as usize;
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
            nodes: vec![Node::default(); len],
            generation: 0,
            seq: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Create a field sized for `grid`.
    pub fn for_grid(grid: &GridModel) -> Self {
        Self::new(grid.rows(), grid.cols())
    }

    /// Grid dimensions the field is currently sized for.
    pub fn size(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }

    /// Resize for a different grid shape.
    ///
    /// If the new cell count fits within existing capacity the node array is
    /// kept and stale entries are ignored via the generation counter;
    /// otherwise it is reallocated.
    pub fn resize(&mut self, rows: i32, cols: i32) {
        self.rows = rows.max(0);
        self.cols = cols.max(0);
        let new_len = (self.rows * self.cols) as usize;
        if new_len <= self.nodes.len() {
            self.generation = self.generation.wrapping_add(1);
            return;
        }
        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
    }

    /// Validate the search contract and start a new run.
    ///
    /// Returns `(generation stamp, start index, goal index)` for this run.
    /// Fails fast with [`GridError`] before any event is recorded.
    pub(crate) fn begin_run(
        &mut self,
        grid: &GridModel,
        from: Coord,
        to: Coord,
    ) -> Result<(u32, usize, usize), GridError> {
        check_endpoints(grid, from, to)?;
        let start_idx = grid
            .idx(from)
            .ok_or(GridError::InvalidEndpoint(Endpoint::Start, from))?;
        let goal_idx = grid
            .idx(to)
            .ok_or(GridError::InvalidEndpoint(Endpoint::End, to))?;
        if (self.rows, self.cols) != (grid.rows(), grid.cols()) {
            self.resize(grid.rows(), grid.cols());
        }
        self.generation = self.generation.wrapping_add(1);
        self.seq = 0;
        Ok((self.generation, start_idx, goal_idx))
    }

    /// Next FIFO tie-break sequence number.
    #[inline]
    pub(crate) fn next_seq(&mut self) -> u64 {
        let s = self.seq;
        self.seq += 1;
        s
    }

    /// Record the degenerate single-cell run shared by all strategies.
    pub(crate) fn record_trivial(&self, from: Coord) -> Trace {
        let mut rec = Recorder::new();
        rec.visit(from);
        rec.path(from);
        rec.finish_found()
    }

    /// Walk parent pointers back from `goal_idx` and emit a `Path` event per
    /// cell in start→end order.
    pub(crate) fn emit_path(&self, grid: &GridModel, rec: &mut Recorder, goal_idx: usize) {
        let mut chain = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            chain.push(ci);
            ci = self.nodes[ci].parent;
        }
        for &i in chain.iter().rev() {
            rec.path(grid.coord(i));
        }
    }
}

/// The fail-fast endpoint contract shared by every strategy.
pub(crate) fn check_endpoints(grid: &GridModel, from: Coord, to: Coord) -> Result<(), GridError> {
    if grid.rows() <= 0 || grid.cols() <= 0 {
        return Err(GridError::EmptyGrid);
    }
    if !grid.is_walkable(from) {
        return Err(GridError::InvalidEndpoint(Endpoint::Start, from));
    }
    if !grid.is_walkable(to) {
        return Err(GridError::InvalidEndpoint(Endpoint::End, to));
    }
    Ok(())
}
