//! `FloorRegistry` — unserved hall-call demand.
//!
//! Two dense per-floor vectors (`up`, `down`) hold a demand count for every
//! floor.  Entries are allocated once and never removed; a floor with no
//! demand simply holds zero.  In [`DemandMode::Flag`] the count is 0 or 1.
//!
//! All mutation goes through [`add`](FloorRegistry::add),
//! [`clear`](FloorRegistry::clear) and [`restore`](FloorRegistry::restore) so
//! the flag/count semantics are enforced in one place.

use lift_core::{DemandMode, Direction, Floor};

#[derive(Clone, Debug)]
pub struct FloorRegistry {
    up:   Vec<u32>,
    down: Vec<u32>,
    mode: DemandMode,
}

impl FloorRegistry {
    /// An empty registry for a `floor_count`-floor building.
    pub fn new(floor_count: u32, mode: DemandMode) -> Self {
        Self {
            up:   vec![0; floor_count as usize],
            down: vec![0; floor_count as usize],
            mode,
        }
    }

    pub fn floor_count(&self) -> u32 {
        self.up.len() as u32
    }

    pub fn mode(&self) -> DemandMode {
        self.mode
    }

    /// Record unserved demand at `floor` in `dir`.
    ///
    /// Idempotent in flag mode; increments the waiting-group count in
    /// counted mode.
    pub fn add(&mut self, floor: Floor, dir: Direction) {
        let mode = self.mode;
        let slot = self.slot_mut(floor, dir);
        match mode {
            DemandMode::Flag    => *slot = 1,
            DemandMode::Counted => *slot += 1,
        }
    }

    /// Remove all demand at `floor` in `dir`, returning what was pending.
    pub fn clear(&mut self, floor: Floor, dir: Direction) -> u32 {
        std::mem::take(self.slot_mut(floor, dir))
    }

    /// Put back `groups` previously cleared by [`clear`](Self::clear).
    pub fn restore(&mut self, floor: Floor, dir: Direction, groups: u32) {
        if groups == 0 {
            return;
        }
        let mode = self.mode;
        let slot = self.slot_mut(floor, dir);
        match mode {
            DemandMode::Flag    => *slot = 1,
            DemandMode::Counted => *slot += groups,
        }
    }

    #[inline]
    pub fn is_pending(&self, floor: Floor, dir: Direction) -> bool {
        self.count(floor, dir) > 0
    }

    #[inline]
    pub fn count(&self, floor: Floor, dir: Direction) -> u32 {
        self.column(dir)[self.check(floor)]
    }

    /// Floors with pending demand in `dir`, in ascending order.
    pub fn peek(&self, dir: Direction) -> impl Iterator<Item = Floor> + '_ {
        self.column(dir)
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(i, _)| Floor(i as u32))
    }

    /// Number of pending (floor, direction) entries.
    pub fn pending_len(&self) -> usize {
        self.up.iter().chain(&self.down).filter(|&&n| n > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.pending_len() == 0
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn column(&self, dir: Direction) -> &[u32] {
        match dir {
            Direction::Up   => &self.up,
            Direction::Down => &self.down,
        }
    }

    fn slot_mut(&mut self, floor: Floor, dir: Direction) -> &mut u32 {
        let i = self.check(floor);
        match dir {
            Direction::Up   => &mut self.up[i],
            Direction::Down => &mut self.down[i],
        }
    }

    fn check(&self, floor: Floor) -> usize {
        assert!(
            floor.0 < self.floor_count(),
            "{floor} is outside a {}-floor building",
            self.floor_count(),
        );
        floor.index()
    }
}
