//! Per-car scheduler state and destination-queue management.

use lift_core::{CarId, Direction, Floor, Heading};

/// A hall call this car has taken responsibility for.
///
/// The registry entry was cleared when the claim was made, so no other car
/// will be sent for it.  The claim is released when some car stops at
/// `floor` showing `direction`, or handed back to the registry if this car
/// stops there without showing it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Claim {
    pub floor:     Floor,
    pub direction: Direction,
    /// Waiting groups covered by this claim (always 1 in flag mode).
    pub groups:    u32,
}

/// The scheduler's view of one car.
///
/// # Queue invariant
///
/// `queue` holds no duplicates and is sorted ascending while the heading is
/// `Up`, descending while it is `Down`, and is empty exactly when the heading
/// is `Idle`.  The one permitted exception is an *immediate* stop, which may
/// sit at the front out of order until the car arrives there.
#[derive(Clone, Debug)]
pub struct CarState {
    pub id:        CarId,
    current_floor: Floor,
    top_floor:     Floor,
    queue:         Vec<Floor>,
    heading:       Heading,
    /// Front-of-queue entry inserted by an opportunistic stop.
    immediate:     Option<Floor>,
    load_factor:   f32,
    /// Idle with nothing to do and told to stop; woken by new hall calls.
    parked:        bool,
    claims:        Vec<Claim>,
}

impl CarState {
    /// A car resting at `floor` in a building whose highest floor is `top_floor`.
    pub fn new(id: CarId, floor: Floor, top_floor: Floor) -> Self {
        assert!(floor <= top_floor, "{id} placed at {floor}, above the top floor {top_floor}");
        Self {
            id,
            current_floor: floor,
            top_floor,
            queue:         Vec::new(),
            heading:       Heading::Idle,
            immediate:     None,
            load_factor:   0.0,
            parked:        false,
            claims:        Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    #[inline]
    pub fn queue(&self) -> &[Floor] {
        &self.queue
    }

    #[inline]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[inline]
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    #[inline]
    pub fn immediate(&self) -> Option<Floor> {
        self.immediate
    }

    #[inline]
    pub fn is_parked(&self) -> bool {
        self.parked
    }

    #[inline]
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// `true` when the car has no committed stops.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.heading.is_idle() && self.queue.is_empty()
    }

    // ── Queue operations ──────────────────────────────────────────────────

    /// Commit the car to stopping at `floor`.
    ///
    /// A plain request is a no-op when `floor` is already queued; otherwise
    /// the floor is inserted and the queue re-sorted for the current heading.
    /// An idle car first takes the heading toward `floor`.
    ///
    /// With `immediate`, any existing copy of `floor` is dropped and the floor
    /// is placed at the front regardless of sort order.
    ///
    /// Returns `true` if the queue changed.
    pub fn request_stop(&mut self, floor: Floor, immediate: bool) -> bool {
        assert!(
            floor <= self.top_floor,
            "{} asked to stop at {floor}, above the top floor {}",
            self.id,
            self.top_floor,
        );

        if immediate {
            if self.queue.first() == Some(&floor) {
                self.immediate = Some(floor);
                return false;
            }
            self.queue.retain(|&f| f != floor);
            if self.heading.is_idle() {
                self.heading = self.heading_toward(floor);
            }
            self.queue.insert(0, floor);
            self.immediate = Some(floor);
            self.parked = false;
            return true;
        }

        if self.queue.contains(&floor) {
            return false;
        }
        if self.heading.is_idle() {
            self.heading = self.heading_toward(floor);
        }
        self.queue.push(floor);
        self.sort_queue();
        self.parked = false;
        true
    }

    /// Drop `floor` from the queue after the car has stopped there and
    /// re-derive the heading from the next remaining stop.
    pub fn advance_after_arrival(&mut self, floor: Floor) {
        self.current_floor = floor;
        self.queue.retain(|&f| f != floor);
        if self.immediate == Some(floor) || self.queue.first() != self.immediate.as_ref() {
            self.immediate = None;
        }

        match self.queue.first().copied() {
            None => self.heading = Heading::Idle,
            Some(next) => {
                if self.immediate.is_none() {
                    self.heading = self.heading_toward(next);
                    self.sort_queue();
                }
            }
        }
    }

    /// `true` if the queue satisfies the ordering invariant (ignoring an
    /// out-of-order immediate head).
    pub fn is_queue_ordered(&self) -> bool {
        let rest = match self.immediate {
            Some(f) if self.queue.first() == Some(&f) => &self.queue[1..],
            _ => &self.queue[..],
        };
        let unique = rest.iter().enumerate().all(|(i, f)| !rest[..i].contains(f))
            && !self.immediate.is_some_and(|f| rest.contains(&f));
        let sorted = match self.heading {
            Heading::Up   => rest.windows(2).all(|w| w[0] < w[1]),
            Heading::Down => rest.windows(2).all(|w| w[0] > w[1]),
            Heading::Idle => self.queue.is_empty(),
        };
        unique && sorted
    }

    // ── Crate-internal mutation (dispatcher only) ─────────────────────────

    pub(crate) fn set_position(&mut self, floor: Floor) {
        assert!(floor <= self.top_floor, "{} reported at {floor}, above the top floor", self.id);
        self.current_floor = floor;
    }

    pub(crate) fn set_load_factor(&mut self, load: f32) {
        assert!(
            (0.0..=1.0).contains(&load),
            "{} reported load factor {load}, expected a fraction in [0, 1]",
            self.id,
        );
        self.load_factor = load;
    }

    /// Set the heading of an idle car before its first stop is committed.
    pub(crate) fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    pub(crate) fn park(&mut self) {
        self.heading = Heading::Idle;
        self.parked = true;
    }

    pub(crate) fn add_claim(&mut self, claim: Claim) {
        match self
            .claims
            .iter_mut()
            .find(|c| c.floor == claim.floor && c.direction == claim.direction)
        {
            Some(existing) => existing.groups += claim.groups,
            None => self.claims.push(claim),
        }
    }

    pub(crate) fn claim_mut(&mut self, floor: Floor, dir: Direction) -> Option<&mut Claim> {
        self.claims.iter_mut().find(|c| c.floor == floor && c.direction == dir)
    }

    /// Remove and return this car's claims at `floor`.
    pub(crate) fn take_claims_at(&mut self, floor: Floor) -> Vec<Claim> {
        let (taken, kept): (Vec<Claim>, Vec<Claim>) =
            self.claims.drain(..).partition(|c| c.floor == floor);
        self.claims = kept;
        taken
    }

    /// Remove the claim for (`floor`, `dir`) if this car holds it.
    pub(crate) fn release_claim(&mut self, floor: Floor, dir: Direction) -> Option<Claim> {
        let i = self.claims.iter().position(|c| c.floor == floor && c.direction == dir)?;
        Some(self.claims.remove(i))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Heading for an idle car about to serve `floor`.  A stop at the car's
    /// own floor takes `Up`, except on the top floor.
    fn heading_toward(&self, floor: Floor) -> Heading {
        match Direction::between(self.current_floor, floor) {
            Some(dir) => dir.into(),
            None if self.current_floor == self.top_floor => Heading::Down,
            None => Heading::Up,
        }
    }

    fn sort_queue(&mut self) {
        let start = match self.immediate {
            Some(f) if self.queue.first() == Some(&f) => 1,
            _ => 0,
        };
        let rest = &mut self.queue[start..];
        match self.heading {
            Heading::Up   => rest.sort_unstable(),
            Heading::Down => rest.sort_unstable_by(|a, b| b.cmp(a)),
            Heading::Idle => {}
        }
    }
}
