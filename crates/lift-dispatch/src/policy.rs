//! Next-floor search for idle cars.
//!
//! # Pluggability
//!
//! The dispatcher calls the search through the [`NextFloorPolicy`] trait, so
//! alternative tie-break orderings can be swapped in without touching the
//! event handlers.  Two policies ship with the crate:
//!
//! | Policy            | Search order                                              |
//! |-------------------|-----------------------------------------------------------|
//! | [`TieredPolicy`]  | up-calls above → down-calls below → remaining up-calls → remaining down-calls |
//! | [`NearestPolicy`] | closest pending call in either direction                  |
//!
//! Within a tier, the call closest to the car wins; equal distance goes to the
//! lower floor.

use lift_core::{Direction, Floor, Heading, PolicyKind};

use crate::FloorRegistry;

/// The outcome of a next-floor search.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Pick {
    /// Floor to travel to.
    pub floor:   Floor,
    /// The hall call at `floor` being claimed.
    pub demand:  Direction,
    /// Heading the car takes (and shows) while travelling there.
    pub heading: Heading,
}

/// Chooses where an idle car at `current` should go next.
///
/// Implementations only read the registry; claiming the picked call is the
/// dispatcher's job.  Returning `None` parks the car.
pub trait NextFloorPolicy {
    fn choose(&self, current: Floor, registry: &FloorRegistry) -> Option<Pick>;
}

impl<P: NextFloorPolicy + ?Sized> NextFloorPolicy for Box<P> {
    fn choose(&self, current: Floor, registry: &FloorRegistry) -> Option<Pick> {
        (**self).choose(current, registry)
    }
}

/// Construct the policy named by `kind`.
pub fn policy_for(kind: PolicyKind) -> Box<dyn NextFloorPolicy> {
    match kind {
        PolicyKind::Tiered  => Box::new(TieredPolicy),
        PolicyKind::Nearest => Box::new(NearestPolicy),
    }
}

// ── TieredPolicy ──────────────────────────────────────────────────────────────

/// Prefers demand that lies ahead in the direction the passengers want to go.
///
/// 1. Up-calls strictly above the car → heading `Up`.
/// 2. Down-calls strictly below the car → heading `Down`.
/// 3. Any other up-call (at or below) → heading `Down`: the car repositions
///    downward first, then serves the up-call.
/// 4. Any other down-call (at or above) → heading `Up`.
pub struct TieredPolicy;

impl NextFloorPolicy for TieredPolicy {
    fn choose(&self, current: Floor, registry: &FloorRegistry) -> Option<Pick> {
        let tiers = [
            (Direction::Up,   Heading::Up,   Some(Direction::Up)),
            (Direction::Down, Heading::Down, Some(Direction::Down)),
            (Direction::Up,   Heading::Down, None),
            (Direction::Down, Heading::Up,   None),
        ];

        tiers.into_iter().find_map(|(demand, heading, ahead)| {
            let floors = registry
                .peek(demand)
                .filter(|&f| ahead.is_none_or(|dir| current.is_ahead(f, dir)));
            nearest(current, floors).map(|floor| Pick { floor, demand, heading })
        })
    }
}

// ── NearestPolicy ─────────────────────────────────────────────────────────────

/// Ignores call direction and goes to the closest pending call.
///
/// Ties at equal distance prefer the lower floor, then the up-call.  The car
/// heads toward the picked floor; a call at the car's own floor takes the
/// call's direction.
pub struct NearestPolicy;

impl NextFloorPolicy for NearestPolicy {
    fn choose(&self, current: Floor, registry: &FloorRegistry) -> Option<Pick> {
        Direction::ALL
            .into_iter()
            .flat_map(|demand| registry.peek(demand).map(move |floor| (floor, demand)))
            .min_by_key(|&(floor, demand)| {
                (floor.distance(current), floor, demand == Direction::Down)
            })
            .map(|(floor, demand)| Pick {
                floor,
                demand,
                heading: Direction::between(current, floor).unwrap_or(demand).into(),
            })
    }
}

/// Closest floor to `current`; lower floor on ties.
fn nearest(current: Floor, floors: impl Iterator<Item = Floor>) -> Option<Floor> {
    floors.min_by_key(|&f| (f.distance(current), f))
}
