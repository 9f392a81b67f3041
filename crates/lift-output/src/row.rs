//! Plain data row types written by output backends.

use lift_sim::{TickSummary, Trip};

/// One delivered passenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRow {
    pub passenger_id: u32,
    pub origin:       u32,
    pub destination:  u32,
    pub car_id:       u16,
    pub spawn_tick:   u64,
    pub board_tick:   u64,
    pub arrive_tick:  u64,
}

impl From<&Trip> for TripRow {
    fn from(trip: &Trip) -> Self {
        Self {
            passenger_id: trip.passenger.0,
            origin:       trip.origin.0,
            destination:  trip.destination.0,
            car_id:       trip.car.0,
            spawn_tick:   trip.spawn_tick.0,
            board_tick:   trip.board_tick.0,
            arrive_tick:  trip.arrive_tick.0,
        }
    }
}

/// Building-wide counters at one snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub waiting:       u64,
    pub riding:        u64,
    pub delivered:     u64,
    pub pending_calls: u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:          s.tick.0,
            waiting:       s.waiting,
            riding:        s.riding,
            delivered:     s.delivered,
            pending_calls: s.pending_calls as u64,
        }
    }
}
