// Booking selection for a single hotel page
// Owns the room / date range / guest count choice and derives the price quote from it

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::{Hotel, HotelId, Room, RoomId};
use crate::config::BookingConfig;

// Why a selection cannot be handed to the reservation service yet
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    #[error("No room selected")]
    NoRoom,

    #[error("Room {0} is not available")]
    RoomUnavailable(RoomId),

    #[error("No check-in date selected")]
    NoCheckIn,

    #[error("No check-out date selected")]
    NoCheckOut,

    #[error("Check-out must be after check-in")]
    EmptyStay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeState {
    Empty,
    Partial,
    Complete,
}

/// Check-in / check-out pair driven by the date picker.
///
/// Ranges produced by [`DateRange::select`] always satisfy
/// `check_out > check_in` when both are set. The fields stay public so a
/// caller can build any pair directly; [`DateRange::nights`] treats a
/// degenerate pair as zero nights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    // A check-out without a check-in is not reachable by picking, so it reads as empty
    pub fn state(&self) -> RangeState {
        match (self.check_in, self.check_out) {
            (Some(_), Some(_)) => RangeState::Complete,
            (Some(_), None) => RangeState::Partial,
            (None, _) => RangeState::Empty,
        }
    }

    /// Feed one picked date into the range.
    ///
    /// A date later than a pending check-in completes the range. Anything
    /// else (first pick, a date on or before the pending check-in, or any
    /// pick on a completed range) restarts the range from that date.
    pub fn select(self, date: NaiveDate) -> Self {
        match (self.check_in, self.check_out) {
            (Some(check_in), None) if date > check_in => Self {
                check_in: Some(check_in),
                check_out: Some(date),
            },
            _ => Self {
                check_in: Some(date),
                check_out: None,
            },
        }
    }

    pub fn nights(&self) -> i64 {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) if check_out > check_in => {
                (check_out - check_in).num_days().max(1)
            }
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub nights: i64,
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub room: Option<Room>,
    pub dates: DateRange,
    pub guest_count: u8,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            room: None,
            dates: DateRange::default(),
            guest_count: 1,
        }
    }
}

impl Selection {
    pub fn select_date(mut self, date: NaiveDate) -> Self {
        self.dates = self.dates.select(date);
        self
    }

    // Sold-out rooms leave the selection untouched
    pub fn select_room(mut self, room: &Room) -> Self {
        if room.available {
            self.room = Some(room.clone());
        } else {
            debug!("Ignoring unavailable room {}", room.id);
        }
        self
    }

    pub fn set_guest_count(mut self, requested: i64, bounds: &BookingConfig) -> Self {
        let (min, max) = bounds.guest_range();
        let clamped = requested.max(i64::from(min)).min(i64::from(max));
        if clamped != requested {
            debug!("Clamped guest count {} to {}", requested, clamped);
        }
        self.guest_count = clamped as u8;
        self
    }

    pub fn quote(&self) -> Quote {
        compute_quote(self)
    }

    pub fn is_ready_to_book(&self) -> bool {
        is_ready_to_book(self)
    }

    pub fn submit(&self, hotel_id: HotelId) -> Result<BookingRequest, Rejected> {
        submit(self, hotel_id)
    }
}

pub fn compute_quote(selection: &Selection) -> Quote {
    let nights = selection.dates.nights();
    let total_price = match &selection.room {
        Some(room) if nights > 0 => room.price_per_night * nights as f64,
        _ => 0.0,
    };
    Quote {
        nights,
        total_price,
    }
}

pub fn is_ready_to_book(selection: &Selection) -> bool {
    selection.room.is_some()
        && selection.dates.check_in.is_some()
        && selection.dates.check_out.is_some()
}

// Assembles the hand-off payload; does not contact any service
pub fn submit(selection: &Selection, hotel_id: HotelId) -> Result<BookingRequest, Rejected> {
    let room = selection.room.as_ref().ok_or(Rejected::NoRoom)?;
    if !room.available {
        return Err(Rejected::RoomUnavailable(room.id));
    }
    let check_in = selection.dates.check_in.ok_or(Rejected::NoCheckIn)?;
    let check_out = selection.dates.check_out.ok_or(Rejected::NoCheckOut)?;

    let quote = compute_quote(selection);
    if quote.nights == 0 {
        return Err(Rejected::EmptyStay);
    }

    Ok(BookingRequest {
        hotel_id,
        room_id: room.id,
        check_in,
        check_out,
        guest_count: selection.guest_count,
        total_price: quote.total_price,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub hotel_id: HotelId,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: u8,
    pub total_price: f64,
}

/// Booking widget state for one hotel page: the selection plus the
/// open/closed flag of the date picker.
#[derive(Debug, Clone)]
pub struct BookingSelector {
    hotel_id: HotelId,
    rooms: Vec<Room>,
    selection: Selection,
    picker_open: bool,
    guests: BookingConfig,
}

impl BookingSelector {
    pub fn new(hotel_id: HotelId, rooms: Vec<Room>, guests: BookingConfig) -> Self {
        let selection = Selection::default().set_guest_count(1, &guests);
        Self {
            hotel_id,
            rooms,
            selection,
            picker_open: false,
            guests,
        }
    }

    pub fn for_hotel(hotel: &Hotel, guests: BookingConfig) -> Self {
        Self::new(hotel.id, hotel.rooms.clone(), guests)
    }

    pub fn hotel_id(&self) -> HotelId {
        self.hotel_id
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn select_date(&mut self, date: NaiveDate) -> DateRange {
        self.selection = std::mem::take(&mut self.selection).select_date(date);
        let dates = self.selection.dates;
        debug!("Picked {}, range now {:?}", date, dates.state());
        if dates.state() == RangeState::Complete {
            self.picker_open = false;
        }
        dates
    }

    pub fn select_room(&mut self, room: &Room) -> &Selection {
        self.selection = std::mem::take(&mut self.selection).select_room(room);
        &self.selection
    }

    // Unknown ids are ignored like sold-out rooms
    pub fn select_room_by_id(&mut self, room_id: RoomId) -> &Selection {
        let room = self.rooms.iter().find(|r| r.id == room_id).cloned();
        match room {
            Some(room) => self.select_room(&room),
            None => {
                warn!("Room {} is not part of hotel {}", room_id, self.hotel_id);
                &self.selection
            }
        }
    }

    pub fn set_guest_count(&mut self, requested: i64) -> &Selection {
        self.selection =
            std::mem::take(&mut self.selection).set_guest_count(requested, &self.guests);
        &self.selection
    }

    pub fn quote(&self) -> Quote {
        compute_quote(&self.selection)
    }

    pub fn is_ready_to_book(&self) -> bool {
        is_ready_to_book(&self.selection)
    }

    pub fn submit(&self) -> Result<BookingRequest, Rejected> {
        submit(&self.selection, self.hotel_id)
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn open_picker(&mut self) {
        self.picker_open = true;
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    pub fn toggle_picker(&mut self) {
        self.picker_open = !self.picker_open;
    }
}
