// Reservation ledger behind the "Book Now" button and the "My Bookings" dashboard
// Bookings are kept in memory only; there is no availability or overlap check

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::{Hotel, HotelId, RoomId};
use crate::config::LatencyConfig;
use crate::selection::BookingRequest;
use crate::session::Session;

pub type BookingId = u64;

const FIRST_BOOKING_ID: BookingId = 1001;

struct DemoStay {
    hotel_id: HotelId,
    hotel_name: &'static str,
    room_type: &'static str,
    check_in: &'static str,
    check_out: &'static str,
    guests: u8,
    total_price: f64,
    status: BookingStatus,
}

// One stay per dashboard state
const DEMO_STAYS: [DemoStay; 3] = [
    DemoStay {
        hotel_id: 1,
        hotel_name: "Marriott Dubai Marina",
        room_type: "Deluxe King Room",
        check_in: "2025-12-20",
        check_out: "2025-12-25",
        guests: 2,
        total_price: 1750.0,
        status: BookingStatus::Upcoming,
    },
    DemoStay {
        hotel_id: 2,
        hotel_name: "Hilton Paris Opera",
        room_type: "Executive Suite",
        check_in: "2025-08-10",
        check_out: "2025-08-15",
        guests: 3,
        total_price: 3250.0,
        status: BookingStatus::Completed,
    },
    DemoStay {
        hotel_id: 3,
        hotel_name: "Hyatt Regency Tokyo",
        room_type: "Deluxe King Room",
        check_in: "2025-11-05",
        check_out: "2025-11-08",
        guests: 1,
        total_price: 1140.0,
        status: BookingStatus::Cancelled,
    },
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReservationError {
    #[error("Booking {0} not found")]
    NotFound(BookingId),

    #[error("Booking {id} is {status:?} and can no longer be cancelled")]
    NotCancellable { id: BookingId, status: BookingStatus },

    #[error("Request is for hotel {requested} but hotel {given} was supplied")]
    HotelMismatch { requested: HotelId, given: HotelId },

    #[error("Room {room_id} does not belong to hotel {hotel_id}")]
    UnknownRoom { hotel_id: HotelId, room_id: RoomId },

    #[error("Room {0} is sold out")]
    RoomUnavailable(RoomId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Upcoming,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub user: String,
    pub hotel_id: HotelId,
    pub hotel_name: String,
    pub room_type: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u8,
    pub total_price: f64,
    pub status: BookingStatus,
    pub confirmation_code: String,
}

impl Booking {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    pub reserved: usize,
    pub cancelled: usize,
    pub rejected: usize,
}

#[async_trait]
pub trait ReservationService: Send + Sync + 'static {
    // Record a new upcoming booking for the session's user
    async fn reserve(
        &self,
        session: &Session,
        request: BookingRequest,
        hotel: &Hotel,
    ) -> Result<Booking, ReservationError>;

    // The session user's bookings, oldest first
    async fn bookings(&self, session: &Session) -> Vec<Booking>;

    // Only upcoming bookings owned by the session user can be cancelled
    async fn cancel(
        &self,
        session: &Session,
        booking_id: BookingId,
    ) -> Result<Booking, ReservationError>;
}

pub struct InMemoryReservations {
    ledger: DashMap<BookingId, Booking>,
    next_id: AtomicU64,
    latency: LatencyConfig,
    reserved: AtomicUsize,
    cancelled: AtomicUsize,
    rejected: AtomicUsize,
}

impl InMemoryReservations {
    pub fn new(latency: LatencyConfig) -> Self {
        Self {
            ledger: DashMap::new(),
            next_id: AtomicU64::new(FIRST_BOOKING_ID),
            latency,
            reserved: AtomicUsize::new(0),
            cancelled: AtomicUsize::new(0),
            rejected: AtomicUsize::new(0),
        }
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            reserved: self.reserved.load(Ordering::SeqCst),
            cancelled: self.cancelled.load(Ordering::SeqCst),
            rejected: self.rejected.load(Ordering::SeqCst),
        }
    }

    /// Fill the dashboard for `user` with the three sample stays.
    pub fn seed_demo(&self, user: &str) -> Vec<Booking> {
        DEMO_STAYS
            .iter()
            .filter_map(|stay| {
                let booking = Booking {
                    id: self.next_id.fetch_add(1, Ordering::SeqCst),
                    user: user.to_string(),
                    hotel_id: stay.hotel_id,
                    hotel_name: stay.hotel_name.to_string(),
                    room_type: stay.room_type.to_string(),
                    check_in: NaiveDate::parse_from_str(stay.check_in, "%Y-%m-%d").ok()?,
                    check_out: NaiveDate::parse_from_str(stay.check_out, "%Y-%m-%d").ok()?,
                    guests: stay.guests,
                    total_price: stay.total_price,
                    status: stay.status,
                    confirmation_code: confirmation_code(),
                };
                self.ledger.insert(booking.id, booking.clone());
                Some(booking)
            })
            .collect()
    }

    /// Mark upcoming stays that ended before `today` as completed.
    pub fn complete_past(&self, today: NaiveDate) -> usize {
        let mut completed = 0;
        for mut entry in self.ledger.iter_mut() {
            let booking = entry.value_mut();
            if booking.status == BookingStatus::Upcoming && booking.check_out < today {
                booking.status = BookingStatus::Completed;
                completed += 1;
            }
        }
        completed
    }

    fn reject(&self, err: ReservationError) -> ReservationError {
        warn!("Reservation rejected: {}", err);
        self.rejected.fetch_add(1, Ordering::SeqCst);
        err
    }
}

fn confirmation_code() -> String {
    format!("CONF{:05}", rand::random::<u16>())
}

#[async_trait]
impl ReservationService for InMemoryReservations {
    async fn reserve(
        &self,
        session: &Session,
        request: BookingRequest,
        hotel: &Hotel,
    ) -> Result<Booking, ReservationError> {
        let delay = self.latency.reservation();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if request.hotel_id != hotel.id {
            return Err(self.reject(ReservationError::HotelMismatch {
                requested: request.hotel_id,
                given: hotel.id,
            }));
        }
        let room = hotel
            .rooms
            .iter()
            .find(|r| r.id == request.room_id)
            .ok_or_else(|| {
                self.reject(ReservationError::UnknownRoom {
                    hotel_id: hotel.id,
                    room_id: request.room_id,
                })
            })?;
        if !room.available {
            return Err(self.reject(ReservationError::RoomUnavailable(room.id)));
        }

        let booking = Booking {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user: session.email.clone(),
            hotel_id: hotel.id,
            hotel_name: hotel.name.clone(),
            room_type: room.room_type.clone(),
            check_in: request.check_in,
            check_out: request.check_out,
            guests: request.guest_count,
            total_price: request.total_price,
            status: BookingStatus::Upcoming,
            confirmation_code: confirmation_code(),
        };
        self.ledger.insert(booking.id, booking.clone());
        self.reserved.fetch_add(1, Ordering::SeqCst);

        info!(
            "Booked {} at {} for {} ({} to {}, {:.2})",
            booking.room_type,
            booking.hotel_name,
            booking.user,
            booking.check_in,
            booking.check_out,
            booking.total_price
        );
        Ok(booking)
    }

    async fn bookings(&self, session: &Session) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self
            .ledger
            .iter()
            .filter(|entry| entry.value().user == session.email)
            .map(|entry| entry.value().clone())
            .collect();
        bookings.sort_by_key(|b| b.id);
        bookings
    }

    async fn cancel(
        &self,
        session: &Session,
        booking_id: BookingId,
    ) -> Result<Booking, ReservationError> {
        let mut entry = match self.ledger.get_mut(&booking_id) {
            Some(entry) if entry.value().user == session.email => entry,
            _ => return Err(self.reject(ReservationError::NotFound(booking_id))),
        };

        let booking = entry.value_mut();
        if booking.status != BookingStatus::Upcoming {
            let err = ReservationError::NotCancellable {
                id: booking_id,
                status: booking.status,
            };
            drop(entry);
            return Err(self.reject(err));
        }

        booking.status = BookingStatus::Cancelled;
        let cancelled = booking.clone();
        drop(entry);

        self.cancelled.fetch_add(1, Ordering::SeqCst);
        info!("Cancelled booking {} for {}", booking_id, session.email);
        Ok(cancelled)
    }
}
