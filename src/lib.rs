// Main library file for the BookMyHotel booking core

// Booking selection state machine and price quote
pub mod selection;

// In-memory collaborators around the selector
pub mod catalog;
pub mod reservations;
pub mod routes;
pub mod session;

pub mod app;
pub mod config;
pub mod error;

// Re-export key types for convenience
pub use app::App;
pub use catalog::{Hotel, HotelCatalog, HotelDraft, HotelFilter, InMemoryCatalog, Room};
pub use config::{AppConfig, BookingConfig, ConfigError, LatencyConfig};
pub use error::AppError;
pub use reservations::{
    Booking, BookingStatus, InMemoryReservations, LedgerStats, ReservationError,
    ReservationService,
};
pub use routes::Page;
pub use selection::{
    compute_quote, is_ready_to_book, submit, BookingRequest, BookingSelector, DateRange,
    Quote, RangeState, Rejected, Selection,
};
pub use session::{InMemorySessionStore, Role, Session, SessionError};
