// Top-level error for the application facade

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::reservations::ReservationError;
use crate::selection::Rejected;
use crate::session::SessionError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Booking not ready: {0}")]
    Rejected(#[from] Rejected),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Reservation(#[from] ReservationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
