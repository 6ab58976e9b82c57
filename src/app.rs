// Wires the catalog, sessions and reservation ledger behind one handle
// The presentation layer talks to this; the selector itself stays a plain value per page

use std::sync::Arc;
use tracing::info;

use crate::catalog::{Hotel, HotelCatalog, HotelDraft, HotelFilter, HotelId, InMemoryCatalog};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::reservations::{Booking, BookingId, InMemoryReservations, ReservationService};
use crate::selection::BookingSelector;
use crate::session::{require_admin, InMemorySessionStore, Session};

pub struct App {
    config: AppConfig,
    catalog: Arc<dyn HotelCatalog>,
    sessions: InMemorySessionStore,
    reservations: Arc<dyn ReservationService>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let reservations = InMemoryReservations::new(config.latency);
        Self::with_services(
            config,
            Arc::new(InMemoryCatalog::with_demo_data()),
            Arc::new(reservations),
        )
    }

    // Plug in other catalog or ledger implementations; the caller may keep its own handles
    pub fn with_services(
        config: AppConfig,
        catalog: Arc<dyn HotelCatalog>,
        reservations: Arc<dyn ReservationService>,
    ) -> Self {
        let sessions = InMemorySessionStore::new(config.accounts.clone(), config.latency);
        Self {
            config,
            catalog,
            sessions,
            reservations,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> Arc<dyn HotelCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn sessions(&self) -> &InMemorySessionStore {
        &self.sessions
    }

    pub fn reservations(&self) -> Arc<dyn ReservationService> {
        Arc::clone(&self.reservations)
    }

    pub fn search(&self, filter: &HotelFilter) -> Vec<Hotel> {
        self.catalog.search(filter)
    }

    // Fresh selection state for a hotel detail page
    pub fn open_hotel(&self, hotel_id: HotelId) -> Result<BookingSelector, AppError> {
        let hotel = self.catalog.hotel(hotel_id)?;
        Ok(BookingSelector::for_hotel(&hotel, self.config.booking))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        Ok(self.sessions.sign_in(email, password).await?)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<(), AppError> {
        Ok(self.sessions.register(email, password, confirm).await?)
    }

    pub async fn book(
        &self,
        session: &Session,
        selector: &BookingSelector,
    ) -> Result<Booking, AppError> {
        let request = selector.submit()?;
        let hotel = self.catalog.hotel(request.hotel_id)?;
        Ok(self.reservations.reserve(session, request, &hotel).await?)
    }

    pub async fn my_bookings(&self, session: &Session) -> Vec<Booking> {
        self.reservations.bookings(session).await
    }

    pub async fn cancel_booking(
        &self,
        session: &Session,
        booking_id: BookingId,
    ) -> Result<Booking, AppError> {
        Ok(self.reservations.cancel(session, booking_id).await?)
    }

    pub fn add_hotel(&self, session: &Session, draft: HotelDraft) -> Result<Hotel, AppError> {
        require_admin(session)?;
        Ok(self.catalog.create(draft))
    }

    pub fn edit_hotel(
        &self,
        session: &Session,
        id: HotelId,
        draft: HotelDraft,
    ) -> Result<Hotel, AppError> {
        require_admin(session)?;
        Ok(self.catalog.update(id, draft)?)
    }

    pub fn remove_hotel(&self, session: &Session, id: HotelId) -> Result<Hotel, AppError> {
        require_admin(session)?;
        let removed = self.catalog.delete(id)?;
        info!("Admin {} removed hotel {}", session.email, removed.id);
        Ok(removed)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
