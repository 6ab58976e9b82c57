//! Scripted walk through the demo: search, pick a room and dates, book,
//! list and cancel, then an admin edit.
//!
//! Environment:
//! - `BOOKMYHOTEL_CONFIG`: path to a JSON config file (optional)
//! - `RUST_LOG`: log level (default: info)

use std::env;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Local};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bookmyhotel::{
    App, AppConfig, HotelCatalog, HotelDraft, HotelFilter, InMemoryCatalog, InMemoryReservations,
    Page,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    let ledger = Arc::new(InMemoryReservations::new(config.latency));
    let app = App::with_services(
        config,
        Arc::new(InMemoryCatalog::with_demo_data()),
        ledger.clone(),
    );

    let mut filter = HotelFilter {
        text: "dubai".to_string(),
        ..HotelFilter::default()
    };
    filter.toggle_amenity("Spa");
    let hotels = app.search(&filter);
    info!("Found {} hotel(s) for {:?}", hotels.len(), filter.text);
    let hotel = hotels.first().context("no hotel matched the search")?;

    let page = Page::resolve(&format!("/hotel/{}", hotel.id));
    info!("Navigating to {} ({:?})", page.path(), page);

    if let Err(err) = app.register("user@bookmyhotel.com", "password", "password").await {
        info!("Registration refused: {}", err);
    }
    let session = app.sign_in("user@bookmyhotel.com", "password").await?;
    ledger.seed_demo(&session.email);

    let mut selector = app.open_hotel(hotel.id)?;
    let today = Local::now().date_naive();
    selector.open_picker();
    selector.select_date(today + Duration::days(14));
    selector.select_date(today + Duration::days(19));
    let room_id = selector
        .rooms()
        .iter()
        .find(|r| r.available)
        .map(|r| r.id)
        .context("hotel has no bookable room")?;
    selector.select_room_by_id(room_id);
    selector.set_guest_count(2);

    let quote = selector.quote();
    info!(
        "{} night(s), total {:.2} {}",
        quote.nights,
        quote.total_price,
        app.config().currency
    );

    let booking = app.book(&session, &selector).await?;
    info!(
        "Confirmed booking {} ({})",
        booking.id, booking.confirmation_code
    );

    for b in app.my_bookings(&session).await {
        info!(
            "#{} {} {} to {} {:?}",
            b.id, b.hotel_name, b.check_in, b.check_out, b.status
        );
    }
    app.cancel_booking(&session, booking.id).await?;

    let guarded = Page::AdminHotels.guard(Some(&session));
    info!("User visiting /admin/hotels lands on {}", guarded.path());

    let admin = app.sign_in("admin@bookmyhotel.com", "admin123").await?;
    let added = app.add_hotel(
        &admin,
        HotelDraft {
            name: "Mandarin Oriental Bangkok".to_string(),
            location: "Bangkok, Thailand".to_string(),
            rating: 4.9,
            rooms_available: 30,
            price: 480.0,
        },
    )?;
    info!("Catalog now lists {} hotels", app.catalog().hotels().len());
    app.remove_hotel(&admin, added.id)?;

    let stats = ledger.stats();
    info!(
        "Ledger: {} reserved, {} cancelled, {} rejected",
        stats.reserved, stats.cancelled, stats.rejected
    );
    println!("{}", serde_json::to_string_pretty(&app.my_bookings(&session).await)?);
    Ok(())
}
