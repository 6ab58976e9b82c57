// Hotel catalog: the read side used by the list and detail pages, plus the admin edits
// Everything lives in process memory and is seeded with the demo hotels

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub type HotelId = u32;
pub type RoomId = u32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Hotel {0} not found")]
    NotFound(HotelId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_type: String,
    pub capacity: u8,
    pub price_per_night: f64,
    pub beds: String,
    pub view: String,
    pub size: String,
    pub features: Vec<String>,
    pub available: bool,
}

impl Room {
    pub fn new(id: RoomId, room_type: &str, capacity: u8, price_per_night: f64) -> Self {
        Self {
            id,
            room_type: room_type.to_string(),
            capacity,
            price_per_night,
            beds: String::new(),
            view: String::new(),
            size: String::new(),
            features: Vec::new(),
            available: true,
        }
    }

    pub fn sold_out(mut self) -> Self {
        self.available = false;
        self
    }

    fn described(mut self, beds: &str, view: &str, size: &str, features: &[&str]) -> Self {
        self.beds = beds.to_string();
        self.view = view.to_string();
        self.size = size.to_string();
        self.features = features.iter().map(|f| f.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub location: String,
    pub rating: f32,
    pub total_reviews: u32,
    // Lowest nightly price, shown on the list page and used by the price filter
    pub price: f64,
    pub description: String,
    pub amenities: Vec<String>,
    pub eco_friendly: bool,
    pub rooms_available: u32,
    pub rooms: Vec<Room>,
}

// Fields editable from the admin hotel form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelDraft {
    pub name: String,
    pub location: String,
    pub rating: f32,
    pub rooms_available: u32,
    pub price: f64,
}

impl Default for HotelDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            rating: 5.0,
            rooms_available: 0,
            price: 0.0,
        }
    }
}

/// Search criteria from the hotel list page.
///
/// An empty `text` and an empty `amenities` list match everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelFilter {
    pub text: String,
    pub max_price: f64,
    pub eco_only: bool,
    pub amenities: Vec<String>,
}

impl Default for HotelFilter {
    fn default() -> Self {
        Self {
            text: String::new(),
            max_price: 1000.0,
            eco_only: false,
            amenities: Vec::new(),
        }
    }
}

impl HotelFilter {
    pub fn toggle_amenity(&mut self, amenity: &str) {
        if let Some(pos) = self.amenities.iter().position(|a| a == amenity) {
            self.amenities.remove(pos);
        } else {
            self.amenities.push(amenity.to_string());
        }
    }

    pub fn matches(&self, hotel: &Hotel) -> bool {
        let needle = self.text.to_lowercase();
        let matches_text = hotel.name.to_lowercase().contains(&needle)
            || hotel.location.to_lowercase().contains(&needle);
        let matches_price = hotel.price <= self.max_price;
        let matches_eco = !self.eco_only || hotel.eco_friendly;
        let matches_amenities = self
            .amenities
            .iter()
            .all(|wanted| hotel.amenities.iter().any(|a| a == wanted));

        matches_text && matches_price && matches_eco && matches_amenities
    }
}

pub trait HotelCatalog: Send + Sync + 'static {
    // All hotels in insertion order
    fn hotels(&self) -> Vec<Hotel>;

    fn hotel(&self, id: HotelId) -> Result<Hotel, CatalogError>;

    // Rooms of one hotel, in display order
    fn rooms(&self, hotel_id: HotelId) -> Result<Vec<Room>, CatalogError>;

    fn search(&self, filter: &HotelFilter) -> Vec<Hotel>;

    // Distinct amenities across the catalog, first-seen order
    fn amenities(&self) -> Vec<String>;

    fn create(&self, draft: HotelDraft) -> Hotel;

    fn update(&self, id: HotelId, draft: HotelDraft) -> Result<Hotel, CatalogError>;

    fn delete(&self, id: HotelId) -> Result<Hotel, CatalogError>;
}

pub struct InMemoryCatalog {
    hotels: RwLock<Vec<Hotel>>,
}

impl InMemoryCatalog {
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self {
            hotels: RwLock::new(hotels),
        }
    }

    pub fn with_demo_data() -> Self {
        Self::new(demo_hotels())
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::with_demo_data()
    }
}

impl HotelCatalog for InMemoryCatalog {
    fn hotels(&self) -> Vec<Hotel> {
        self.hotels.read().clone()
    }

    fn hotel(&self, id: HotelId) -> Result<Hotel, CatalogError> {
        self.hotels
            .read()
            .iter()
            .find(|h| h.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    fn rooms(&self, hotel_id: HotelId) -> Result<Vec<Room>, CatalogError> {
        self.hotel(hotel_id).map(|h| h.rooms)
    }

    fn search(&self, filter: &HotelFilter) -> Vec<Hotel> {
        let hotels = self.hotels.read();
        let found: Vec<Hotel> = hotels
            .iter()
            .filter(|h| filter.matches(h))
            .cloned()
            .collect();
        debug!(
            "Search {:?} matched {} of {} hotels",
            filter.text,
            found.len(),
            hotels.len()
        );
        found
    }

    fn amenities(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for amenity in self.hotels.read().iter().flat_map(|h| h.amenities.iter()) {
            if !seen.contains(amenity) {
                seen.push(amenity.clone());
            }
        }
        seen
    }

    fn create(&self, draft: HotelDraft) -> Hotel {
        let mut hotels = self.hotels.write();
        let id = hotels.iter().map(|h| h.id).max().unwrap_or(0) + 1;
        let hotel = Hotel {
            id,
            name: draft.name,
            location: draft.location,
            rating: draft.rating,
            total_reviews: 0,
            price: draft.price,
            description: String::new(),
            amenities: Vec::new(),
            eco_friendly: false,
            rooms_available: draft.rooms_available,
            rooms: Vec::new(),
        };
        hotels.push(hotel.clone());
        info!("Created hotel {} ({})", hotel.id, hotel.name);
        hotel
    }

    fn update(&self, id: HotelId, draft: HotelDraft) -> Result<Hotel, CatalogError> {
        let mut hotels = self.hotels.write();
        let hotel = hotels
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        hotel.name = draft.name;
        hotel.location = draft.location;
        hotel.rating = draft.rating;
        hotel.rooms_available = draft.rooms_available;
        hotel.price = draft.price;
        info!("Updated hotel {} ({})", hotel.id, hotel.name);
        Ok(hotel.clone())
    }

    fn delete(&self, id: HotelId) -> Result<Hotel, CatalogError> {
        let mut hotels = self.hotels.write();
        let pos = hotels
            .iter()
            .position(|h| h.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let removed = hotels.remove(pos);
        info!("Deleted hotel {} ({})", removed.id, removed.name);
        Ok(removed)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn demo_hotels() -> Vec<Hotel> {
    vec![
        Hotel {
            id: 1,
            name: "Marriott Dubai Marina".to_string(),
            location: "Dubai, UAE".to_string(),
            rating: 4.8,
            total_reviews: 1247,
            price: 350.0,
            description: "Experience luxury at its finest with panoramic views of Dubai Marina. \
                          Enjoy world-class dining, infinity pool, and award-winning spa."
                .to_string(),
            amenities: strings(&["WiFi", "Spa", "Pool", "Gym", "Restaurant"]),
            eco_friendly: true,
            rooms_available: 45,
            rooms: vec![
                Room::new(101, "Deluxe King Room", 2, 350.0).described(
                    "1 King Bed",
                    "Marina View",
                    "42 m²",
                    &["Free WiFi", "Smart TV", "Minibar", "Balcony"],
                ),
                Room::new(102, "Executive Suite", 4, 650.0).described(
                    "1 King + 1 Sofa Bed",
                    "City & Marina View",
                    "85 m²",
                    &["Living Room", "2 Bathrooms", "Nespresso", "Lounge Access"],
                ),
                Room::new(103, "Presidential Suite", 6, 1500.0)
                    .described(
                        "2 King Beds",
                        "Full Marina View",
                        "180 m²",
                        &["Private Terrace", "Butler Service", "Jacuzzi", "Dining Area"],
                    )
                    .sold_out(),
            ],
        },
        Hotel {
            id: 2,
            name: "Hilton Paris Opera".to_string(),
            location: "Paris, France".to_string(),
            rating: 4.7,
            total_reviews: 982,
            price: 420.0,
            description: "Belle Époque landmark steps from the Opéra Garnier.".to_string(),
            amenities: strings(&["WiFi", "Bar", "Concierge", "Room Service"]),
            eco_friendly: false,
            rooms_available: 38,
            rooms: vec![
                Room::new(201, "Deluxe King Room", 2, 420.0).described(
                    "1 King Bed",
                    "Courtyard View",
                    "32 m²",
                    &["Free WiFi", "Minibar"],
                ),
                Room::new(202, "Executive Suite", 4, 650.0).described(
                    "1 King + 1 Sofa Bed",
                    "Opera View",
                    "60 m²",
                    &["Living Room", "Lounge Access"],
                ),
            ],
        },
        Hotel {
            id: 3,
            name: "Hyatt Regency Tokyo".to_string(),
            location: "Tokyo, Japan".to_string(),
            rating: 4.9,
            total_reviews: 1530,
            price: 380.0,
            description: "Shinjuku high-rise with skyline views and a rooftop spa.".to_string(),
            amenities: strings(&["WiFi", "Spa", "Gym", "Bar", "Airport Shuttle"]),
            eco_friendly: true,
            rooms_available: 52,
            rooms: vec![
                Room::new(301, "Deluxe King Room", 2, 380.0).described(
                    "1 King Bed",
                    "City View",
                    "36 m²",
                    &["Free WiFi", "Smart TV"],
                ),
                Room::new(302, "Twin Room", 3, 410.0).described(
                    "2 Double Beds",
                    "Park View",
                    "40 m²",
                    &["Free WiFi", "Bathtub"],
                ),
            ],
        },
        Hotel {
            id: 4,
            name: "Four Seasons London".to_string(),
            location: "London, UK".to_string(),
            rating: 5.0,
            total_reviews: 764,
            price: 650.0,
            description: "Park Lane townhouse overlooking Hyde Park.".to_string(),
            amenities: strings(&["WiFi", "Spa", "Pool", "Fine Dining", "Butler Service"]),
            eco_friendly: true,
            rooms_available: 29,
            rooms: vec![
                Room::new(401, "Superior King Room", 2, 650.0).described(
                    "1 King Bed",
                    "Park View",
                    "45 m²",
                    &["Free WiFi", "Marble Bathroom"],
                ),
                Room::new(402, "Royal Suite", 5, 2400.0)
                    .described(
                        "2 King Beds",
                        "Hyde Park View",
                        "210 m²",
                        &["Butler Service", "Dining Area"],
                    )
                    .sold_out(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn names(hotels: &[Hotel]) -> Vec<&str> {
        hotels.iter().map(|h| h.name.as_str()).collect()
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let catalog = InMemoryCatalog::with_demo_data();
        assert_eq!(catalog.search(&HotelFilter::default()).len(), 4);
    }

    #[test_case("dubai", &["Marriott Dubai Marina"] ; "location is case insensitive")]
    #[test_case("HILTON", &["Hilton Paris Opera"] ; "name is case insensitive")]
    #[test_case("on", &["Hilton Paris Opera", "Four Seasons London"] ; "substring anywhere")]
    #[test_case("berlin", &[] ; "no match")]
    fn test_text_search(text: &str, expected: &[&str]) {
        let catalog = InMemoryCatalog::with_demo_data();
        let filter = HotelFilter {
            text: text.to_string(),
            ..HotelFilter::default()
        };
        assert_eq!(names(&catalog.search(&filter)), expected);
    }

    #[test]
    fn test_price_ceiling_is_inclusive() {
        let catalog = InMemoryCatalog::with_demo_data();
        let filter = HotelFilter {
            max_price: 380.0,
            ..HotelFilter::default()
        };
        assert_eq!(
            names(&catalog.search(&filter)),
            vec!["Marriott Dubai Marina", "Hyatt Regency Tokyo"]
        );
    }

    #[test]
    fn test_eco_and_amenities_combine() {
        let catalog = InMemoryCatalog::with_demo_data();
        let mut filter = HotelFilter {
            eco_only: true,
            ..HotelFilter::default()
        };
        filter.toggle_amenity("Spa");
        filter.toggle_amenity("Pool");
        assert_eq!(
            names(&catalog.search(&filter)),
            vec!["Marriott Dubai Marina", "Four Seasons London"]
        );

        // toggling again removes the requirement
        filter.toggle_amenity("Pool");
        assert_eq!(filter.amenities, vec!["Spa".to_string()]);
        assert_eq!(catalog.search(&filter).len(), 3);
    }

    #[test]
    fn test_amenities_are_distinct_in_first_seen_order() {
        let catalog = InMemoryCatalog::with_demo_data();
        let amenities = catalog.amenities();
        assert_eq!(&amenities[..5], &strings(&["WiFi", "Spa", "Pool", "Gym", "Restaurant"])[..]);
        assert_eq!(amenities.iter().filter(|a| a.as_str() == "WiFi").count(), 1);
        assert!(amenities.contains(&"Butler Service".to_string()));
    }

    #[test]
    fn test_rooms_lookup() {
        let catalog = InMemoryCatalog::with_demo_data();
        let rooms = catalog.rooms(1).unwrap();
        assert_eq!(rooms.len(), 3);
        assert!(!rooms[2].available);
        assert_eq!(catalog.rooms(99), Err(CatalogError::NotFound(99)));
    }

    #[test]
    fn test_admin_create_update_delete() {
        let catalog = InMemoryCatalog::with_demo_data();

        let created = catalog.create(HotelDraft {
            name: "Ritz Madrid".to_string(),
            location: "Madrid, Spain".to_string(),
            rating: 4.6,
            rooms_available: 20,
            price: 500.0,
        });
        assert_eq!(created.id, 5);
        assert_eq!(catalog.hotels().last().unwrap().name, "Ritz Madrid");

        let updated = catalog
            .update(
                1,
                HotelDraft {
                    name: "Marriott Marina".to_string(),
                    location: "Dubai, UAE".to_string(),
                    rating: 4.5,
                    rooms_available: 40,
                    price: 300.0,
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Marriott Marina");
        assert_eq!(updated.rooms.len(), 3, "rooms survive an edit");
        assert_eq!(updated.amenities.len(), 5);

        let deleted = catalog.delete(2).unwrap();
        assert_eq!(deleted.name, "Hilton Paris Opera");
        assert_eq!(catalog.hotel(2), Err(CatalogError::NotFound(2)));
        assert_eq!(catalog.hotels().len(), 4);
    }

    #[test]
    fn test_admin_edits_on_unknown_id() {
        let catalog = InMemoryCatalog::with_demo_data();
        assert_eq!(
            catalog.update(42, HotelDraft::default()),
            Err(CatalogError::NotFound(42))
        );
        assert_eq!(catalog.delete(42), Err(CatalogError::NotFound(42)));
    }

    #[test]
    fn test_create_on_empty_catalog_starts_at_one() {
        let catalog = InMemoryCatalog::new(Vec::new());
        assert_eq!(catalog.create(HotelDraft::default()).id, 1);
    }
}
