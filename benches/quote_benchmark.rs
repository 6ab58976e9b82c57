use bookmyhotel::catalog::{demo_hotels, HotelCatalog, HotelFilter, InMemoryCatalog};
use bookmyhotel::config::BookingConfig;
use bookmyhotel::selection::{compute_quote, BookingSelector};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, thread_rng, Rng};

// Date picking plus a quote per re-render, the way the detail page drives the selector
pub fn selection_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("booking_selection");
    let hotel = demo_hotels().remove(0);
    let Some(base) = NaiveDate::from_ymd_opt(2025, 12, 1) else {
        return;
    };

    for picks in [10usize, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(picks), picks, |b, &picks| {
            let mut rng = thread_rng();
            let dates: Vec<NaiveDate> = (0..picks)
                .map(|_| base + Duration::days(rng.gen_range(0..60)))
                .collect();
            let room_ids: Vec<u32> = hotel.rooms.iter().map(|r| r.id).collect();

            b.iter(|| {
                let mut selector = BookingSelector::for_hotel(&hotel, BookingConfig::default());
                let mut rng = thread_rng();
                for date in &dates {
                    selector.select_date(*date);
                    if let Some(id) = room_ids.choose(&mut rng) {
                        selector.select_room_by_id(*id);
                    }
                    black_box(compute_quote(selector.selection()));
                }
                black_box(selector.submit())
            });
        });
    }

    group.finish();
}

pub fn search_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_search");

    // Grow the demo catalog to see how the linear filter scales
    for copies in [1usize, 25, 250].iter() {
        let hotels = (0..*copies)
            .flat_map(|n| {
                demo_hotels().into_iter().map(move |mut h| {
                    h.id += (n * 10) as u32;
                    h
                })
            })
            .collect();
        let catalog = InMemoryCatalog::new(hotels);
        let mut filter = HotelFilter {
            text: "o".to_string(),
            max_price: 500.0,
            ..HotelFilter::default()
        };
        filter.toggle_amenity("WiFi");

        group.bench_with_input(BenchmarkId::from_parameter(copies), copies, |b, _| {
            b.iter(|| black_box(catalog.search(&filter)));
        });
    }

    group.finish();
}

criterion_group!(benches, selection_benchmark, search_benchmark);
criterion_main!(benches);
