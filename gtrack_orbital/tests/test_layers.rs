/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use chrono::{DateTime, Utc};
use geojson::Value;
use gtrack_orbital::{
    build, parse, GeodeticPosition, TrackWindow,
    cities::{load_cities, read_cities, CityInfo},
    layers::{ground_distance_km, map_layers, split_at_antimeridian, CITIES_LAYER, CURRENT_POSITION_LAYER, FUTURE_PATH_LAYER, HISTORICAL_PATH_LAYER},
};

/// run with "cargo test --test test_layers -- --nocapture"

const ISS_L1: &str = "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
const ISS_L2: &str = "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

fn reference_instant () -> DateTime<Utc> {
    "2020-07-13T00:00:00Z".parse().unwrap()
}

fn cities_path () -> String {
    format!("{}/assets/cities.csv", env!("CARGO_MANIFEST_DIR"))
}

fn layer_of (f: &geojson::Feature) -> String {
    f.property("layer").and_then(|v| v.as_str()).unwrap_or_default().to_string()
}

fn pos (lon: f64, lat: f64) -> GeodeticPosition {
    GeodeticPosition { name: "test".to_string(), latitude: lat, longitude: lon, timestamp: reference_instant() }
}

#[test]
fn test_load_cities () {
    let cities = load_cities( cities_path()).unwrap();
    println!("loaded {} cities", cities.len());
    assert_eq!( cities.len(), 28);

    let tokyo = &cities[0];
    assert_eq!( tokyo.name, "Tokyo");
    assert_eq!( tokyo.latitude, 35.6897);
    assert_eq!( tokyo.longitude, 139.6922);
    assert_eq!( tokyo.population, Some(37732000));

    let anchorage = cities.iter().find( |c| c.name == "Anchorage").unwrap();
    assert_eq!( anchorage.population, None);
}

#[test]
fn test_invalid_city () {
    let csv = "city,lat,lng,population\nQuito,-0.22,-78.5125,2011388\nNowhere,95.0,10.0,1\n";
    match read_cities( csv.as_bytes()) {
        Err(e) => {
            let msg = e.to_string();
            println!("expected error: {msg}");
            assert!( msg.contains("record 2"));
            assert!( msg.contains("Nowhere"));
        }
        Ok(cities) => panic!("invalid record accepted: {cities:?}")
    }

    assert!( read_cities( "city,lat,lng,population\nQuito,south,-78.5,1\n".as_bytes()).is_err());
}

#[test]
fn test_map_layers () {
    let state = parse( ISS_L1, ISS_L2).unwrap();
    let track = build( &state, "ISS", reference_instant(), &TrackWindow::default()).unwrap();
    let cities = vec![ CityInfo { name: "Quito".to_string(), latitude: -0.22, longitude: -78.5125, population: Some(2011388) } ];

    let fc = map_layers( &track, &cities);
    println!("{}", serde_json::to_string_pretty(&fc).unwrap());

    let layers: Vec<String> = fc.features.iter().map(layer_of).collect();
    assert_eq!( layers, vec![CITIES_LAYER, HISTORICAL_PATH_LAYER, FUTURE_PATH_LAYER, CURRENT_POSITION_LAYER]);

    let current = track.current();
    let current_coord = vec![current.longitude, current.latitude];

    let hist = &fc.features[1];
    let fut = &fc.features[2];
    let cur = &fc.features[3];

    let hist_n: usize = match &hist.geometry.as_ref().unwrap().value {
        Value::MultiLineString(segments) => {
            assert_eq!( segments.last().unwrap().last().unwrap(), &current_coord);
            segments.iter().map(|s| s.len()).sum()
        }
        other => panic!("unexpected historical geometry {other:?}")
    };
    assert_eq!( hist_n, 91); // offsets -90..=0

    let fut_n: usize = match &fut.geometry.as_ref().unwrap().value {
        Value::MultiLineString(segments) => {
            assert_eq!( segments.first().unwrap().first().unwrap(), &current_coord);
            segments.iter().map(|s| s.len()).sum()
        }
        other => panic!("unexpected future geometry {other:?}")
    };
    assert_eq!( fut_n, 90); // offsets 0..=89

    match &cur.geometry.as_ref().unwrap().value {
        Value::Point(p) => assert_eq!( p, &current_coord),
        other => panic!("unexpected current position geometry {other:?}")
    }
    assert_eq!( cur.property("timestamp").and_then(|v| v.as_str()), Some("2020-07-13T00:00:00UTC"));
    assert_eq!( cur.property("name").and_then(|v| v.as_str()), Some("ISS"));

    // ~430 km ground distance per minute
    let hist_km = hist.property("length_km").and_then(|v| v.as_f64()).unwrap();
    let fut_km = fut.property("length_km").and_then(|v| v.as_f64()).unwrap();
    println!("historical path: {hist_km:.0} km, future path: {fut_km:.0} km");
    assert_eq!( hist_km, ground_distance_km( &track.positions()[..=track.current_index()]));
    assert!( hist_km > 33_000.0 && hist_km < 45_000.0);
    assert!( fut_km > 33_000.0 && fut_km < 45_000.0);
}

#[test]
fn test_ground_distance () {
    // one degree of arc on the mean earth sphere
    let d = ground_distance_km( &[pos(0.0, 0.0), pos(1.0, 0.0)]);
    println!("1° along the equator: {d} km");
    assert!( (d - 111.195).abs() < 1e-3);

    let d = ground_distance_km( &[pos(179.5, 0.0), pos(-179.5, 0.0)]);
    assert!( (d - 111.195).abs() < 1e-3);

    let d = ground_distance_km( &[pos(0.0, 0.0), pos(1.0, 0.0), pos(1.0, 1.0)]);
    assert!( (d - 2.0 * 111.195).abs() < 2e-3);

    assert_eq!( ground_distance_km( &[pos(10.0, 10.0)]), 0.0);
    assert_eq!( ground_distance_km( &[]), 0.0);
}

#[test]
fn test_antimeridian_split () {
    let positions = vec![ pos(170.0, 10.0), pos(179.0, 11.0), pos(-178.0, 12.0), pos(-170.0, 13.0), pos(-160.0, 14.0)];
    let segments = split_at_antimeridian( &positions);
    println!("{segments:?}");

    assert_eq!( segments.len(), 2);
    assert_eq!( segments[0].len(), 2);
    assert_eq!( segments[1].len(), 3);
    assert_eq!( segments[1][0], vec![-178.0, 12.0]);

    let positions = vec![ pos(-10.0, 0.0), pos(10.0, 1.0), pos(30.0, 2.0)];
    assert_eq!( split_at_antimeridian( &positions).len(), 1);
    assert!( split_at_antimeridian( &[]).is_empty());
}
