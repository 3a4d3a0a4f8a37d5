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

use chrono::{DateTime, TimeDelta, Utc};
use gtrack_common::angle::normalize_180;
use gtrack_orbital::{parse, propagate, to_geodetic, Propagator, geodetic::{gmst, to_cartographic}};

/// run with "cargo test --test test_propagator -- --nocapture"

const ISS_L1: &str = "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
const ISS_L2: &str = "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

// deep space test set (period > 225 min)
const SAT5_L1: &str = "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753";
const SAT5_L2: &str = "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";

fn reference_instant () -> DateTime<Utc> {
    "2020-07-13T00:00:00Z".parse().unwrap()
}

#[test]
fn test_iss_orbit () {
    let state = parse( ISS_L1, ISS_L2).unwrap();
    let ecp = propagate( &state, reference_instant(), 0).unwrap();

    let r = ecp.radius_km();
    let v = ecp.speed_km_s();
    println!("TEME r = {:?} km, |r| = {r:.3} km, |v| = {v:.4} km/s", ecp.position);
    assert!( r > 6700.0 && r < 6850.0);
    assert!( v > 7.5 && v < 7.8);

    let c = to_cartographic( &ecp, &reference_instant());
    println!("geodetic: {c}");
    assert!( c.height > 380_000.0 && c.height < 460_000.0);
}

#[test]
fn test_determinism () {
    let state = parse( ISS_L1, ISS_L2).unwrap();
    let t = reference_instant();

    let p1 = propagate( &state, t, 42).unwrap();
    let p2 = propagate( &state, t, 42).unwrap();
    assert_eq!( p1, p2);

    let (lat1, lon1) = to_geodetic( &p1, t + TimeDelta::minutes(42));
    let (lat2, lon2) = to_geodetic( &p2, t + TimeDelta::minutes(42));
    assert!( (lat1.to_decimal() - lat2.to_decimal()).abs() < 1e-9);
    assert!( (lon1.to_decimal() - lon2.to_decimal()).abs() < 1e-9);
}

#[test]
fn test_offset_reference () {
    let state = parse( ISS_L1, ISS_L2).unwrap();
    let t = reference_instant();

    let a = propagate( &state, t, 30).unwrap();
    let b = propagate( &state, t + TimeDelta::minutes(30), 0).unwrap();
    let c = propagate( &state, t + TimeDelta::minutes(60), -30).unwrap();
    assert_eq!( a, b);
    assert_eq!( a, c);

    let propagator = Propagator::new( &state).unwrap();
    assert_eq!( propagator.catalog_number(), 25544);
    assert_eq!( propagator.propagate( t, 30).unwrap(), a);
}

#[test]
fn test_decayed_orbit () {
    // eccentricity 0.7 puts the perigee deep inside the earth, mean anomaly 0 is the perigee
    let l2 = "2 25544  51.6461 221.2784 7000000  89.1723 000.0000 15.49507896236008";
    let state = parse( ISS_L1, l2).unwrap();

    match propagate( &state, state.epoch, 0) {
        Err(e) => {
            println!("expected error: {e}");
            assert!( e.is_propagation_diverged());
        }
        Ok(ecp) => panic!("decayed orbit should not propagate: {ecp:?}")
    }
}

#[test]
fn test_offset_out_of_range () {
    let state = parse( ISS_L1, ISS_L2).unwrap();

    for offset in [i64::MAX / 2, i64::MIN / 2, i64::MAX, i64::MIN] {
        match propagate( &state, reference_instant(), offset) {
            Err(e) => {
                println!("expected error: {e}");
                assert!( e.is_propagation_diverged());
            }
            Ok(ecp) => panic!("offset {offset} should not propagate: {ecp:?}")
        }
    }
}

#[test]
fn test_matches_sgp4_tle_elements () {
    for (l1, l2) in [(ISS_L1, ISS_L2), (SAT5_L1, SAT5_L2)] {
        let state = parse( l1, l2).unwrap();
        let propagator = Propagator::new( &state).unwrap();

        let elements = sgp4::Elements::from_tle( None, l1.as_bytes(), l2.as_bytes()).unwrap();
        let constants = sgp4::Constants::from_elements( &elements).unwrap();

        for offset in [-720, 0, 360, 1440] {
            let ecp = propagator.propagate( state.epoch, offset).unwrap();
            let prediction = constants.propagate( sgp4::MinutesSinceEpoch( offset as f64)).unwrap();

            let dr = (ecp.position - nalgebra::Vector3::from( prediction.position)).norm();
            let dv = (ecp.velocity - nalgebra::Vector3::from( prediction.velocity)).norm();
            println!("sat {} at {offset:5} min: dr = {dr:e} km, dv = {dv:e} km/s", state.catalog_number);
            assert!( dr < 1e-9);
            assert!( dv < 1e-12);
        }
    }
}

#[test]
fn test_gmst () {
    let j2000: DateTime<Utc> = "2000-01-01T12:00:00Z".parse().unwrap();
    let theta = gmst( &j2000).to_degrees();
    println!("GMST(J2000) = {theta}°");
    assert!( (theta - 280.46061837).abs() < 1e-4);

    // one solar day advances the sidereal angle by ~0.9856°
    let theta1 = gmst( &(j2000 + TimeDelta::days(1))).to_degrees();
    assert!( (normalize_180( theta1 - theta) - 0.98565).abs() < 1e-3);
}

#[test]
fn test_earth_rotation () {
    let state = parse( ISS_L1, ISS_L2).unwrap();
    let t = reference_instant();
    let ecp = propagate( &state, t, 0).unwrap();

    // same inertial position seen six hours later is ~90.25° further west
    let (lat0, lon0) = to_geodetic( &ecp, t);
    let (lat1, lon1) = to_geodetic( &ecp, t + TimeDelta::hours(6));
    let dlon = normalize_180( lon1.to_decimal() - lon0.to_decimal());
    println!("lon {} -> {} : {dlon}", lon0, lon1);

    assert!( (lat1.to_decimal() - lat0.to_decimal()).abs() < 1e-9);
    assert!( (dlon + 90.2464).abs() < 0.01);
}

#[test]
fn test_geodetic_ranges () {
    let state = parse( ISS_L1, ISS_L2).unwrap();
    let propagator = Propagator::new( &state).unwrap();
    let t = reference_instant();

    for offset in (-1440..=1440).step_by(7) {
        let ecp = propagator.propagate( t, offset).unwrap();
        let (lat, lon) = to_geodetic( &ecp, t + TimeDelta::minutes(offset));
        let (lat, lon) = (lat.to_decimal(), lon.to_decimal());

        assert!( (-90.0..=90.0).contains( &lat));
        assert!( (-180.0..=180.0).contains( &lon));
        assert!( lat.abs() < 52.0); // bounded by inclination
    }
}
