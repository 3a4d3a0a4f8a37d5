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

use chrono::{DateTime, Datelike, Timelike, Utc};
use gtrack_orbital::{GtrackOrbitalError, parse, parse_text, TleElementSet, tle::Classification};

/// run with "cargo test --test test_tle -- --nocapture"

const ISS_L1: &str = "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
const ISS_L2: &str = "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

/// replace the text starting at 1-based column `col`
fn with_cols (line: &str, col: usize, s: &str) -> String {
    let mut l = line.to_string();
    l.replace_range( col-1..col-1+s.len(), s);
    l
}

fn assert_malformed (res: gtrack_orbital::Result<gtrack_orbital::OrbitalState>, line: u8, field: &str) {
    match res {
        Err(GtrackOrbitalError::MalformedElementSet{ line: l, field: f, reason }) => {
            println!("expected error: line {l}, {f}: {reason}");
            assert_eq!( l, line);
            assert_eq!( f, field);
        }
        other => panic!("expected MalformedElementSet for line {line} {field}, got {other:?}")
    }
}

#[test]
fn test_parse_iss () {
    let state = parse( ISS_L1, ISS_L2).unwrap();
    println!("{state:#?}");

    assert_eq!( state.name, None);
    assert_eq!( state.catalog_number, 25544);
    assert_eq!( state.classification, Classification::Unclassified);
    assert_eq!( state.international_designator.as_deref(), Some("98067A"));

    let epoch = state.epoch;
    assert_eq!( (epoch.year(), epoch.month(), epoch.day()), (2020, 7, 12));
    assert_eq!( (epoch.hour(), epoch.minute(), epoch.second()), (21, 16, 1));
    let expected: DateTime<Utc> = "2020-07-12T21:16:01Z".parse().unwrap();
    assert!( (epoch - expected).num_milliseconds().abs() <= 1);

    assert_eq!( state.mean_motion_dot, -0.00002218);
    assert_eq!( state.mean_motion_ddot, 0.0);
    assert!( (state.drag_term + 0.31515e-4).abs() < 1e-12);
    assert_eq!( state.ephemeris_type, 0);
    assert_eq!( state.element_set_number, 999);

    assert_eq!( state.inclination, 51.6461);
    assert_eq!( state.right_ascension, 221.2784);
    assert!( (state.eccentricity - 0.0001413).abs() < 1e-15);
    assert_eq!( state.argument_of_perigee, 89.1723);
    assert_eq!( state.mean_anomaly, 280.4612);
    assert_eq!( state.mean_motion, 15.49507896);
    assert_eq!( state.revolution_number, 23600);

    let period = state.period_minutes();
    println!("period: {period:.3} min");
    assert!( (period - 92.93).abs() < 0.01);
}

#[test]
fn test_parse_text_line_endings () {
    for sep in ["\n", "\r\n", "\r"] {
        let text = format!("{ISS_L1}{sep}{ISS_L2}{sep}{sep}");
        let state = parse_text( &text).unwrap();
        assert_eq!( state.catalog_number, 25544);
        assert_eq!( state.name, None);
    }

    let text = format!("ISS (ZARYA)\r\n{ISS_L1}\r\n{ISS_L2}\r\n");
    let state = parse_text( &text).unwrap();
    assert_eq!( state.name.as_deref(), Some("ISS (ZARYA)"));

    let text = format!("\n0 ISS (ZARYA)\n{ISS_L1}\n{ISS_L2}");
    let tle = TleElementSet::from_text( &text).unwrap();
    println!("{tle}");
    assert_eq!( tle.title.as_deref(), Some("ISS (ZARYA)"));
    assert_eq!( tle.line1, ISS_L1);
    assert_eq!( tle.line2, ISS_L2);
}

#[test]
fn test_trailing_whitespace () {
    let l1 = format!("{ISS_L1}   ");
    let l2 = format!("{ISS_L2}\r");
    assert!( parse( &l1, &l2).is_ok());
}

#[test]
fn test_missing_lines () {
    assert_malformed( parse_text(""), 1, "line");
    assert_malformed( parse_text( "\r\n\r\n"), 1, "line");
    assert_malformed( parse_text( ISS_L1), 2, "line");
    assert_malformed( parse( ISS_L1, ""), 2, "line");
    assert_malformed( parse( "  ", ISS_L2), 1, "line");

    let text = format!("ISS\n{ISS_L1}\n{ISS_L2}\n{ISS_L1}\n{ISS_L2}");
    assert_malformed( parse_text( &text), 0, "text");
}

#[test]
fn test_wrong_column_count () {
    let truncated = &ISS_L2[..68];
    assert_malformed( parse( ISS_L1, truncated), 2, "line");

    let overlong = format!("{ISS_L2}0");
    assert_malformed( parse( ISS_L1, &overlong), 2, "line");

    let shifted = format!(" {}", &ISS_L1[..68]);
    assert_malformed( parse( &shifted, ISS_L2), 1, "line number");
}

#[test]
fn test_swapped_lines () {
    assert_malformed( parse( ISS_L2, ISS_L1), 1, "line number");
}

#[test]
fn test_catalog_mismatch () {
    let l2 = with_cols( ISS_L2, 3, "25545");
    assert_malformed( parse( ISS_L1, &l2), 2, "catalog number");
}

#[test]
fn test_non_numeric_fields () {
    assert_malformed( parse( ISS_L1, &with_cols( ISS_L2, 9, " 51.64x1")), 2, "inclination");
    assert_malformed( parse( ISS_L1, &with_cols( ISS_L2, 27, "00014a3")), 2, "eccentricity");
    assert_malformed( parse( ISS_L1, &with_cols( ISS_L2, 53, "15.4950789x")), 2, "mean motion");
    assert_malformed( parse( &with_cols( ISS_L1, 3, "2554X"), ISS_L2), 1, "catalog number");
    assert_malformed( parse( &with_cols( ISS_L1, 21, "19x.88612269"), ISS_L2), 1, "epoch day");
    assert_malformed( parse( &with_cols( ISS_L1, 54, "-31515x4"), ISS_L2), 1, "drag term");
    assert_malformed( parse( &with_cols( ISS_L1, 45, " 0000a-0"), ISS_L2), 1, "mean motion ddot");
    assert_malformed( parse( &with_cols( ISS_L1, 8, "X"), ISS_L2), 1, "classification");
}

#[test]
fn test_fixed_point_fields () {
    // decimal columns only hold sign, digits and a single '.'
    assert_malformed( parse( &with_cols( ISS_L1, 34, " 1.234e-05"), ISS_L2), 1, "mean motion dot");
    assert_malformed( parse( &with_cols( ISS_L1, 21, "194.8861e-01"), ISS_L2), 1, "epoch day");
    assert_malformed( parse( ISS_L1, &with_cols( ISS_L2, 9, " 5.16e01")), 2, "inclination");
    assert_malformed( parse( ISS_L1, &with_cols( ISS_L2, 53, "        inf")), 2, "mean motion");
    assert_malformed( parse( ISS_L1, &with_cols( ISS_L2, 53, "15.4950.896")), 2, "mean motion");
    assert_malformed( parse( ISS_L1, &with_cols( ISS_L2, 53, "          .")), 2, "mean motion");

    let s = parse( &with_cols( ISS_L1, 34, "+.00002218"), ISS_L2).unwrap();
    assert_eq!( s.mean_motion_dot, 0.00002218);
}

#[test]
fn test_separators () {
    assert_malformed( parse( ISS_L1, &with_cols( ISS_L2, 17, "0")), 2, "separator");
    assert_malformed( parse( &with_cols( ISS_L1, 33, "0"), ISS_L2), 1, "separator");
}

#[test]
fn test_value_ranges () {
    assert_malformed( parse( ISS_L1, &with_cols( ISS_L2, 9, "181.0000")), 2, "inclination");
    assert_malformed( parse( ISS_L1, &with_cols( ISS_L2, 44, "361.0000")), 2, "mean anomaly");
    assert_malformed( parse( ISS_L1, &with_cols( ISS_L2, 53, " 0.00000000")), 2, "mean motion");
    assert_malformed( parse( &with_cols( ISS_L1, 21, "367.00000000"), ISS_L2), 1, "epoch day");
    assert_malformed( parse( &with_cols( ISS_L1, 21, "000.50000000"), ISS_L2), 1, "epoch day");
}

#[test]
fn test_epoch_century () {
    let s = parse( &with_cols( ISS_L1, 19, "57"), ISS_L2).unwrap();
    assert_eq!( s.epoch.year(), 1957);

    let s = parse( &with_cols( ISS_L1, 19, "56"), ISS_L2).unwrap();
    assert_eq!( s.epoch.year(), 2056);

    let s = parse( &with_cols( ISS_L1, 19, "99001.00000000"), ISS_L2).unwrap();
    assert_eq!( s.epoch, "1999-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
}

#[test]
fn test_classification_and_designator () {
    let l1 = with_cols( &with_cols( ISS_L1, 8, "S"), 10, "        ");
    let s = parse( &l1, ISS_L2).unwrap();
    assert_eq!( s.classification, Classification::Secret);
    assert_eq!( s.international_designator, None);
}
