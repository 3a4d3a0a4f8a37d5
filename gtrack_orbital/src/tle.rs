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

//! parsing of NORAD two-line element sets (TLE) into orbital states.
//!
//! Both lines have a fixed layout of 69 columns. Fields are extracted by (1-based, inclusive)
//! column ranges and each field is checked for its lexical form and value range. The trailing
//! modulo-10 checksum column has to be present but its value is not verified.

use std::{fmt, str::FromStr};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use crate::errors::{GtrackOrbitalError, Result, malformed};

pub const TLE_LINE_LEN: usize = 69;

/// first two-digit epoch year that is interpreted as 19xx
const EPOCH_CENTURY_PIVOT: u32 = 57;

const LINE1_SEPARATORS: [usize; 8] = [2, 9, 18, 33, 44, 53, 62, 64];
const LINE2_SEPARATORS: [usize; 7] = [2, 8, 17, 26, 34, 43, 52];

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum Classification {
    Unclassified,
    Classified,
    Secret,
}

impl Classification {
    fn from_char (c: char) -> Option<Self> {
        match c {
            'U' => Some(Classification::Unclassified),
            'C' => Some(Classification::Classified),
            'S' => Some(Classification::Secret),
            _ => None
        }
    }
}

impl From<Classification> for sgp4::Classification {
    fn from (c: Classification) -> Self {
        match c {
            Classification::Unclassified => sgp4::Classification::Unclassified,
            Classification::Classified => sgp4::Classification::Classified,
            Classification::Secret => sgp4::Classification::Secret,
        }
    }
}

/// the raw text of an element set as it is distributed by providers such as space-track.org,
/// with an optional title line preceding the two data lines
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct TleElementSet {
    pub title: Option<String>,
    pub line1: String,
    pub line2: String,
}

impl TleElementSet {
    pub fn new (line1: impl Into<String>, line2: impl Into<String>) -> Self {
        TleElementSet { title: None, line1: line1.into(), line2: line2.into() }
    }

    /// split 2-line or 3-line text into an element set. Any line ending convention is accepted and
    /// blank lines are ignored. A title line can carry the "0 " prefix used by 3LE feeds
    pub fn from_text (text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.split(['\n','\r']).filter(|l| !l.trim().is_empty()).collect();

        match lines.as_slice() {
            [] => Err( malformed!(1, "line", "missing line 1")),
            [_] => Err( malformed!(2, "line", "missing line 2")),
            [line1, line2] => Ok( TleElementSet::new( *line1, *line2)),
            [title, line1, line2] => {
                let title = title.trim();
                let title = title.strip_prefix("0 ").unwrap_or(title).trim();
                Ok( TleElementSet { title: Some(title.to_string()), line1: line1.to_string(), line2: line2.to_string() })
            }
            _ => Err( malformed!(0, "text", "expected a single element set, got {} lines", lines.len()))
        }
    }

    pub fn parse (&self) -> Result<OrbitalState> {
        let state = parse( &self.line1, &self.line2)?;
        Ok( match &self.title {
            Some(title) if !title.is_empty() => state.with_name(title),
            _ => state
        })
    }
}

impl fmt::Display for TleElementSet {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{title}")?;
        }
        writeln!(f, "{}", self.line1)?;
        write!(f, "{}", self.line2)
    }
}

/// the mean orbital elements of a body at the element set epoch. Angles are in degrees,
/// mean motion in revolutions per day
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct OrbitalState {
    pub name: Option<String>,
    pub catalog_number: u64,
    pub classification: Classification,
    pub international_designator: Option<String>,
    pub epoch: DateTime<Utc>,

    pub mean_motion_dot: f64,  // first derivative of mean motion / 2 [rev/day²]
    pub mean_motion_ddot: f64, // second derivative of mean motion / 6 [rev/day³]
    pub drag_term: f64,        // B* [1/earth radii]
    pub ephemeris_type: u8,
    pub element_set_number: u64,

    pub inclination: f64,
    pub right_ascension: f64,
    pub eccentricity: f64,
    pub argument_of_perigee: f64,
    pub mean_anomaly: f64,
    pub mean_motion: f64,
    pub revolution_number: u64,
}

impl OrbitalState {
    pub fn with_name (mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// nominal orbit period in minutes
    pub fn period_minutes (&self) -> f64 {
        1440.0 / self.mean_motion
    }

    /// time elapsed between epoch and `t`
    pub fn age_at (&self, t: DateTime<Utc>) -> TimeDelta {
        t - self.epoch
    }

    pub(crate) fn to_elements (&self) -> sgp4::Elements {
        sgp4::Elements {
            object_name: self.name.clone(),
            international_designator: self.international_designator.clone(),
            norad_id: self.catalog_number,
            classification: self.classification.into(),
            datetime: self.epoch.naive_utc(),
            mean_motion_dot: self.mean_motion_dot,
            mean_motion_ddot: self.mean_motion_ddot,
            drag_term: self.drag_term,
            element_set_number: self.element_set_number,
            inclination: self.inclination,
            right_ascension: self.right_ascension,
            eccentricity: self.eccentricity,
            argument_of_perigee: self.argument_of_perigee,
            mean_anomaly: self.mean_anomaly,
            mean_motion: self.mean_motion,
            revolution_number: self.revolution_number,
            ephemeris_type: self.ephemeris_type,
        }
    }
}

/// parse the two data lines of an element set. Trailing whitespace (including carriage returns)
/// is ignored, everything else has to match the fixed column layout
pub fn parse (line1: &str, line2: &str) -> Result<OrbitalState> {
    let l1 = Columns::new( 1, line1)?;
    let l2 = Columns::new( 2, line2)?;
    l1.check_separators( &LINE1_SEPARATORS)?;
    l2.check_separators( &LINE2_SEPARATORS)?;

    let catalog_number: u64 = l1.int( "catalog number", 3, 7)?;
    let classification = l1.get(8,8).chars().next()
        .and_then( Classification::from_char)
        .ok_or_else( || malformed!(1, "classification", "expected U, C or S, got {:?}", l1.get(8,8)))?;
    let international_designator = Some( l1.get(10,17).trim()).filter(|s| !s.is_empty()).map(str::to_string);
    let epoch = l1.epoch()?;
    let mean_motion_dot: f64 = l1.float( "mean motion dot", 34, 43)?;
    let mean_motion_ddot = l1.exp_float( "mean motion ddot", 45, 52)?;
    let drag_term = l1.exp_float( "drag term", 54, 61)?;
    let ephemeris_type: u8 = l1.int_or_zero( "ephemeris type", 63, 63)?;
    let element_set_number: u64 = l1.int_or_zero( "element set number", 65, 68)?;
    l1.int::<u8>( "checksum", 69, 69)?;

    let catalog_number_2: u64 = l2.int( "catalog number", 3, 7)?;
    if catalog_number_2 != catalog_number {
        return Err( malformed!(2, "catalog number", "{} does not match line 1 catalog number {}", catalog_number_2, catalog_number))
    }
    let inclination = l2.angle( "inclination", 9, 16, 180.0)?;
    let right_ascension = l2.angle( "right ascension", 18, 25, 360.0)?;
    let eccentricity = l2.implied_decimal( "eccentricity", 27, 33)?;
    let argument_of_perigee = l2.angle( "argument of perigee", 35, 42, 360.0)?;
    let mean_anomaly = l2.angle( "mean anomaly", 44, 51, 360.0)?;
    let mean_motion: f64 = l2.float( "mean motion", 53, 63)?;
    if !(mean_motion > 0.0) {
        return Err( malformed!(2, "mean motion", "not a positive number: {}", mean_motion))
    }
    let revolution_number: u64 = l2.int_or_zero( "revolution number", 64, 68)?;
    l2.int::<u8>( "checksum", 69, 69)?;

    Ok( OrbitalState {
        name: None,
        catalog_number, classification, international_designator, epoch,
        mean_motion_dot, mean_motion_ddot, drag_term, ephemeris_type, element_set_number,
        inclination, right_ascension, eccentricity, argument_of_perigee, mean_anomaly, mean_motion, revolution_number
    })
}

/// parse 2-line or 3-line element set text. If there is a title line it becomes the state name
pub fn parse_text (text: &str) -> Result<OrbitalState> {
    TleElementSet::from_text(text)?.parse()
}

/* #region column access ***********************************************************************/

struct Columns<'a> {
    line_no: u8,
    text: &'a str,
}

impl<'a> Columns<'a> {
    fn new (line_no: u8, raw: &'a str) -> Result<Self> {
        let text = raw.trim_end();
        if text.is_empty() {
            return Err( malformed!(line_no, "line", "missing line {}", line_no))
        }
        if !text.is_ascii() {
            return Err( malformed!(line_no, "line", "non-ASCII characters"))
        }
        if text.len() != TLE_LINE_LEN {
            return Err( malformed!(line_no, "line", "expected {} columns, got {}", TLE_LINE_LEN, text.len()))
        }

        let cols = Columns { line_no, text };
        let n = cols.get(1,1);
        if n != line_no.to_string() {
            return Err( malformed!(line_no, "line number", "expected {}, got {:?}", line_no, n))
        }
        Ok(cols)
    }

    /// text of the 1-based inclusive column range. Lines are ASCII so bytes are columns
    fn get (&self, start: usize, end: usize) -> &'a str {
        &self.text[start-1..end]
    }

    fn check_separators (&self, cols: &[usize]) -> Result<()> {
        for &c in cols {
            if self.get(c,c) != " " {
                return Err( malformed!(self.line_no, "separator", "expected blank at column {}, got {:?}", c, self.get(c,c)))
            }
        }
        Ok(())
    }

    fn int<T: FromStr> (&self, field: &'static str, start: usize, end: usize) -> Result<T> {
        let s = self.get(start,end).trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err( self.error( field, format!("not an unsigned integer: {:?}", self.get(start,end))))
        }
        s.parse::<T>().map_err(|_| self.error( field, format!("integer out of range: {s}")))
    }

    fn int_or_zero<T: FromStr + Default> (&self, field: &'static str, start: usize, end: usize) -> Result<T> {
        if self.get(start,end).trim().is_empty() { Ok(T::default()) } else { self.int(field, start, end) }
    }

    /// fixed point decimal: optional sign, digits and at most one '.'
    fn float (&self, field: &'static str, start: usize, end: usize) -> Result<f64> {
        let s = self.get(start,end).trim();
        let unsigned = s.strip_prefix(['+','-']).unwrap_or(s);
        let is_fixed_point = unsigned.bytes().any(|b| b.is_ascii_digit())
            && unsigned.bytes().all(|b| b.is_ascii_digit() || b == b'.')
            && unsigned.bytes().filter(|b| *b == b'.').count() <= 1;
        if !is_fixed_point {
            return Err( self.error( field, format!("not a decimal number: {:?}", self.get(start,end))))
        }

        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err( self.error( field, format!("not a decimal number: {:?}", self.get(start,end))))
        }
    }

    fn angle (&self, field: &'static str, start: usize, end: usize, max: f64) -> Result<f64> {
        let v = self.float(field, start, end)?;
        if v < 0.0 || v > max {
            return Err( self.error( field, format!("{v} outside of [0,{max}]")))
        }
        Ok(v)
    }

    /// digits with an implied leading decimal point, e.g. "0001413" -> 0.0001413
    fn implied_decimal (&self, field: &'static str, start: usize, end: usize) -> Result<f64> {
        let s = self.get(start,end);
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err( self.error( field, format!("not a digit sequence: {s:?}")))
        }
        format!("0.{s}").parse::<f64>().map_err(|_| self.error( field, format!("invalid value {s:?}")))
    }

    /// assumed-decimal mantissa with a signed single digit exponent, e.g. "-31515-4" -> -0.31515e-4
    fn exp_float (&self, field: &'static str, start: usize, end: usize) -> Result<f64> {
        let s = self.get(start,end).trim();
        if s.len() < 3 {
            return Err( self.error( field, format!("too short: {s:?}")))
        }

        let (mantissa, exponent) = s.split_at( s.len()-2);
        let exp: i32 = match exponent.as_bytes() {
            [b'+' | b'-', d] if d.is_ascii_digit() => exponent.parse().map_err(|_| self.error( field, format!("invalid exponent {exponent:?}")))?,
            _ => return Err( self.error( field, format!("invalid exponent {exponent:?}")))
        };

        let (negative, digits) = match mantissa.as_bytes().first() {
            Some(b'-') => (true, &mantissa[1..]),
            Some(b'+') => (false, &mantissa[1..]),
            _ => (false, mantissa)
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err( self.error( field, format!("invalid mantissa {mantissa:?}")))
        }

        let m: f64 = format!("0.{digits}").parse().map_err(|_| self.error( field, format!("invalid mantissa {mantissa:?}")))?;
        let v = m * 10f64.powi(exp);
        Ok( if negative { -v } else { v })
    }

    /// two-digit year in columns 19-20 and fractional day-of-year in columns 21-32 (day 1.0 is Jan 1 00:00 UTC)
    fn epoch (&self) -> Result<DateTime<Utc>> {
        let yy: u32 = self.int( "epoch year", 19, 20)?;
        let day = self.float( "epoch day", 21, 32)?;

        let year = if yy < EPOCH_CENTURY_PIVOT { 2000 + yy } else { 1900 + yy };
        let days_in_year = if NaiveDate::from_ymd_opt( year as i32, 2, 29).is_some() { 366.0 } else { 365.0 };
        if day < 1.0 || day >= days_in_year + 1.0 {
            return Err( self.error( "epoch day", format!("day {day} outside of year {year}")))
        }

        let jan1: NaiveDateTime = NaiveDate::from_yo_opt( year as i32, 1)
            .and_then( |d| d.and_hms_opt(0,0,0))
            .ok_or_else( || self.error( "epoch year", format!("invalid year {year}")))?;
        let nanos = ((day - 1.0) * 86_400.0e9).round() as i64;

        Ok( DateTime::<Utc>::from_naive_utc_and_offset( jan1 + TimeDelta::nanoseconds(nanos), Utc))
    }

    fn error (&self, field: &'static str, reason: String) -> GtrackOrbitalError {
        GtrackOrbitalError::MalformedElementSet { line: self.line_no, field, reason }
    }
}

/* #endregion column access */
