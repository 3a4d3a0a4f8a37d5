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

use std::ops::Range;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use gtrack_build::GtrackBuildError;
use gtrack_common::datetime::ser_short_rfc3339;
use crate::{
    errors::{GtrackOrbitalError, Result, config_error},
    geodetic::{dms_to_decimal, to_geodetic},
    propagator::Propagator,
    tle::OrbitalState,
};

pub const DEFAULT_BODY_NAME: &str = "tracked body";
pub const DEFAULT_WINDOW_MINUTES: (i64,i64) = (-90, 89);
pub const DEFAULT_STEP_MINUTES: i64 = 1;

/// bound for window offsets (one year)
pub const MAX_OFFSET_MINUTES: i64 = 366 * 24 * 60;

/// configuration of ground track computation (`ground_track.ron`). All fields are optional
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct GroundTrackConfig {
    pub window_minutes: (i64,i64),
    pub step_minutes: i64,
    pub body_name: String,
}

impl Default for GroundTrackConfig {
    fn default() -> Self {
        GroundTrackConfig {
            window_minutes: DEFAULT_WINDOW_MINUTES,
            step_minutes: DEFAULT_STEP_MINUTES,
            body_name: DEFAULT_BODY_NAME.to_string(),
        }
    }
}

/// load `ground_track.ron`, falling back to the defaults if there is no such config file
pub fn load_ground_track_config () -> Result<GroundTrackConfig> {
    match crate::load_config("ground_track.ron") {
        Ok(config) => Ok(config),
        Err(GtrackBuildError::ResourceNotFoundError(_)) => Ok( GroundTrackConfig::default()),
        Err(e) => Err(e.into())
    }
}

impl GroundTrackConfig {
    pub fn from_ron (s: &str) -> Result<Self> {
        Ok( ron::from_str(s)? )
    }

    pub fn window (&self) -> Result<TrackWindow> {
        TrackWindow::new( self.window_minutes.0, self.window_minutes.1, self.step_minutes)
    }
}

/// validated range of time offsets (in minutes) relative to a reference instant. Offsets start
/// at `min_offset` and are `step` minutes apart. Offset 0 is always part of the window
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize)]
pub struct TrackWindow {
    min_offset: i64,
    max_offset: i64,
    step: i64,
}

impl TrackWindow {
    pub fn new (min_offset: i64, max_offset: i64, step: i64) -> Result<Self> {
        if step <= 0 {
            return Err( config_error!("window step has to be positive: {}", step))
        }
        if min_offset > 0 || max_offset < 0 {
            return Err( config_error!("window ({},{}) does not include the reference instant", min_offset, max_offset))
        }
        if min_offset < -MAX_OFFSET_MINUTES || max_offset > MAX_OFFSET_MINUTES {
            return Err( config_error!("window ({},{}) exceeds ±{} minutes", min_offset, max_offset, MAX_OFFSET_MINUTES))
        }
        if min_offset % step != 0 {
            return Err( config_error!("offset 0 is not on the {} minute grid starting at {}", step, min_offset))
        }
        Ok( TrackWindow { min_offset, max_offset, step } )
    }

    pub fn min_offset (&self) -> i64 { self.min_offset }
    pub fn max_offset (&self) -> i64 { self.max_offset }
    pub fn step (&self) -> i64 { self.step }

    /// increasing offsets of the window
    pub fn offsets (&self) -> impl Iterator<Item=i64> + use<> {
        (self.min_offset..=self.max_offset).step_by( self.step as usize)
    }

    pub fn len (&self) -> usize {
        ((self.max_offset - self.min_offset) / self.step) as usize + 1
    }

    /// position of `offset` within the window, if it is a window offset
    pub fn index_of (&self, offset: i64) -> Option<usize> {
        if offset < self.min_offset || offset > self.max_offset || (offset - self.min_offset) % self.step != 0 {
            None
        } else {
            Some( ((offset - self.min_offset) / self.step) as usize )
        }
    }

    pub fn offset_at (&self, idx: usize) -> Option<i64> {
        if idx < self.len() { Some( self.min_offset + idx as i64 * self.step) } else { None }
    }
}

impl Default for TrackWindow {
    fn default() -> Self {
        TrackWindow { min_offset: DEFAULT_WINDOW_MINUTES.0, max_offset: DEFAULT_WINDOW_MINUTES.1, step: DEFAULT_STEP_MINUTES }
    }
}

/// geodetic position (decimal degrees) of a named body at a given time
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct GeodeticPosition {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(serialize_with = "ser_short_rfc3339")]
    pub timestamp: DateTime<Utc>,
}

/// positions of a body over a `TrackWindow`, ordered by increasing time offset
#[derive(Debug,Clone,Serialize)]
pub struct GroundTrack {
    body_name: String,
    #[serde(serialize_with = "ser_short_rfc3339")]
    reference_instant: DateTime<Utc>,
    window: TrackWindow,
    positions: Vec<GeodeticPosition>,
}

impl GroundTrack {
    pub fn body_name (&self) -> &str { &self.body_name }
    pub fn reference_instant (&self) -> DateTime<Utc> { self.reference_instant }
    pub fn window (&self) -> &TrackWindow { &self.window }
    pub fn positions (&self) -> &[GeodeticPosition] { &self.positions }

    pub fn len (&self) -> usize { self.positions.len() }
    pub fn is_empty (&self) -> bool { self.positions.is_empty() }

    pub fn position_at (&self, offset: i64) -> Option<&GeodeticPosition> {
        self.window.index_of(offset).and_then( |i| self.positions.get(i))
    }

    /// (offset, position) pairs in increasing offset order
    pub fn iter (&self) -> impl Iterator<Item=(i64,&GeodeticPosition)> {
        self.window.offsets().zip( self.positions.iter())
    }

    pub fn current_index (&self) -> usize {
        (-self.window.min_offset / self.window.step) as usize
    }

    /// the position at the reference instant
    pub fn current (&self) -> &GeodeticPosition {
        &self.positions[self.current_index()]
    }

    /// positions before the reference instant
    pub fn historical (&self) -> &[GeodeticPosition] {
        &self.positions[self.historical_range()]
    }

    /// positions after the reference instant
    pub fn future (&self) -> &[GeodeticPosition] {
        &self.positions[self.future_range()]
    }

    pub fn historical_range (&self) -> Range<usize> { 0..self.current_index() }
    pub fn future_range (&self) -> Range<usize> { self.current_index()+1..self.positions.len() }
}

/// compute the ground track of `state` for all offsets of `window` around `reference_instant`.
/// The first propagation failure aborts the computation
pub fn build (state: &OrbitalState, body_name: &str, reference_instant: DateTime<Utc>, window: &TrackWindow) -> Result<GroundTrack> {
    let propagator = Propagator::new(state)?;

    let positions = window.offsets().map( |offset| {
        let ecp = propagator.propagate( reference_instant, offset)?;
        let timestamp = reference_instant + TimeDelta::minutes(offset);
        let (lat, lon) = to_geodetic( &ecp, timestamp);

        Ok( GeodeticPosition {
            name: body_name.to_string(),
            latitude: dms_to_decimal( lat.degrees, lat.minutes, lat.seconds),
            longitude: dms_to_decimal( lon.degrees, lon.minutes, lon.seconds),
            timestamp,
        })
    }).collect::<Result<Vec<GeodeticPosition>>>()?;

    debug!("computed {} ground track positions of {} for {}", positions.len(), body_name, reference_instant);
    Ok( GroundTrack { body_name: body_name.to_string(), reference_instant, window: *window, positions } )
}

/// build with the window and body name of a `GroundTrackConfig`. A name of the orbital state
/// takes precedence over the configured name
pub fn build_configured (state: &OrbitalState, config: &GroundTrackConfig, reference_instant: DateTime<Utc>) -> Result<GroundTrack> {
    let window = config.window()?;
    let body_name = state.name.as_deref().unwrap_or( &config.body_name);
    build( state, body_name, reference_instant, &window)
}
