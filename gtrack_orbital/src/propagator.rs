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
use nalgebra::Vector3;
use tracing::trace;
use gtrack_common::geo_constants::EQATORIAL_EARTH_RADIUS;
use crate::{errors::{GtrackOrbitalError, Result, diverged}, tle::OrbitalState};

/// position [km] and velocity [km/s] in the True Equator Mean Equinox (TEME) frame
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct EarthCenteredPosition {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl EarthCenteredPosition {
    pub fn radius_km (&self) -> f64 {
        self.position.norm()
    }

    pub fn speed_km_s (&self) -> f64 {
        self.velocity.norm()
    }
}

/// SGP4 orbit model initialized from an orbital state. Initialization is the expensive part so
/// a propagator should be re-used for all instants computed from the same state
pub struct Propagator {
    catalog_number: u64,
    epoch: DateTime<Utc>,
    constants: sgp4::Constants,
}

impl Propagator {
    pub fn new (state: &OrbitalState) -> Result<Self> {
        let elements = state.to_elements();
        let constants = sgp4::Constants::from_elements( &elements)
            .map_err( |e| diverged!(None, "orbit model initialization failed: {}", e))?;

        Ok( Propagator { catalog_number: state.catalog_number, epoch: state.epoch, constants } )
    }

    pub fn catalog_number (&self) -> u64 { self.catalog_number }

    pub fn epoch (&self) -> DateTime<Utc> { self.epoch }

    /// position at `reference_instant + offset_minutes`
    pub fn propagate (&self, reference_instant: DateTime<Utc>, offset_minutes: i64) -> Result<EarthCenteredPosition> {
        let t = TimeDelta::try_minutes(offset_minutes)
            .and_then( |d| reference_instant.checked_add_signed(d))
            .ok_or_else( || diverged!(Some(offset_minutes), "target instant out of range"))?;
        self.propagate_to(t).map_err( |reason| diverged!(Some(offset_minutes), "{}", reason))
    }

    /// position at instant `t`. Errors are reported as plain reasons so that callers can attach the
    /// time offset they are interested in
    fn propagate_to (&self, t: DateTime<Utc>) -> std::result::Result<EarthCenteredPosition, String> {
        let dt = t - self.epoch;
        let minutes = (dt.num_seconds() as f64 + dt.subsec_nanos() as f64 * 1e-9) / 60.0;

        let prediction = self.constants.propagate( sgp4::MinutesSinceEpoch(minutes))
            .map_err( |e| format!("model error at {minutes:.3} min since epoch: {e}"))?;

        let position = Vector3::from( prediction.position);
        let velocity = Vector3::from( prediction.velocity);
        trace!("sat {} at {t}: r={:.3} km", self.catalog_number, position.norm());

        if !(position.iter().all(|v| v.is_finite()) && velocity.iter().all(|v| v.is_finite())) {
            return Err( format!("non-finite state vector at {minutes:.3} min since epoch"))
        }

        let r = position.norm();
        if r < EQATORIAL_EARTH_RADIUS / 1000.0 {
            return Err( format!("orbit radius {r:.3} km below earth surface (decayed)"))
        }

        Ok( EarthCenteredPosition { position, velocity } )
    }
}

/// one-shot propagation of `state` to `reference_instant + offset_minutes`
pub fn propagate (state: &OrbitalState, reference_instant: DateTime<Utc>, offset_minutes: i64) -> Result<EarthCenteredPosition> {
    Propagator::new(state)?.propagate( reference_instant, offset_minutes)
}
