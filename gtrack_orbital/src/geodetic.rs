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

//! conversion of inertial (TEME) positions into geodetic latitude/longitude on the WGS84 ellipsoid

use chrono::{DateTime, Utc};
use nalgebra::{Rotation3, Vector3};
use gtrack_common::{angle::normalize_180, cartesian3::Cartesian3, cartographic::Cartographic};
use crate::propagator::EarthCenteredPosition;

pub use gtrack_common::angle::{Dms, dms_to_decimal, decimal_to_dms};

/// Greenwich mean sidereal angle in radians (IAU 1982 model)
pub fn gmst (t: &DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time( sgp4::julian_years_since_j2000( &t.naive_utc()))
}

/// rotate a TEME position around the polar axis into the earth fixed frame (ECEF, meters).
/// Polar motion and the equation of the equinoxes are ignored
pub fn teme_to_ecef (ecp: &EarthCenteredPosition, t: &DateTime<Utc>) -> Cartesian3 {
    let rot = Rotation3::from_axis_angle( &Vector3::z_axis(), -gmst(t));
    Cartesian3::from_vector3( &(rot * ecp.position * 1000.0))
}

/// geodetic position (WGS84) of `ecp` at instant `t`
pub fn to_cartographic (ecp: &EarthCenteredPosition, t: &DateTime<Utc>) -> Cartographic {
    Cartographic::from( teme_to_ecef( ecp, t))
}

/// geodetic (latitude, longitude) of `ecp` at instant `t` as degrees-minutes-seconds.
/// Latitude is within [-90,90], longitude within [-180,180] (east positive)
pub fn to_geodetic (ecp: &EarthCenteredPosition, t: DateTime<Utc>) -> (Dms, Dms) {
    let c = to_cartographic( ecp, &t);
    let lat = c.latitude_deg().clamp( -90.0, 90.0);
    let lon = normalize_180( c.longitude_deg());

    (decimal_to_dms(lat), decimal_to_dms(lon))
}
