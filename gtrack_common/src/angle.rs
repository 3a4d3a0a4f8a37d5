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

use std::fmt;
use serde::{Serialize,Deserialize};

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;
    
    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

/* #region degrees-minutes-seconds ***************************************************************/

/// degrees-minutes-seconds representation of an angle.
/// The sign is carried by `degrees` (which can be a negative zero for angles in ]-1°..0°[), 
/// `minutes` and `seconds` are always non-negative magnitudes. `degrees` and `minutes` are whole
/// numbers if the value was computed with `Dms::from_decimal(..)`
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Dms {
    pub fn new (degrees: f64, minutes: f64, seconds: f64)->Self {
        Dms { degrees, minutes, seconds }
    }

    pub fn from_decimal (deg: f64)->Self {
        decimal_to_dms(deg)
    }

    pub fn to_decimal (&self)->f64 {
        dms_to_decimal( self.degrees, self.minutes, self.seconds)
    }

    #[inline] pub fn is_negative (&self)->bool { self.degrees.is_sign_negative() }
}

impl fmt::Display for Dms {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}°{:02}′{:06.3}″", sign, self.degrees.abs(), self.minutes, self.seconds)
    }
}

impl From<Dms> for f64 {
    fn from (dms: Dms) -> Self { dms.to_decimal() }
}

/// convert degrees-minutes-seconds into decimal degrees.
/// The sign of `degrees` applies to the whole value, i.e. `dms_to_decimal(-33.0, 30.0, 0.0) == -33.5`.
/// Use `-0.0` degrees for negative angles above -1°
pub fn dms_to_decimal (degrees: f64, minutes: f64, seconds: f64) -> f64 {
    let magnitude = degrees.abs() + minutes.abs()/60.0 + seconds.abs()/3600.0;
    if degrees.is_sign_negative() { -magnitude } else { magnitude }
}

/// split decimal degrees into whole degrees, whole minutes and fractional seconds
pub fn decimal_to_dms (deg: f64) -> Dms {
    let a = deg.abs();
    let d = a.trunc();
    let m = (a - d) * 60.0;
    let minutes = m.trunc();
    let seconds = (m - minutes) * 60.0;

    let degrees = if deg.is_sign_negative() { -d } else { d };
    Dms { degrees, minutes, seconds }
}

/* #endregion degrees-minutes-seconds */
