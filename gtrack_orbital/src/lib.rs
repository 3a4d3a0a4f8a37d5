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

//! ground track computation for orbiting bodies: parsing of two-line element sets, SGP4
//! propagation, conversion into geodetic positions and assembly of ground tracks over a
//! time window, plus acquisition of element sets and rendering of tracks into map layers

use gtrack_build::define_load_config;

pub mod errors;
pub mod tle;
pub mod propagator;
pub mod geodetic;
pub mod ground_track;
pub mod spacetrack;
pub mod cities;
pub mod layers;

pub use errors::{GtrackOrbitalError, Result};
pub use tle::{OrbitalState, TleElementSet, parse, parse_text};
pub use propagator::{EarthCenteredPosition, Propagator, propagate};
pub use geodetic::{Dms, dms_to_decimal, decimal_to_dms, to_geodetic};
pub use ground_track::{GeodeticPosition, GroundTrack, GroundTrackConfig, TrackWindow, build};

define_load_config!{}
