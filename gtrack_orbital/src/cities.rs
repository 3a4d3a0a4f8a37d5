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

use std::{io, path::Path};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::errors::{GtrackOrbitalError, Result, op_failed};

/// a city reference point for map display. Reads records with headers `city,lat,lng,population`
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct CityInfo {
    #[serde(alias = "city")]
    pub name: String,

    #[serde(alias = "lat")]
    pub latitude: f64,

    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,

    #[serde(default)]
    pub population: Option<u64>,
}

pub fn load_cities<P: AsRef<Path>> (path: P) -> Result<Vec<CityInfo>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let cities = read_cities(file)?;
    debug!("loaded {} cities from {:?}", cities.len(), path);
    Ok(cities)
}

/// read city records from CSV text. Records with coordinates outside of the valid ranges are
/// rejected with an error naming the (1-based) record
pub fn read_cities<R: io::Read> (rdr: R) -> Result<Vec<CityInfo>> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut cities = Vec::new();

    for (i, rec) in reader.deserialize::<CityInfo>().enumerate() {
        let city = rec?;
        if !(-90.0..=90.0).contains(&city.latitude) || !(-180.0..=180.0).contains(&city.longitude) {
            return Err( op_failed!("city record {} ({}) has invalid coordinates {},{}", i+1, city.name, city.latitude, city.longitude))
        }
        cities.push(city);
    }

    Ok(cities)
}
