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

//! GeoJSON map layers for ground tracks and city reference points

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use gtrack_common::{cartographic::Cartographic, datetime::short_utc_datetime_string};
use crate::{cities::CityInfo, ground_track::{GeodeticPosition, GroundTrack}};

pub const CITIES_LAYER: &str = "Cities";
pub const HISTORICAL_PATH_LAYER: &str = "Historical Path";
pub const FUTURE_PATH_LAYER: &str = "Future Path";
pub const CURRENT_POSITION_LAYER: &str = "Current Position";

/// all layers of a map showing the ground track and the (possibly empty) cities
pub fn map_layers (track: &GroundTrack, cities: &[CityInfo]) -> FeatureCollection {
    let mut features = city_features(cities);
    features.extend( track_features(track));
    FeatureCollection { bbox: None, features, foreign_members: None }
}

pub fn cities_layer (cities: &[CityInfo]) -> FeatureCollection {
    FeatureCollection { bbox: None, features: city_features(cities), foreign_members: None }
}

pub fn city_features (cities: &[CityInfo]) -> Vec<Feature> {
    cities.iter().map( |city| {
        let mut props = JsonObject::new();
        props.insert( "layer".to_string(), JsonValue::from(CITIES_LAYER));
        props.insert( "name".to_string(), JsonValue::from(city.name.as_str()));
        props.insert( "population".to_string(), city.population.map(JsonValue::from).unwrap_or(JsonValue::Null));
        feature( Value::Point( vec![city.longitude, city.latitude]), props)
    }).collect()
}

/// historical path (including the current position), future path (including the current
/// position) and current position features of a ground track
pub fn track_features (track: &GroundTrack) -> Vec<Feature> {
    let positions = track.positions();
    let i = track.current_index();

    vec![
        path_feature( HISTORICAL_PATH_LAYER, track.body_name(), &positions[..=i]),
        path_feature( FUTURE_PATH_LAYER, track.body_name(), &positions[i..]),
        position_feature( CURRENT_POSITION_LAYER, track.current()),
    ]
}

fn path_feature (layer: &str, name: &str, positions: &[GeodeticPosition]) -> Feature {
    let mut props = layer_props( layer, name);
    if let (Some(first), Some(last)) = (positions.first(), positions.last()) {
        props.insert( "start".to_string(), JsonValue::from( short_utc_datetime_string( &first.timestamp)));
        props.insert( "end".to_string(), JsonValue::from( short_utc_datetime_string( &last.timestamp)));
    }
    props.insert( "length_km".to_string(), JsonValue::from( ground_distance_km( positions)));
    props.insert( "timestamps".to_string(),
        JsonValue::from( positions.iter().map( |p| short_utc_datetime_string( &p.timestamp)).collect::<Vec<String>>()));

    feature( Value::MultiLineString( split_at_antimeridian( positions)), props)
}

fn position_feature (layer: &str, pos: &GeodeticPosition) -> Feature {
    let mut props = layer_props( layer, &pos.name);
    props.insert( "timestamp".to_string(), JsonValue::from( short_utc_datetime_string( &pos.timestamp)));
    feature( Value::Point( vec![pos.longitude, pos.latitude]), props)
}

/// split a position sequence into line segments wherever consecutive positions are more than
/// 180° of longitude apart, i.e. the track crosses the antimeridian
pub fn split_at_antimeridian (positions: &[GeodeticPosition]) -> Vec<Vec<Vec<f64>>> {
    let mut segments: Vec<Vec<Vec<f64>>> = Vec::new();
    let mut segment: Vec<Vec<f64>> = Vec::new();
    let mut last_lon: Option<f64> = None;

    for p in positions {
        if let Some(lon) = last_lon {
            if (p.longitude - lon).abs() > 180.0 && !segment.is_empty() {
                segments.push( std::mem::take(&mut segment));
            }
        }
        segment.push( vec![p.longitude, p.latitude]);
        last_lon = Some(p.longitude);
    }
    if !segment.is_empty() {
        segments.push(segment);
    }

    segments
}

/// great circle length in km of the ground path through `positions`
pub fn ground_distance_km (positions: &[GeodeticPosition]) -> f64 {
    positions.windows(2).map( |w| {
        let a = Cartographic::from_degrees( w[0].longitude, w[0].latitude, 0.0);
        let b = Cartographic::from_degrees( w[1].longitude, w[1].latitude, 0.0);
        a.gc_distance(&b)
    }).sum::<f64>() / 1000.0
}

fn layer_props (layer: &str, name: &str) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert( "layer".to_string(), JsonValue::from(layer));
    props.insert( "name".to_string(), JsonValue::from(name));
    props
}

fn feature (value: Value, props: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some( Geometry::new(value)),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}
