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

//! a minimal web map server for the ground track of a single body. The element set is acquired
//! once at startup, tracks are recomputed for the current time on each request
//!
//!    GET /                 map page
//!    GET /track.geojson    historical path, future path and current position
//!    GET /cities.geojson   configured city reference points

use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use geojson::FeatureCollection;
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use gtrack_common::{datetime::utc_now_secs, fs::filepath_contents_as_string};
use gtrack_orbital::{
    load_config, build, parse_text, OrbitalState, TrackWindow,
    cities::{CityInfo, load_cities},
    ground_track::load_ground_track_config,
    layers::{cities_layer, map_layers},
    spacetrack::{SpaceTrackClient, SpaceTrackConfig},
};

const MAP_PAGE: &str = include_str!("../../assets/track_map.html");

/// server configuration (`track_server.ron`)
#[derive(Deserialize,Debug)]
struct TrackServerConfig {
    sock_addr: SocketAddr,

    #[serde(default)]
    cities: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = "serve a web map with the ground track of an orbiting body")]
pub struct Args {
    /// TLE file (2 or 3 lines). If not set the TLE is retrieved from space-track.org
    #[arg(short,long)]
    pub tle: Option<PathBuf>,

    /// cities CSV, overrides the configured one
    #[arg(short,long)]
    pub cities: Option<PathBuf>,
}

struct AppState {
    state: OrbitalState,
    body_name: String,
    window: TrackWindow,
    cities: Vec<CityInfo>,
}

#[tokio::main]
async fn main () -> Result<()> {
    gtrack_build::set_bin_context!();
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let server_config: TrackServerConfig = load_config("track_server.ron")?;
    let track_config = load_ground_track_config()?;
    let window = track_config.window()?;

    let state = match &args.tle {
        Some(path) => parse_text( &filepath_contents_as_string( path)?)?,
        None => {
            let config: SpaceTrackConfig = load_config("spacetrack.ron")?;
            SpaceTrackClient::new( config).fetch_orbital_state().await?
        }
    };
    let body_name = state.name.clone().unwrap_or_else( || track_config.body_name.clone());

    let cities = match args.cities.as_ref().or( server_config.cities.as_ref()) {
        Some(path) => load_cities( path)?,
        None => Vec::new()
    };

    let app_state = Arc::new( AppState { state, body_name, window, cities });
    let router = Router::new()
        .route( "/", get(index))
        .route( "/track.geojson", get(get_track))
        .route( "/cities.geojson", get(get_cities))
        .with_state( app_state);

    let listener = TcpListener::bind( server_config.sock_addr).await?;
    info!("serving http://{}/", server_config.sock_addr);
    axum::serve( listener, router).await?;

    Ok(())
}

async fn index () -> Html<&'static str> {
    Html(MAP_PAGE)
}

async fn get_track (State(app): State<Arc<AppState>>) -> Response {
    match build( &app.state, &app.body_name, utc_now_secs(), &app.window) {
        Ok(track) => Json( map_layers( &track, &[])).into_response(),
        Err(e) => {
            warn!("ground track computation failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn get_cities (State(app): State<Arc<AppState>>) -> Json<FeatureCollection> {
    Json( cities_layer( &app.cities))
}
