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

use std::path::PathBuf;
use anyhow::{Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use gtrack_common::{datetime::{parse_datetime, short_utc_datetime_string, utc_now_secs}, fs::filepath_contents_as_string};
use gtrack_orbital::{
    load_config, build, parse_text, OrbitalState, TrackWindow,
    ground_track::load_ground_track_config,
    cities::load_cities, layers::map_layers, spacetrack::{SpaceTrackClient, SpaceTrackConfig},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "compute the ground track of an orbiting body from its TLE")]
pub struct Args {
    /// TLE file (2 or 3 lines). If not set the TLE is retrieved from space-track.org
    #[arg(short,long)]
    pub tle: Option<PathBuf>,

    /// reference instant (RFC3339, e.g. "2020-07-13T12:00:00Z"), defaults to now
    #[arg(short,long)]
    pub reference: Option<String>,

    /// body name, overrides TLE title and configured name
    #[arg(short,long)]
    pub name: Option<String>,

    /// first window offset in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub min_offset: Option<i64>,

    /// last window offset in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub max_offset: Option<i64>,

    /// window step in minutes
    #[arg(long)]
    pub step: Option<i64>,

    /// cities CSV to include in GeoJSON output
    #[arg(short,long)]
    pub cities: Option<PathBuf>,

    /// print GeoJSON map layers instead of a table
    #[arg(short,long)]
    pub geojson: bool,
}

#[tokio::main]
async fn main () -> Result<()> {
    gtrack_build::set_bin_context!();
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .with_writer( std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_ground_track_config()?;

    let window = TrackWindow::new(
        args.min_offset.unwrap_or( config.window_minutes.0),
        args.max_offset.unwrap_or( config.window_minutes.1),
        args.step.unwrap_or( config.step_minutes)
    )?;

    let reference_instant = match &args.reference {
        Some(spec) => parse_datetime( spec).ok_or_else( || anyhow!("invalid reference instant {spec}"))?,
        None => utc_now_secs()
    };

    let state = get_orbital_state( &args).await?;
    let body_name = args.name.as_deref().or( state.name.as_deref()).unwrap_or( &config.body_name);

    let track = build( &state, body_name, reference_instant, &window)?;

    if args.geojson {
        let cities = match &args.cities {
            Some(path) => load_cities( path)?,
            None => Vec::new()
        };
        println!("{}", serde_json::to_string_pretty( &map_layers( &track, &cities))?);

    } else {
        println!("ground track of {} (catalog {}, epoch {}) for {}", body_name, state.catalog_number,
                 short_utc_datetime_string( &state.epoch), short_utc_datetime_string( &reference_instant));
        println!("offset  timestamp              latitude    longitude");
        for (offset, p) in track.iter() {
            let mark = if offset == 0 { "*" } else { " " };
            println!("{:>5}{} {}  {:>10.5}  {:>11.5}", offset, mark, short_utc_datetime_string( &p.timestamp), p.latitude, p.longitude);
        }
    }

    Ok(())
}

async fn get_orbital_state (args: &Args) -> Result<OrbitalState> {
    match &args.tle {
        Some(path) => {
            let text = filepath_contents_as_string( path)?;
            Ok( parse_text( &text)? )
        }
        None => {
            let config: SpaceTrackConfig = load_config("spacetrack.ron")?;
            Ok( SpaceTrackClient::new( config).fetch_orbital_state().await? )
        }
    }
}
