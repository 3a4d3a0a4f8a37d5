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

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use gtrack_common::datetime::{short_utc_datetime_string, utc_now_secs};
use gtrack_orbital::{load_config, spacetrack::{SpaceTrackClient, SpaceTrackConfig}};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "retrieve the current TLE of a body from space-track.org")]
pub struct Args {
    /// NORAD catalog id, defaults to the configured one
    #[arg(short,long)]
    pub norad_cat_id: Option<u32>,
}

#[tokio::main]
async fn main () -> Result<()> {
    gtrack_build::set_bin_context!();
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .with_writer( std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config: SpaceTrackConfig = load_config("spacetrack.ron")?;
    if let Some(id) = args.norad_cat_id {
        config.norad_cat_id = id;
    }

    let client = SpaceTrackClient::new( config);
    let tle = client.fetch_element_set().await?;
    let state = tle.parse()?;

    println!("{tle}");
    println!("--- catalog: {}, epoch: {}, period: {:.2} min, age: {} h",
        state.catalog_number, short_utc_datetime_string( &state.epoch), state.period_minutes(),
        state.age_at( utc_now_secs()).num_hours());

    Ok(())
}
