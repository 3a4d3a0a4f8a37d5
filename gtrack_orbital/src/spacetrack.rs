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

use std::time::Duration;
use reqwest::{Client, header::{COOKIE, SET_COOKIE}};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use gtrack_common::datetime::deserialize_duration;
use crate::{
    errors::{GtrackOrbitalError, Result, acquisition_error},
    tle::{OrbitalState, TleElementSet},
};

pub const SPACETRACK_URL: &str = "https://www.space-track.org";
pub const ISS_NORAD_CAT_ID: u32 = 25544;

#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct SpaceTrackCredentials {
    identity: String,
    password: String,
}

impl SpaceTrackCredentials {
    pub fn new (identity: impl Into<String>, password: impl Into<String>) -> Self {
        SpaceTrackCredentials { identity: identity.into(), password: password.into() }
    }
}

/// configuration data for space-track.org TLE retrieval (`spacetrack.ron`)
#[derive(Deserialize,Debug,Clone)]
pub struct SpaceTrackConfig {
    pub credentials: SpaceTrackCredentials,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_norad_cat_id")]
    pub norad_cat_id: u32,

    #[serde(default = "default_max_retry")]
    pub max_retry: usize,   // retries after the first failed attempt

    #[serde(default = "default_retry_delay", deserialize_with = "deserialize_duration")]
    pub retry_delay: Duration,
}

fn default_base_url() -> String { SPACETRACK_URL.to_string() }
fn default_norad_cat_id() -> u32 { ISS_NORAD_CAT_ID }
fn default_max_retry() -> usize { 2 }
fn default_retry_delay() -> Duration { Duration::from_secs(5) }

/// retrieves the latest element set of a single body from space-track.org.
/// Each retrieval logs in first since the session cookie has a short expiration
pub struct SpaceTrackClient {
    config: SpaceTrackConfig,
    client: Client,
}

impl SpaceTrackClient {
    pub fn new (config: SpaceTrackConfig) -> Self {
        SpaceTrackClient { config, client: Client::new() }
    }

    pub fn config (&self) -> &SpaceTrackConfig { &self.config }

    fn query_url (&self) -> String {
        format!("{}/basicspacedata/query/class/gp/NORAD_CAT_ID/{}/format/tle", self.config.base_url, self.config.norad_cat_id)
    }

    async fn login (&self) -> Result<String> {
        let url = format!("{}/ajaxauth/login", self.config.base_url);

        let response = self.client
            .post( url)
            .form( &self.config.credentials)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err( acquisition_error!("space-track.org login failed: {}", response.status()))
        }

        match response.headers().get(SET_COOKIE) {
            Some(cookie) => {
                let cookie = cookie.to_str().map_err(|_| acquisition_error!("invalid space-track.org cookie value"))?;
                // only the name=value pair is sent back
                Ok( cookie.split(';').next().unwrap_or(cookie).to_string())
            }
            None => Err( acquisition_error!("space-track.org login failed to obtain cookie"))
        }
    }

    /// raw TLE text of the configured body
    pub async fn fetch_tle_text (&self) -> Result<String> {
        let cookie = self.login().await?;
        let url = self.query_url();
        debug!("querying {}", url);

        let response = self.client
            .get( url)
            .header( COOKIE, cookie)
            .send()
            .await?;

        if response.status().is_success() {
            Ok( response.text().await? )
        } else {
            Err( acquisition_error!("error retrieving TLE for {}: {}", self.config.norad_cat_id, response.status()))
        }
    }

    /// retrieve and split the TLE text, retrying failed retrievals up to `max_retry` times.
    /// Malformed responses are not retried
    pub async fn fetch_element_set (&self) -> Result<TleElementSet> {
        let mut attempt = 0;
        loop {
            match self.fetch_tle_text().await {
                Ok(text) => {
                    info!("retrieved TLE for {}", self.config.norad_cat_id);
                    return TleElementSet::from_text( &text)
                }
                Err(e) => {
                    if attempt >= self.config.max_retry {
                        return Err(e)
                    }
                    attempt += 1;
                    warn!("TLE retrieval failed: {e}, retry {attempt}/{} in {:?}", self.config.max_retry, self.config.retry_delay);
                    tokio::time::sleep( self.config.retry_delay).await;
                }
            }
        }
    }

    pub async fn fetch_orbital_state (&self) -> Result<OrbitalState> {
        self.fetch_element_set().await?.parse()
    }
}
