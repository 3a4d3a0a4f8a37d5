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

#![allow(unused)]

//! resource lookup for gtrack applications. Configs are RON files that are looked up at runtime
//! (in this order) in
//!
//! 1. `$GTRACK_HOME/configs/..`
//! 2. `<workspace-parent>/configs/..` (the first directory outside of the source repository)
//! 3. `$HOME/.gtrack/configs/..`
//! 4. `<workspace>/<crate>/configs/..` (in-repo defaults)
//!
//! In each of the external locations a bin specific override `configs/<bin-crate>/<bin-name>/<crate>/<file>`
//! takes precedence over the crate global `configs/<crate>/<file>`

use std::{path::{Path,PathBuf}, sync::OnceLock, env};

mod configs;
pub use configs::*;

mod utils;
pub use utils::*;

mod errors;
pub use errors::*;

/* #region bin globals *******************************************************************/

#[derive(Debug)]
pub struct BinContext {
    pub bin_name: String,
    pub bin_crate: String,
    pub bin_suffix: Option<String>, // optionally set via GTRACK_BIN_SUFFIX at runtime
    pub proc_id: Option<u32>,
}

impl BinContext {
    pub fn set(bin_name: &str, bin_crate: &str, bin_suffix: Option<String>, proc_id: Option<u32>) {
        BIN_CONTEXT.set(Self{ bin_name: bin_name.to_string(),
            bin_crate: bin_crate.to_string(),
            bin_suffix, proc_id } ).expect("Context set twice");
    }
}

pub static BIN_CONTEXT: OnceLock<BinContext> = OnceLock::new();

/// this has to be called (once) from the bin source
#[macro_export]
macro_rules! set_bin_context {
    () => {
        {
            // env! is expanded at compile time, env::var at runtime
            gtrack_build::BinContext::set(env!("CARGO_BIN_NAME"),
                 env!("CARGO_PKG_NAME"),
                 std::env::var("GTRACK_BIN_SUFFIX").ok(),
                 Some(std::process::id()));
        }
    }
}

pub fn get_bin_context()->Option<&'static BinContext> {
    BIN_CONTEXT.get()
}

/// this is mostly for tests and tools that want to load a config from an explicit path
pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> serde::Deserialize<'a>, P: AsRef<Path> {
    let data = file_contents_as_bytes(path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

/* #endregion bin globals */

/* #region resource lookup ***************************************************************/

/// locate a resource file and return its PathBuf
fn find_resource_file (resource_dir: &str, ctx: &Option<&BinContext>, resource_crate: &str, filename: &str) -> Option<PathBuf> {
    if let Ok(gtrack_home) = env::var("GTRACK_HOME") {
        let mut path = Path::new( gtrack_home.as_str()).to_path_buf();
        if find_external_resource( &mut path, resource_dir, ctx, resource_crate, filename) { return Some(path) }
    }

    if let Some(mut path) = get_workspace_parent() {
        if find_external_resource( &mut path, resource_dir, ctx, resource_crate, filename) { return Some(path) }
    }

    if let Ok(usr_home) = env::var("HOME") {
        let mut path = Path::new(usr_home.as_str()).to_path_buf();
        path.push(".gtrack");
        if find_external_resource( &mut path, resource_dir, ctx, resource_crate, filename) { return Some(path) }
    }

    if let Some(mut path) = get_workspace_dir() {
        if find_internal_resource( &mut path, resource_dir, resource_crate, filename) { return Some(path) }
    }

    None
}

fn find_external_resource (path: &mut PathBuf, resource_dir: &str, bin_ctx: &Option<&BinContext>, resource_crate: &str, filename: &str)->bool {
    if let Some(ctx) = bin_ctx {
        let bin_crate = ctx.bin_crate.as_str();
        let bin_name = ctx.bin_name.as_str();
        if path_cond!( is_file, path, resource_dir, bin_crate, bin_name, resource_crate, filename) { return true }
    }

    if path_cond!( is_file, path, resource_dir, resource_crate, filename) { return true }

    false
}

fn find_internal_resource (path: &mut PathBuf, resource_dir: &str, resource_crate: &str, filename: &str)->bool {
    path_cond!( is_file, path, resource_crate, resource_dir, filename)
}

/* #endregion resource lookup */
