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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GtrackOrbitalError>;

#[derive(Error,Debug)]
pub enum GtrackOrbitalError {

    /// the element set text does not follow the fixed column layout. `line` is 1 or 2 (0 if the
    /// text could not be split into lines at all)
    #[error("malformed element set (line {line}, {field}): {reason}")]
    MalformedElementSet { line: u8, field: &'static str, reason: String },

    /// the orbit model could not produce a valid position. `offset_minutes` is `None` if the
    /// model could not be initialized from the orbital state
    #[error("propagation diverged (offset {offset_minutes:?} min): {reason}")]
    PropagationDiverged { offset_minutes: Option<i64>, reason: String },

    #[error("config error {0}")]
    ConfigError(String),

    #[error("element set acquisition failed {0}")]
    AcquisitionError(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("http error {0}")]
    HttpError( #[from] reqwest::Error),

    #[error("CSV error {0}")]
    CsvError( #[from] csv::Error),

    #[error("RON error {0}")]
    RonError( #[from] ron::error::SpannedError),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("build error {0}")]
    BuildError( #[from] gtrack_build::GtrackBuildError),

    #[error("operation failed {0}")]
    OpFailedError(String),
}

impl GtrackOrbitalError {
    pub fn is_malformed_element_set (&self)->bool {
        matches!( self, GtrackOrbitalError::MalformedElementSet{..})
    }

    pub fn is_propagation_diverged (&self)->bool {
        matches!( self, GtrackOrbitalError::PropagationDiverged{..})
    }
}

macro_rules! malformed {
    ($line:expr, $field:literal, $fmt:literal $(, $arg:expr )* ) => {
        GtrackOrbitalError::MalformedElementSet { line: $line, field: $field, reason: format!( $fmt $(, $arg)* ) }
    };
}
pub (crate) use malformed;

macro_rules! diverged {
    ($offset:expr, $fmt:literal $(, $arg:expr )* ) => {
        GtrackOrbitalError::PropagationDiverged { offset_minutes: $offset, reason: format!( $fmt $(, $arg)* ) }
    };
}
pub (crate) use diverged;

macro_rules! config_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        GtrackOrbitalError::ConfigError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use config_error;

macro_rules! acquisition_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        GtrackOrbitalError::AcquisitionError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use acquisition_error;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        GtrackOrbitalError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;
