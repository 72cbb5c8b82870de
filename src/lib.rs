//! nc_scan: science/metadata classification of NetCDF variables
//!
//! nc_scan inspects a hierarchical NetCDF (or HDF5-backed NetCDF-4) file and
//! partitions its variables into two disjoint sets:
//!
//! - **science variables**: variables that declare `coordinates` or a
//!   `grid_mapping` and are candidates for spatial resampling;
//! - **metadata variables**: everything else, copied through unresampled.
//!
//! Dimensions, the coordinate variables named by `coordinates`, and the
//! grid-mapping variables named by `grid_mapping` are excluded from both
//! sets.
//!
//! ## Module Organization
//!
//! - [`model`]: in-memory group tree and the traits the classifier reads it through
//! - [`netcdf_io`]: loading NetCDF files into the model
//! - [`coordinates`]: tokenization of `coordinates` attribute values
//! - [`walker`]: depth-first traversal of the group tree
//! - [`classify`]: per-group classification and the final set algebra
//! - [`report`]: text and JSON rendering of results
//! - [`errors`]: Centralized error handling
//!
//! ## Usage
//! ```rust,no_run
//! use nc_scan::prelude::*;
//!
//! let classification = classify_path("granule.nc").unwrap();
//! for name in classification.science_variables() {
//!     println!("resample {}", name);
//! }
//! ```
//!
//! Synthetic trees classify the same way as loaded files:
//! ```rust
//! use nc_scan::prelude::*;
//!
//! let mut root = Group::root();
//! root.add_dimension("lat", 3)
//!     .add_dimension("lon", 4)
//!     .add_variable(Variable::new("data").with_attribute("coordinates", "lat lon"));
//!
//! let classification = classify(&Dataset::from_root(root));
//! assert!(classification.science_variables().contains("data"));
//! assert!(classification.metadata_variables().is_empty());
//! ```

pub mod classify;
pub mod coordinates;
pub mod errors;
pub mod model;
pub mod netcdf_io;
pub mod report;
pub mod walker;

pub use classify::*;
pub use coordinates::*;
pub use errors::*;
pub use model::*;
pub use netcdf_io::*;
pub use report::*;
pub use walker::*;

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::classify::{
        classify, classify_path, classify_with, Classification, ClassifierOptions,
    };
    pub use crate::errors::{NcScanError, Result};
    pub use crate::model::{
        AttributeSource, AttributeValue, DataModel, Dataset, Group, GroupNode, Variable,
    };
}
