pub mod config;
pub mod error;
pub mod form;
pub mod launch;
pub mod params_file;
pub mod resolver;
pub mod schema;
pub mod server;
pub mod submission;
pub mod types;

pub use config::{ConfigLoader, ConfigValidator, NfParamsConfig, RuntimePaths};
pub use error::AppError;
pub use form::{render, render_all, FieldDescriptor, FieldKind};
pub use launch::LaunchSpec;
pub use params_file::ParamsFileWriter;
pub use resolver::{FormResolver, MultiValuePolicy, ResolveError, ResolvedParams, SubmittedForm};
pub use schema::{walk, walk_key, walk_with, Descriptor, Leaf, ParameterSchema, SchemaError};
pub use submission::{Submission, SubmissionPipeline};
pub use types::*;
