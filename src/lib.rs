pub mod api;
pub mod config;
pub mod detection;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod validation;

pub use config::{ConfigError, Settings};
pub use detection::{ClassifierParams, ShapeClassifier};
pub use models::{ChannelOrder, Classification, ShapeLabel};
pub use pipeline::{MetadataValue, Pipeline, PipelineContext, PipelineData, PipelineStep};
pub use validation::{parse_image, ImageValidationError};
