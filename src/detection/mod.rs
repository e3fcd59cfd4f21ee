pub mod contours;
pub mod polygon;
pub mod preprocessing;
pub mod steps;

use anyhow::Result;
use image::{DynamicImage, RgbImage};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::models::{ChannelOrder, Classification, ShapeLabel};
use crate::pipeline::Pipeline;

pub const DEFAULT_THRESHOLD: u8 = 10;
pub const DEFAULT_EPSILON: f64 = 0.03;

/// Tunables for the detection pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierParams {
    /// Intensities strictly above this are foreground
    pub threshold: u8,
    /// Approximation tolerance as a fraction of the contour perimeter
    pub epsilon: f64,
    pub channel_order: ChannelOrder,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            epsilon: DEFAULT_EPSILON,
            channel_order: ChannelOrder::default(),
        }
    }
}

/// Classifies the dominant shape of an image.
///
/// Pure with respect to its input: one instance can be shared across threads
/// and every call with the same image yields the same label.
pub struct ShapeClassifier {
    params: ClassifierParams,
    pipeline: Pipeline,
}

impl ShapeClassifier {
    pub fn new(params: ClassifierParams) -> Self {
        Self {
            params,
            pipeline: build_standard_pipeline(&params),
        }
    }

    /// Dump every pipeline stage as PNG into `output_dir` (must be empty or missing)
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        self.pipeline = self.pipeline.with_debug(output_dir)?;
        Ok(self)
    }

    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    /// Run the full pipeline on a validated 3-channel image
    pub fn classify(&self, image: RgbImage) -> Result<Classification> {
        debug!(params = ?self.params, "classifying image");
        let data = self.pipeline.run(DynamicImage::ImageRgb8(image))?;

        if data.get_bool("shape_found") != Some(true) {
            debug!("no contour found");
            return Ok(Classification::not_found());
        }

        let vertex_count = data.get_int("vertex_count").unwrap_or(0) as usize;
        let label = ShapeLabel::from_vertex_count(vertex_count);
        let classification = Classification {
            label,
            contour_count: data.get_int("contour_count").unwrap_or(0) as usize,
            vertex_count: Some(vertex_count),
            perimeter: data.get_float("perimeter"),
        };

        debug!(
            %label,
            vertex_count,
            perimeter = ?classification.perimeter,
            contours = classification.contour_count,
            "classified image"
        );
        Ok(classification)
    }
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        Self::new(ClassifierParams::default())
    }
}

/// Build the standard detection pipeline using the composable pipeline system
pub fn build_standard_pipeline(params: &ClassifierParams) -> Pipeline {
    use crate::detection::steps::*;

    Pipeline::new()
        .add_step(Arc::new(GrayscaleStep {
            channel_order: params.channel_order,
        }))
        .add_step(Arc::new(ThresholdStep {
            threshold: params.threshold,
        }))
        .add_step(Arc::new(ContourDetectionStep))
        .add_step(Arc::new(PolygonApproximationStep {
            epsilon: params.epsilon,
        }))
}
