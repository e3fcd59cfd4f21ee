use anyhow::{Context, Result};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::contours::Contour;
use imageproc::drawing::draw_line_segment_mut;
use imageproc::point::Point;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Data that flows through the pipeline
#[derive(Clone)]
pub struct PipelineData {
    /// Working image for the current stage (color, then grayscale, then binary)
    pub image: DynamicImage,

    /// Outermost contours found in the binary image
    pub contours: Vec<Contour<i32>>,

    /// Approximated polygon of the selected contour
    pub polygon: Vec<Point<i32>>,

    /// Metadata recorded by steps (e.g., "perimeter", "vertex_count")
    pub metadata: HashMap<String, MetadataValue>,
}

/// Metadata value types
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Bool(bool),
    Float(f64),
    Int(i64),
}

impl PipelineData {
    /// Create PipelineData for a full image
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image,
            contours: Vec::new(),
            polygon: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.metadata.get(key) {
            Some(MetadataValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.metadata.get(key) {
            Some(MetadataValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.metadata.get(key) {
            Some(MetadataValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Render the working image with contours (green) and polygon (red) on top
    pub fn render_debug(&self) -> RgbImage {
        let mut canvas = self.image.to_rgb8();

        for contour in &self.contours {
            draw_closed_path(&mut canvas, &contour.points, Rgb([0, 255, 0]));
        }
        draw_closed_path(&mut canvas, &self.polygon, Rgb([255, 0, 0]));

        canvas
    }
}

fn draw_closed_path(canvas: &mut RgbImage, points: &[Point<i32>], color: Rgb<u8>) {
    if points.len() < 2 {
        return;
    }
    for i in 0..points.len() {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];
        draw_line_segment_mut(
            canvas,
            (p1.x as f32, p1.y as f32),
            (p2.x as f32, p2.y as f32),
            color,
        );
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Context available to all pipeline steps
#[derive(Clone, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Transform the data for the next stage
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData>;

    /// Human-readable name for this step (used in logs and debug directories)
    fn name(&self) -> &str;
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext::default(),
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig { output_dir });

        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Run every step in order on an input image
    pub fn run(&self, input: DynamicImage) -> Result<PipelineData> {
        self.run_partial(input, self.steps.len())
    }

    /// Run the pipeline but stop after `num_steps` steps (useful for debugging)
    pub fn run_partial(&self, input: DynamicImage, num_steps: usize) -> Result<PipelineData> {
        let mut data = PipelineData::from_image(input);
        self.save_debug_output(&data, 0, "input")?;

        for (step_idx, step) in self.steps.iter().take(num_steps).enumerate() {
            debug!(step = step.name(), "running pipeline step");
            data = step.process(data, &self.context)?;
            self.save_debug_output(&data, step_idx + 1, step.name())?;
        }

        Ok(data)
    }

    fn save_debug_output(&self, data: &PipelineData, index: usize, step_name: &str) -> Result<()> {
        let Some(debug_config) = &self.context.debug else {
            return Ok(());
        };

        let filename = format!(
            "{:02}_{}.png",
            index,
            step_name.to_lowercase().replace(' ', "_")
        );
        let output_path = debug_config.output_dir.join(&filename);

        data.render_debug()
            .save(&output_path)
            .with_context(|| format!("Failed to save debug image {}", output_path.display()))?;

        debug!(path = %output_path.display(), "saved debug image");
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
