use crate::detection::{contours, polygon, preprocessing};
use crate::models::ChannelOrder;
use crate::pipeline::{MetadataValue, PipelineContext, PipelineData, PipelineStep};
use anyhow::Result;
use image::DynamicImage;

/// Convert the color input to a single luma channel
pub struct GrayscaleStep {
    pub channel_order: ChannelOrder,
}

impl PipelineStep for GrayscaleStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = preprocessing::to_grayscale(&data.image.to_rgb8(), self.channel_order);
        Ok(PipelineData {
            image: DynamicImage::ImageLuma8(gray),
            ..data
        })
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Separate foreground from background
pub struct ThresholdStep {
    pub threshold: u8,
}

impl PipelineStep for ThresholdStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let binary = preprocessing::binarize(&data.image.to_luma8(), self.threshold);
        Ok(PipelineData {
            image: DynamicImage::ImageLuma8(binary),
            ..data
        })
    }

    fn name(&self) -> &str {
        "Binary Threshold"
    }
}

/// Trace the outer borders of the foreground regions
pub struct ContourDetectionStep;

impl PipelineStep for ContourDetectionStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let found = contours::find_external_contours(&data.image.to_luma8());
        let count = found.len() as i64;

        Ok(PipelineData {
            contours: found,
            ..data
        }
        .with_metadata("contour_count", MetadataValue::Int(count)))
    }

    fn name(&self) -> &str {
        "Contour Detection"
    }
}

/// Simplify the selected contour to a polygon with a perimeter-relative tolerance
pub struct PolygonApproximationStep {
    pub epsilon: f64,
}

impl PipelineStep for PolygonApproximationStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let measured = contours::select_contour(&data.contours).map(|contour| {
            let perimeter = polygon::arc_length(&contour.points, true);
            let approx =
                polygon::approximate_closed_polygon(&contour.points, self.epsilon * perimeter);
            (perimeter, approx)
        });

        let Some((perimeter, approx)) = measured else {
            return Ok(data.with_metadata("shape_found", MetadataValue::Bool(false)));
        };
        let vertex_count = approx.len() as i64;

        Ok(PipelineData {
            polygon: approx,
            ..data
        }
        .with_metadata("shape_found", MetadataValue::Bool(true))
        .with_metadata("perimeter", MetadataValue::Float(perimeter))
        .with_metadata("vertex_count", MetadataValue::Int(vertex_count)))
    }

    fn name(&self) -> &str {
        "Polygon Approximation"
    }
}
