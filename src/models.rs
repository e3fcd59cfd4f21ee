use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label returned by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeLabel {
    #[serde(rename = "triangle")]
    Triangle,
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "pentagon")]
    Pentagon,
    #[serde(rename = "hexagon")]
    Hexagon,
    #[serde(rename = "circle")]
    Circle,
    #[serde(rename = "unknown")]
    Unknown,
    /// No foreground region survived thresholding
    #[serde(rename = "shape not found")]
    NotFound,
}

impl ShapeLabel {
    /// Map the vertex count of an approximated polygon to a label.
    ///
    /// Arms are checked top to bottom, so every count lands in exactly one.
    pub fn from_vertex_count(vertices: usize) -> Self {
        match vertices {
            0..=2 => ShapeLabel::Unknown,
            3 => ShapeLabel::Triangle,
            4 => ShapeLabel::Rectangle,
            5 => ShapeLabel::Pentagon,
            6 => ShapeLabel::Hexagon,
            _ => ShapeLabel::Circle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeLabel::Triangle => "triangle",
            ShapeLabel::Rectangle => "rectangle",
            ShapeLabel::Pentagon => "pentagon",
            ShapeLabel::Hexagon => "hexagon",
            ShapeLabel::Circle => "circle",
            ShapeLabel::Unknown => "unknown",
            ShapeLabel::NotFound => "shape not found",
        }
    }
}

impl fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the three samples of a pixel are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ChannelOrder {
    /// Blue, green, red (the layout OpenCV-style producers send)
    #[default]
    Bgr,
    Rgb,
}

impl ChannelOrder {
    /// Reorder a pixel's samples into (r, g, b)
    pub fn to_rgb(self, pixel: [u8; 3]) -> (u8, u8, u8) {
        match self {
            ChannelOrder::Bgr => (pixel[2], pixel[1], pixel[0]),
            ChannelOrder::Rgb => (pixel[0], pixel[1], pixel[2]),
        }
    }
}

impl FromStr for ChannelOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bgr" => Ok(ChannelOrder::Bgr),
            "rgb" => Ok(ChannelOrder::Rgb),
            other => Err(format!("unknown channel order '{}'", other)),
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelOrder::Bgr => f.write_str("bgr"),
            ChannelOrder::Rgb => f.write_str("rgb"),
        }
    }
}

/// Outcome of one classification run
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: ShapeLabel,

    /// Number of outermost contours found after thresholding
    pub contour_count: usize,

    /// Vertices of the approximated polygon (None when no contour was found)
    pub vertex_count: Option<usize>,

    /// Closed arc length of the selected contour
    pub perimeter: Option<f64>,
}

impl Classification {
    pub fn not_found() -> Self {
        Self {
            label: ShapeLabel::NotFound,
            contour_count: 0,
            vertex_count: None,
            perimeter: None,
        }
    }
}
