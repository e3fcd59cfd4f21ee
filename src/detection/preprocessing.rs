use image::{GrayImage, Luma, RgbImage};

use crate::models::ChannelOrder;

// BT.601 luma weights scaled by 2^14
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Convert a 3-channel image to grayscale using BT.601 luma weights
pub fn to_grayscale(img: &RgbImage, order: ChannelOrder) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let (r, g, b) = order.to_rgb(img.get_pixel(x, y).0);
        let luma = r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT;
        Luma([((luma + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8])
    })
}

/// Binary threshold: intensity strictly above `threshold` becomes 255, everything else 0
pub fn binarize(img: &GrayImage, threshold: u8) -> GrayImage {
    let mut binary = img.clone();
    for p in binary.pixels_mut() {
        *p = if p.0[0] > threshold { Luma([255]) } else { Luma([0]) };
    }
    binary
}
