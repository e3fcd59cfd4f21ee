use image::{imageops, GrayImage};
use imageproc::contours::{find_contours, BorderType, Contour};

/// Find the outermost contours of the foreground regions in a binary image.
///
/// Hole borders and anything nested inside a hole are dropped. Contours come
/// back in raster discovery order: the region whose first pixel appears
/// earliest in a row-major scan is first.
///
/// Border following only starts an outer border on a pixel with background to
/// its left, so regions touching column 0 would be traced as holes. Tracing
/// runs on a copy framed by one background pixel on every side, and the points
/// are shifted back into image coordinates.
pub fn find_external_contours(binary: &GrayImage) -> Vec<Contour<i32>> {
    let (width, height) = binary.dimensions();
    let mut framed = GrayImage::new(width + 2, height + 2);
    imageops::replace(&mut framed, binary, 1, 1);

    find_contours::<i32>(&framed)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|mut c| {
            for p in &mut c.points {
                p.x -= 1;
                p.y -= 1;
            }
            c
        })
        .collect()
}

/// Pick the contour the classifier looks at: the first one in discovery order
pub fn select_contour(contours: &[Contour<i32>]) -> Option<&Contour<i32>> {
    contours.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_region_on_left_edge_is_outer() {
        let mut binary = GrayImage::new(10, 10);
        for y in 2..6 {
            for x in 0..4 {
                binary.put_pixel(x, y, Luma([255]));
            }
        }

        let found = find_external_contours(&binary);
        assert_eq!(found.len(), 1);
        let xs: Vec<i32> = found[0].points.iter().map(|p| p.x).collect();
        let ys: Vec<i32> = found[0].points.iter().map(|p| p.y).collect();
        assert_eq!(xs.iter().min(), Some(&0));
        assert_eq!(xs.iter().max(), Some(&3));
        assert_eq!(ys.iter().min(), Some(&2));
        assert_eq!(ys.iter().max(), Some(&5));
    }

    #[test]
    fn test_full_frame_has_one_contour() {
        let binary = GrayImage::from_pixel(6, 4, Luma([255]));
        let found = find_external_contours(&binary);
        assert_eq!(found.len(), 1);
        assert!(found[0].points.iter().all(|p| (0..6).contains(&p.x) && (0..4).contains(&p.y)));
    }

    #[test]
    fn test_single_column_image() {
        let binary = GrayImage::from_pixel(1, 5, Luma([255]));
        assert_eq!(find_external_contours(&binary).len(), 1);
    }
}
