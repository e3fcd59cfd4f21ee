use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use serde_json::Value;
use tower::util::ServiceExt;

use shapesense::api::{create_app, AppState};
use shapesense::config::DEFAULT_MAX_BODY_BYTES;
use shapesense::ShapeClassifier;

pub const IMAGE_H: u32 = 500;
pub const IMAGE_W: u32 = 500;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// All-black 500x500 canvas
pub fn empty_image() -> RgbImage {
    RgbImage::new(IMAGE_W, IMAGE_H)
}

/// Filled square spanning (100, 100) to (400, 400) inclusive
pub fn rectangle_image() -> RgbImage {
    let mut img = empty_image();
    draw_filled_rect_mut(&mut img, Rect::at(100, 100).of_size(301, 301), WHITE);
    img
}

/// Filled circle centred at (250, 250) with radius 200
pub fn circle_image() -> RgbImage {
    let mut img = empty_image();
    draw_filled_circle_mut(&mut img, (250, 250), 200, WHITE);
    img
}

pub fn triangle_image() -> RgbImage {
    let mut img = empty_image();
    let corners = [Point::new(250, 50), Point::new(450, 420), Point::new(50, 420)];
    draw_polygon_mut(&mut img, &corners, WHITE);
    img
}

/// Regular hexagon with circumradius 200, pointy side up
pub fn hexagon_image() -> RgbImage {
    let mut img = empty_image();
    let corners = [
        Point::new(250, 50),
        Point::new(423, 150),
        Point::new(423, 350),
        Point::new(250, 450),
        Point::new(77, 350),
        Point::new(77, 150),
    ];
    draw_polygon_mut(&mut img, &corners, WHITE);
    img
}

/// Nested `[row][col][channel]` JSON array, the shape the predictor expects
pub fn image_to_json(img: &RgbImage) -> Value {
    let rows: Vec<Value> = (0..img.height())
        .map(|y| {
            let pixels: Vec<Value> = (0..img.width())
                .map(|x| {
                    let p = img.get_pixel(x, y).0;
                    Value::from(vec![p[0], p[1], p[2]])
                })
                .collect();
            Value::Array(pixels)
        })
        .collect();
    Value::Array(rows)
}

pub fn test_app() -> Router {
    create_app(AppState::new(ShapeClassifier::default()), DEFAULT_MAX_BODY_BYTES)
}

pub async fn send(app: Router, request: Request<Body>) -> anyhow::Result<Response> {
    Ok(app.oneshot(request).await?)
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> anyhow::Result<Response> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?;
    send(app, request).await
}

pub async fn body_json(response: Response) -> anyhow::Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}
