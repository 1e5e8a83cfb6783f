//! Shared test helpers: fake classifier, JPEG fixtures, request builders

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use http_body_util::BodyExt;
use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use ndarray::Array4;
use serde_json::Value;

use onco_predict::classifier::check_input_shape;
use onco_predict::pipeline::policy::ClassificationPolicy;
use onco_predict::store::{PredictionStore, SqlitePredictionStore};
use onco_predict::{build_router, AppState, Classifier, ClassifierError};

pub const BOUNDARY: &str = "onco-test-boundary";

/// Classifier double returning a fixed activation array and counting calls
pub struct FakeClassifier {
    output: Vec<f32>,
    calls: AtomicUsize,
}

impl FakeClassifier {
    pub fn new(output: Vec<f32>) -> Arc<Self> {
        Arc::new(Self {
            output,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for FakeClassifier {
    fn forward(&self, input: &Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        check_input_shape(input)?;
        Ok(self.output.clone())
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Small valid JPEG
pub fn jpeg_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(64, 48, Rgb([180, 90, 60]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .expect("encode test jpeg");
    buf
}

/// Single-channel JPEG
pub fn grayscale_jpeg_bytes() -> Vec<u8> {
    let img = GrayImage::from_pixel(64, 48, Luma([120]));
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .expect("encode grayscale jpeg");
    buf
}

/// multipart/form-data body with a single file field
pub fn multipart_body(field: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"upload.jpg\"\r\n",
            field
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// POST /predict with the given bytes in `field`
pub fn predict_request(field: &str, bytes: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field, bytes)))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Extract JSON body from response
pub async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse JSON body")
}

/// Router over an in-memory SQLite store and the given classifier
pub async fn test_app(classifier: Arc<FakeClassifier>) -> Router {
    let pool = onco_common::db::init_memory_database()
        .await
        .expect("in-memory database");
    let store: Arc<dyn PredictionStore> = Arc::new(SqlitePredictionStore::new(pool));
    test_app_with_store(classifier, store)
}

pub fn test_app_with_store(
    classifier: Arc<FakeClassifier>,
    store: Arc<dyn PredictionStore>,
) -> Router {
    let state = AppState::new(classifier, store, ClassificationPolicy::default());
    build_router(state)
}
