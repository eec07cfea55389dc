//! Body pose landmark extraction using `ONNX` Runtime.
//!
//! Wraps a BlazePose-style single-person landmark model: one video frame
//! in, 33 body landmarks out, each with normalized x/y/z and a visibility
//! score. The extractor is treated as an opaque collaborator by the
//! scoring pipeline; a frame where the lower-body landmarks are not
//! confidently visible yields `None` rather than an error.

use crate::constants::NUM_POSE_LANDMARKS;
use crate::geometry::Landmark;
use crate::joint::Side;
use crate::Result;
use ndarray::{Array1, Array4, CowArray};
use opencv::core::{Mat, Size, CV_32F};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;
use ort::{Environment, Session, Value};
use std::path::Path;
use std::sync::Arc;

/// Pose model input size (square)
const POSE_INPUT_SIZE: i32 = 256;

/// Values per landmark in the model output: x, y, z, visibility, presence
const VALUES_PER_LANDMARK: usize = 5;

/// BlazePose landmark indices for the joints the pipeline reads
mod index {
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;
}

/// One frame's worth of body landmarks
#[derive(Debug, Clone)]
pub struct PoseLandmarks {
    landmarks: Vec<Landmark>,
}

impl PoseLandmarks {
    /// Build from a full landmark vector.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ModelOutputError`] if the count is wrong.
    pub fn from_vec(landmarks: Vec<Landmark>) -> Result<Self> {
        if landmarks.len() != NUM_POSE_LANDMARKS {
            return Err(crate::Error::ModelOutputError(format!(
                "expected {NUM_POSE_LANDMARKS} landmarks, got {}",
                landmarks.len()
            )));
        }
        Ok(Self { landmarks })
    }

    /// All-zero landmarks, for building synthetic poses in tests
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            landmarks: vec![Landmark::new(0.0, 0.0, 0.0, 0.0); NUM_POSE_LANDMARKS],
        }
    }

    #[must_use]
    pub fn shoulder(&self, side: Side) -> Landmark {
        match side {
            Side::Left => self.landmarks[index::LEFT_SHOULDER],
            Side::Right => self.landmarks[index::RIGHT_SHOULDER],
        }
    }

    #[must_use]
    pub fn hip(&self, side: Side) -> Landmark {
        match side {
            Side::Left => self.landmarks[index::LEFT_HIP],
            Side::Right => self.landmarks[index::RIGHT_HIP],
        }
    }

    #[must_use]
    pub fn knee(&self, side: Side) -> Landmark {
        match side {
            Side::Left => self.landmarks[index::LEFT_KNEE],
            Side::Right => self.landmarks[index::RIGHT_KNEE],
        }
    }

    #[must_use]
    pub fn ankle(&self, side: Side) -> Landmark {
        match side {
            Side::Left => self.landmarks[index::LEFT_ANKLE],
            Side::Right => self.landmarks[index::RIGHT_ANKLE],
        }
    }

    pub fn set_shoulder(&mut self, side: Side, landmark: Landmark) {
        let i = match side {
            Side::Left => index::LEFT_SHOULDER,
            Side::Right => index::RIGHT_SHOULDER,
        };
        self.landmarks[i] = landmark;
    }

    pub fn set_hip(&mut self, side: Side, landmark: Landmark) {
        let i = match side {
            Side::Left => index::LEFT_HIP,
            Side::Right => index::RIGHT_HIP,
        };
        self.landmarks[i] = landmark;
    }

    pub fn set_knee(&mut self, side: Side, landmark: Landmark) {
        let i = match side {
            Side::Left => index::LEFT_KNEE,
            Side::Right => index::RIGHT_KNEE,
        };
        self.landmarks[i] = landmark;
    }

    pub fn set_ankle(&mut self, side: Side, landmark: Landmark) {
        let i = match side {
            Side::Left => index::LEFT_ANKLE,
            Side::Right => index::RIGHT_ANKLE,
        };
        self.landmarks[i] = landmark;
    }

    /// Mean visibility over the lower-body landmarks the pipeline reads
    #[must_use]
    pub fn lower_body_visibility(&self) -> f32 {
        let indices = [
            index::LEFT_HIP,
            index::RIGHT_HIP,
            index::LEFT_KNEE,
            index::RIGHT_KNEE,
            index::LEFT_ANKLE,
            index::RIGHT_ANKLE,
        ];
        let sum: f32 = indices.iter().map(|&i| self.landmarks[i].visibility).sum();
        sum / indices.len() as f32
    }
}

/// Pose landmark extractor using `ONNX` Runtime
pub struct PoseExtractor {
    session: Session,
    visibility_threshold: f32,
}

impl PoseExtractor {
    /// Create a new extractor from an `ONNX` model file.
    ///
    /// # Errors
    ///
    /// Returns an error if the model file cannot be loaded or the ONNX
    /// runtime environment cannot be created.
    pub fn new<P: AsRef<Path>>(model_path: P, visibility_threshold: f32) -> Result<Self> {
        log::info!(
            "Initializing PoseExtractor with model: {}",
            model_path.as_ref().display()
        );
        let environment = Arc::new(
            Environment::builder()
                .with_name("pose_extractor")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(model_path)?;

        Ok(Self {
            session,
            visibility_threshold,
        })
    }

    /// Extract pose landmarks from one frame.
    ///
    /// Returns `None` when the lower-body landmarks are not confidently
    /// visible (no usable pose this frame).
    ///
    /// # Errors
    ///
    /// Returns an error if preprocessing or model inference fails.
    pub fn extract(&self, frame: &Mat) -> Result<Option<PoseLandmarks>> {
        let input = self.preprocess(frame)?;
        let raw = self.forward(input)?;
        let landmarks = self.postprocess(&raw)?;

        if landmarks.lower_body_visibility() < self.visibility_threshold {
            log::debug!(
                "Lower-body visibility {:.2} below threshold {:.2}, skipping frame",
                landmarks.lower_body_visibility(),
                self.visibility_threshold
            );
            return Ok(None);
        }
        Ok(Some(landmarks))
    }

    /// Resize, convert BGR to RGB, and normalize to [0, 1]
    #[allow(clippy::cast_sign_loss)] // OpenCV dimensions are positive
    fn preprocess(&self, frame: &Mat) -> Result<Array4<f32>> {
        let size = POSE_INPUT_SIZE as usize;
        let channels = 3;

        let mut resized = Mat::default();
        imgproc::resize(
            frame,
            &mut resized,
            Size::new(POSE_INPUT_SIZE, POSE_INPUT_SIZE),
            0.0,
            0.0,
            InterpolationFlags::INTER_LINEAR as i32,
        )?;

        let mut rgb_image = Mat::default();
        imgproc::cvt_color(&resized, &mut rgb_image, imgproc::COLOR_BGR2RGB, 0)?;

        let mut float_image = Mat::default();
        rgb_image.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

        let mut data = vec![0.0f32; size * size * channels];
        for row in 0..size {
            for col in 0..size {
                let pixel = float_image.at_2d::<opencv::core::Vec3f>(row as i32, col as i32)?;
                for ch in 0..channels {
                    data[(row * size + col) * channels + ch] = pixel[ch];
                }
            }
        }

        Array4::from_shape_vec((1, size, size, channels), data)
            .map_err(|e| crate::Error::ModelDataFormatError(format!("Failed to create array: {e}")))
    }

    /// Run forward pass through the model
    fn forward(&self, inputs: Array4<f32>) -> Result<Array1<f32>> {
        let cow_array = CowArray::from(inputs.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;

        let landmark_output = outputs
            .into_iter()
            .next()
            .ok_or_else(|| crate::Error::ModelOutputError("No output from model".to_string()))?;

        let tensor = landmark_output.try_extract::<f32>()?;
        let view = tensor.view();
        let data = view
            .as_slice()
            .ok_or_else(|| crate::Error::ModelOutputError("Failed to get output data".to_string()))?;

        Ok(Array1::from(data.to_vec()))
    }

    /// Convert the raw output tensor to normalized landmarks
    fn postprocess(&self, raw: &Array1<f32>) -> Result<PoseLandmarks> {
        let expected = NUM_POSE_LANDMARKS * VALUES_PER_LANDMARK;
        if raw.len() < expected {
            return Err(crate::Error::ModelOutputError(format!(
                "expected at least {expected} output values, got {}",
                raw.len()
            )));
        }

        let scale = f64::from(POSE_INPUT_SIZE);
        let mut landmarks = Vec::with_capacity(NUM_POSE_LANDMARKS);
        for i in 0..NUM_POSE_LANDMARKS {
            let base = i * VALUES_PER_LANDMARK;
            landmarks.push(Landmark::new(
                f64::from(raw[base]) / scale,
                f64::from(raw[base + 1]) / scale,
                f64::from(raw[base + 2]) / scale,
                sigmoid(raw[base + 3]),
            ));
        }
        PoseLandmarks::from_vec(landmarks)
    }
}

/// Visibility logits come out of the model unsquashed
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
