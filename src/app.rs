//! Main application module: the video scoring loop.
//!
//! Per frame: read -> extract landmarks -> compute angles -> accumulate ->
//! (once warmed up) differentiate and score -> draw overlay -> write/show.
//! A frame without a usable pose is passed through unscored; end of the
//! video ends the run.

use crate::{
    angles::compute_pose_angles,
    config::Config,
    distribution::ReferenceTables,
    error::Result,
    geometry::Landmark,
    joint::{JointId, Phase, Side},
    kinematics::{DerivativeSeries, Differentiator},
    pose_extraction::{PoseExtractor, PoseLandmarks},
    risk::{RiskAssessment, RiskTables},
    series::AngleBank,
};
use log::{debug, info, warn};
use opencv::{
    core::{Mat, Point, Scalar, Size},
    highgui,
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
    videoio::{self, VideoCapture, VideoWriter, CAP_PROP_FPS, CAP_PROP_FRAME_COUNT, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
};
use std::collections::BTreeMap;
use std::path::Path;

/// Video source type
#[derive(Debug, Clone)]
pub enum VideoSource {
    /// Webcam index
    Camera(i32),
    /// Video file path
    File(String),
}

/// What the overlay reports each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Angular velocity / acceleration / jerk with risk scores
    Kinematics,
    /// Z-score classification against the LESS reference tables
    ZScore,
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Camera index or video file path
    pub video_source: VideoSource,
    /// Overlay analysis mode
    pub mode: AnalysisMode,
    /// Explicit output path; derived from the input when absent
    pub output_path: Option<String>,
    /// File-backed settings (model path, smoothing, display)
    pub settings: Config,
}

/// Main application struct
pub struct LessApp {
    config: AppConfig,
    extractor: PoseExtractor,
    differentiator: Differentiator,
    reference_tables: ReferenceTables,
    risk_tables: RiskTables,
    bank: AngleBank,
    video_capture: VideoCapture,
    video_writer: Option<VideoWriter>,
    fps: f64,
}

impl LessApp {
    /// Create a new scoring application.
    ///
    /// # Errors
    ///
    /// Fails if the video source cannot be opened, its frame rate cannot
    /// be determined, the pose model cannot be loaded, or the static
    /// tables fail validation.
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing LESS scoring application");
        config.settings.validate()?;

        let video_capture = match &config.video_source {
            VideoSource::Camera(index) => {
                info!("Opening camera {index}");
                VideoCapture::new(*index, videoio::CAP_ANY)?
            }
            VideoSource::File(path) => {
                info!("Opening video file: {path}");
                VideoCapture::from_file(path, videoio::CAP_ANY)?
            }
        };

        let fps = video_capture.get(CAP_PROP_FPS)?;
        let fps = if fps > 0.0 {
            fps
        } else if matches!(config.video_source, VideoSource::Camera(_)) {
            warn!("Camera did not report a frame rate, assuming {}", crate::constants::DEFAULT_FPS);
            crate::constants::DEFAULT_FPS
        } else {
            // dt for differentiation derives from fps, so a file without
            // one cannot be analyzed
            return Err(crate::Error::InvalidInput(
                "Unable to determine FPS of the video".to_string(),
            ));
        };

        let width = video_capture.get(CAP_PROP_FRAME_WIDTH)? as i32;
        let height = video_capture.get(CAP_PROP_FRAME_HEIGHT)? as i32;
        info!("Video: {width}x{height} @ {fps:.1} fps");

        let video_writer = if config.settings.display.write_video {
            let path = match &config.output_path {
                Some(path) => path.clone(),
                None => derive_output_path(&config.video_source),
            };
            info!("Writing annotated video to {path}");
            let fourcc = VideoWriter::fourcc('m', 'p', '4', 'v')?;
            Some(VideoWriter::new(&path, fourcc, fps, Size::new(width, height), true)?)
        } else {
            None
        };

        let extractor = PoseExtractor::new(
            &config.settings.model.pose_landmarks,
            config.settings.pose.visibility_threshold,
        )?;
        let differentiator = Differentiator::new(
            config.settings.smoothing.window_length,
            config.settings.smoothing.poly_order,
            fps,
        )?;

        Ok(Self {
            config,
            extractor,
            differentiator,
            reference_tables: ReferenceTables::standard()?,
            risk_tables: RiskTables::standard()?,
            bank: AngleBank::new(),
            video_capture,
            video_writer,
            fps,
        })
    }

    /// Frame rate the run was opened with
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Run the main processing loop until the source is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates capture, inference, and scoring errors; a frame with no
    /// detectable pose is skipped, not an error.
    pub fn run(&mut self) -> Result<()> {
        let total_frames = self.video_capture.get(CAP_PROP_FRAME_COUNT)? as i64;
        if total_frames > 0 {
            info!("Processing {total_frames} frames");
        }

        let mut frame_count: i64 = 0;
        loop {
            let mut frame = Mat::default();
            if !self.video_capture.read(&mut frame)? || frame.empty() {
                info!("End of video source after {frame_count} frames");
                break;
            }

            self.process_frame(&mut frame, frame_count)?;
            frame_count += 1;

            if let Some(writer) = &mut self.video_writer {
                writer.write(&frame)?;
            }
            if self.config.settings.display.show_window {
                highgui::imshow("LESS Scoring", &frame)?;
                let key = highgui::wait_key(1)?;
                if key == 27 || key == i32::from(b'q') {
                    info!("Exit requested by user");
                    break;
                }
            }

            if total_frames > 0 && frame_count % 100 == 0 {
                info!("Processed {frame_count}/{total_frames} frames");
            }
        }

        self.video_capture.release()?;
        if let Some(writer) = &mut self.video_writer {
            writer.release()?;
        }
        Ok(())
    }

    /// Analyze one frame and draw the overlay onto it
    fn process_frame(&mut self, frame: &mut Mat, frame_index: i64) -> Result<()> {
        let Some(landmarks) = self.extractor.extract(frame)? else {
            debug!("Frame {frame_index}: no usable pose");
            return Ok(());
        };

        let angles = match compute_pose_angles(&landmarks) {
            Ok(angles) => angles,
            Err(e) => {
                // Collapsed limb segments happen on partial occlusion;
                // treat like a frame with no pose
                warn!("Frame {frame_index}: {e}");
                return Ok(());
            }
        };
        self.bank.push_frame(&angles);

        draw_skeleton(frame, &landmarks)?;
        match self.config.mode {
            AnalysisMode::Kinematics => self.overlay_kinematics(frame, &angles)?,
            AnalysisMode::ZScore => self.overlay_zscores(frame, &angles)?,
        }
        Ok(())
    }

    /// Draw angle / velocity / acceleration / jerk lines with risk coloring
    fn overlay_kinematics(&self, frame: &mut Mat, angles: &BTreeMap<JointId, f64>) -> Result<()> {
        let velocities = self.differentiator.velocities(&self.bank);
        let accelerations = self.differentiator.accelerations(&self.bank);
        let jerks = self.differentiator.jerks(&accelerations);
        let acceleration_scores = self.risk_tables.score_accelerations(&accelerations)?;

        let mut y = 30;
        for (joint, angle) in angles {
            let velocity = latest(&velocities, *joint);
            let acceleration = latest(&accelerations, *joint);
            let jerk = latest(&jerks, *joint);

            let angle_text = format!("{joint}: Angle={angle:.2}");
            self.put_line(frame, &angle_text, y, Scalar::new(0.0, 0.0, 0.0, 0.0))?;
            y += 20;

            let motion_text = format!("{joint}: Vel={velocity:.2} Jerk={jerk:.2}");
            self.put_line(frame, &motion_text, y, Scalar::new(0.0, 0.0, 0.0, 0.0))?;
            y += 20;

            let (accel_text, color) = match acceleration_scores.get(joint) {
                Some(assessment) => (
                    format!(
                        "{joint}: Accl={acceleration:.2} Score={:.2} {}",
                        assessment.score, assessment.category
                    ),
                    risk_color(assessment),
                ),
                None => (
                    format!("{joint}: Accl={acceleration:.2} (warming up)"),
                    Scalar::new(0.0, 0.0, 0.0, 0.0),
                ),
            };
            self.put_line(frame, &accel_text, y, color)?;
            y += 20;
        }
        Ok(())
    }

    /// Draw per-phase z-score classifications of the current angles
    fn overlay_zscores(&self, frame: &mut Mat, angles: &BTreeMap<JointId, f64>) -> Result<()> {
        let mut y = 30;
        for phase in Phase::ALL {
            self.put_line(frame, &format!("{phase}:"), y, Scalar::new(0.0, 0.0, 0.0, 0.0))?;
            y += 20;
            for (joint, angle) in angles {
                let result = self.reference_tables.classify(phase, joint.kind, *angle)?;
                let text = format!(
                    "{joint}: {} (Z: {:.2}, Angle: {angle:.2})",
                    result.category, result.zscore
                );
                self.put_line(frame, &text, y, Scalar::new(0.0, 0.0, 0.0, 0.0))?;
                y += 20;
            }
        }
        Ok(())
    }

    fn put_line(&self, frame: &mut Mat, text: &str, y: i32, color: Scalar) -> Result<()> {
        imgproc::put_text(
            frame,
            text,
            Point::new(10, y),
            FONT_HERSHEY_SIMPLEX,
            self.config.settings.display.font_scale,
            color,
            1,
            LINE_8,
            false,
        )?;
        Ok(())
    }
}

/// Latest sample of a joint's derivative series, 0 before warm-up
fn latest(series: &DerivativeSeries, joint: JointId) -> f64 {
    series
        .get(&joint)
        .and_then(|s| s.last())
        .copied()
        .unwrap_or(0.0)
}

/// Normalized landmark coordinates mapped into frame pixels
#[allow(clippy::cast_possible_truncation)]
fn landmark_point(landmark: Landmark, width: i32, height: i32) -> Point {
    Point::new(
        (landmark.x * f64::from(width)).round() as i32,
        (landmark.y * f64::from(height)).round() as i32,
    )
}

/// Draw the tracked shoulder-hip-knee-ankle chain for both sides
fn draw_skeleton(frame: &mut Mat, landmarks: &PoseLandmarks) -> Result<()> {
    let width = frame.cols();
    let height = frame.rows();
    let bone_color = Scalar::new(230.0, 216.0, 173.0, 0.0);
    let joint_color = Scalar::new(0.0, 165.0, 255.0, 0.0);

    for side in [Side::Left, Side::Right] {
        let chain = [
            landmark_point(landmarks.shoulder(side), width, height),
            landmark_point(landmarks.hip(side), width, height),
            landmark_point(landmarks.knee(side), width, height),
            landmark_point(landmarks.ankle(side), width, height),
        ];
        for pair in chain.windows(2) {
            imgproc::line(frame, pair[0], pair[1], bone_color, 2, LINE_8, 0)?;
        }
        for point in chain {
            imgproc::circle(frame, point, 4, joint_color, -1, LINE_8, 0)?;
        }
    }
    Ok(())
}

/// BGR text color ramping green -> red with the risk score
fn risk_color(assessment: &RiskAssessment) -> Scalar {
    let green = (225.0 - assessment.score * 2.25).clamp(0.0, 255.0);
    let red = (assessment.score * 2.55).clamp(0.0, 255.0);
    Scalar::new(0.0, green, red, 0.0)
}

/// Output path next to the input: `<stem>_scored.<ext>`
fn derive_output_path(source: &VideoSource) -> String {
    match source {
        VideoSource::Camera(_) => "less_scored.mp4".to_string(),
        VideoSource::File(path) => {
            let path = Path::new(path);
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
            let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("mp4");
            let name = format!("{stem}_scored.{ext}");
            match path.parent() {
                Some(parent) if parent.as_os_str().is_empty() => name,
                Some(parent) => parent.join(name).to_string_lossy().into_owned(),
                None => name,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::{score_value, RiskDirection, RiskThresholds};

    #[test]
    fn test_derive_output_path() {
        let source = VideoSource::File("videos/jump.mov".to_string());
        assert_eq!(derive_output_path(&source), "videos/jump_scored.mov");

        let source = VideoSource::File("jump.mp4".to_string());
        assert_eq!(derive_output_path(&source), "jump_scored.mp4");

        let source = VideoSource::Camera(0);
        assert_eq!(derive_output_path(&source), "less_scored.mp4");
    }

    #[test]
    fn test_landmark_point_scales_to_frame() {
        let landmark = Landmark::new(0.5, 0.25, 0.0, 1.0);
        let point = landmark_point(landmark, 640, 480);
        assert_eq!(point, Point::new(320, 120));

        let corner = landmark_point(Landmark::new(1.0, 1.0, 0.0, 1.0), 640, 480);
        assert_eq!(corner, Point::new(640, 480));
    }

    #[test]
    fn test_risk_color_ramp() {
        let thresholds = RiskThresholds::new(5.0, 10.0, 15.0, RiskDirection::HigherIsRiskier).unwrap();
        let normal = risk_color(&score_value(0.0, &thresholds));
        assert!((normal[1] - 225.0).abs() < 1e-9);
        assert!(normal[2].abs() < 1e-9);

        let extreme = risk_color(&score_value(20.0, &thresholds));
        assert!(extreme[1].abs() < 1e-9);
        assert!((extreme[2] - 255.0).abs() < 1e-9);
    }
}
