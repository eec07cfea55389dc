//! Landing Error Scoring System (LESS) analysis library.
//!
//! This library provides automated jump-landing biomechanics analysis:
//! - `OpenCV` for video capture and annotation
//! - ONNX Runtime for body pose landmark inference
//! - Savitzky-Golay differentiation for angular velocity, acceleration,
//!   and jerk
//! - Reference-distribution z-scoring and piecewise-linear risk scoring
//!   of joint angles and accelerations
//!
//! The analysis pipeline consists of:
//! 1. Pose extraction to locate 33 body landmarks in each frame
//! 2. Joint angle computation for both knees and hips
//! 3. Smoothed differentiation of the angle time series
//! 4. Scoring against the LESS reference tables and risk thresholds
//!
//! # Examples
//!
//! ## Scoring a single value against the reference tables
//!
//! ```
//! use less_scoring::distribution::ReferenceTables;
//! use less_scoring::joint::{JointKind, Phase};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tables = ReferenceTables::standard()?;
//! let result = tables.classify(Phase::InitialContact, JointKind::KneeFlexion, 18.3)?;
//! println!("{} (z = {:.2})", result.category, result.zscore);
//! # Ok(())
//! # }
//! ```
//!
//! ## Differentiating an angle series
//!
//! ```
//! use less_scoring::kinematics::Differentiator;
//! use less_scoring::series::AngleBank;
//! use less_scoring::joint::{JointId, JointKind, Side};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let differentiator = Differentiator::new(31, 2, 30.0)?;
//! let mut bank = AngleBank::new();
//! let knee = JointId::new(Side::Left, JointKind::KneeFlexion);
//!
//! for i in 0..60 {
//!     bank.push(knee, 20.0 + f64::from(i) * 0.5);
//! }
//!
//! let velocity = differentiator.velocity(&bank, knee)?;
//! println!("latest angular velocity: {:.2} deg/s", velocity.last().unwrap());
//! # Ok(())
//! # }
//! ```
//!
//! ## Risk-scoring a knee valgus angle
//!
//! ```
//! use less_scoring::joint::{JointId, JointKind, Side};
//! use less_scoring::risk::RiskTables;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tables = RiskTables::standard()?;
//! let knee = JointId::new(Side::Left, JointKind::KneeValgus);
//! let assessment = tables.score_angle(knee, 12.0)?;
//! println!("score {:.1}: {}", assessment.score, assessment.category);
//! # Ok(())
//! # }
//! ```
//!
//! ## Full video pipeline
//!
//! ```no_run
//! use less_scoring::app::{AnalysisMode, AppConfig, LessApp, VideoSource};
//! use less_scoring::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig {
//!     video_source: VideoSource::File("jump.mp4".to_string()),
//!     mode: AnalysisMode::Kinematics,
//!     output_path: None,
//!     settings: Config::default(),
//! };
//! let mut app = LessApp::new(config)?;
//! app.run()?;
//! # Ok(())
//! # }
//! ```

/// Joint angle computation from pose landmarks
pub mod angles;

/// Main application module
pub mod app;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// Reference-distribution z-score classification
pub mod distribution;

/// Error types and result handling
pub mod error;

/// Three-dimensional angle geometry primitives
pub mod geometry;

/// Structured joint, side, and phase identifiers
pub mod joint;

/// Angular velocity, acceleration, and jerk via smoothed differentiation
pub mod kinematics;

/// LESS item scoring rules and score interpretation
pub mod less;

/// Body pose landmark extraction via ONNX Runtime
pub mod pose_extraction;

/// Piecewise-linear risk scoring of angles and accelerations
pub mod risk;

/// Per-joint angle time series accumulation
pub mod series;

/// Savitzky-Golay smoothing and differentiation
pub mod savgol;

pub use error::{Error, Result};
