//! Tapedeck - Capture
//!
//! Camera / photo library flow for the capture screen.
//!
//! Both permissions (camera and photo library) are requested before either
//! picker is shown; a refusal aborts the flow with
//! [`CaptureError::PermissionDenied`] so the front end can explain why.
//! A canceled picker is not an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tapedeck_capture::{CaptureError, CaptureSession};
//! use tapedeck_core::{ImagePicker, PermissionGate};
//!
//! async fn on_take_photo(gate: Arc<dyn PermissionGate>, picker: Arc<dyn ImagePicker>) {
//!     let mut session = CaptureSession::new(gate, picker);
//!     match session.take_photo().await {
//!         Ok(Some(uri)) => println!("showing {}", uri),
//!         Ok(None) => {}
//!         Err(CaptureError::PermissionDenied) => println!("please grant access to continue"),
//!         Err(e) => eprintln!("{}", e),
//!     }
//! }
//! ```

mod error;
mod session;

pub use error::{CaptureError, Result};
pub use session::{CaptureSession, CaptureSource};
