//! Hand landmark parsing and storage
//!
//! MediaPipe Hands reports 21 landmarks per hand. JS hands them over as a
//! flat Float32Array (x, y, z per landmark); an empty array means no hand.

use wasm_bindgen::prelude::*;
use std::cell::RefCell;
use std::fmt;
use crate::kinematics::Vec3;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Landmarks per hand
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Floats per hand in the flat JS array
pub const HAND_FLAT_LEN: usize = HAND_LANDMARK_COUNT * 3;

/// The point whose speed is measured
pub const TRACKED_LANDMARK: usize = INDEX_TIP;

/// Hand skeleton connections for rendering
pub const HAND_SKELETON: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (INDEX_MCP, MIDDLE_MCP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl HandLandmark {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

pub type Hand = [HandLandmark; HAND_LANDMARK_COUNT];

/// Malformed landmark array from JS
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandmarkError {
    InvalidLength { got: usize, expected: usize },
}

impl fmt::Display for LandmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandmarkError::InvalidLength { got, expected } => {
                write!(f, "Invalid hand landmark data length: {} (expected 0 or {})", got, expected)
            }
        }
    }
}

impl std::error::Error for LandmarkError {}

impl From<LandmarkError> for JsValue {
    fn from(err: LandmarkError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Parse one hand from a flat array. Empty input means the hand is absent.
pub fn parse_hand(flat: &[f32]) -> Result<Option<Hand>, LandmarkError> {
    if flat.is_empty() {
        return Ok(None);
    }
    if flat.len() != HAND_FLAT_LEN {
        return Err(LandmarkError::InvalidLength { got: flat.len(), expected: HAND_FLAT_LEN });
    }

    let mut hand = [HandLandmark::default(); HAND_LANDMARK_COUNT];
    for (landmark, xyz) in hand.iter_mut().zip(flat.chunks_exact(3)) {
        *landmark = HandLandmark { x: xyz[0], y: xyz[1], z: xyz[2] };
    }
    Ok(Some(hand))
}

// ============================================================================
// STORAGE (latest screen-space hand, for the renderer)
// ============================================================================

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static LATEST_HAND: RefCell<Option<Hand>> = RefCell::new(None);
}

pub(crate) fn store_hand(hand: Option<Hand>) {
    LATEST_HAND.with(|cell| *cell.borrow_mut() = hand);
}

/// Latest visible hand, `None` when the last frame had no hand
pub fn get_hand_landmarks() -> Option<Hand> {
    LATEST_HAND.with(|cell| *cell.borrow())
}
