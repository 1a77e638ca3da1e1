pub mod scripted_landmark_source;
pub mod unavailable_landmark_source;
