pub mod ssd_face_detector;
pub mod yolo_detector;
