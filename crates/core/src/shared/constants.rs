// Object detector (Darknet YOLOv4-tiny)
pub const YOLO_CONFIG_FILE: &str = "yolov4-tiny-obj.cfg";
pub const YOLO_WEIGHTS_FILE: &str = "yolov4-tiny-obj_final.weights";
pub const CLASS_NAMES_FILE: &str = "coco.names";
pub const YOLO_INPUT_SIZE: u32 = 416;
pub const OBJECT_CONFIDENCE_THRESHOLD: f32 = 0.5;
pub const OBJECT_NMS_THRESHOLD: f32 = 0.1;
/// Candidates at least this wide (in frame pixels) are discarded.
pub const MAX_BOX_WIDTH: i32 = 600;

// Face detector (Caffe ResNet-10 SSD)
pub const SSD_CONFIG_FILE: &str = "deploy.prototxt";
pub const SSD_WEIGHTS_FILE: &str = "res10_300x300_ssd_iter_140000.caffemodel";
pub const SSD_INPUT_SIZE: u32 = 300;
/// Per-channel mean in BGR order, as the Caffe model was trained.
pub const SSD_MEAN_BGR: [f32; 3] = [104.0, 177.0, 123.0];
pub const FACE_CONFIDENCE_THRESHOLD: f32 = 0.5;
pub const GALLERY_DIR: &str = "faces";
/// Euclidean distance between two 8-bit crops below which they count as the same face.
pub const FACE_MATCH_TOLERANCE: f64 = 3000.0;
pub const UNKNOWN_LABEL: &str = "Unknown";

// Capture
pub const DEFAULT_CAMERA_INDEX: i32 = 0;
pub const REQUESTED_FRAME_WIDTH: u32 = 1280;
pub const REQUESTED_FRAME_HEIGHT: u32 = 720;

// Display
pub const OBJECT_WINDOW_TITLE: &str = "Object detection";
pub const FACE_WINDOW_TITLE: &str = "Face recognition";
pub const ESCAPE_KEY: i32 = 27;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
