//! Real-time object detection and face recognition over a camera stream.
//!
//! Pure stages (preprocessing, decoding, NMS, matching, FPS, the loop itself)
//! live in `domain` modules and build without OpenCV. Camera, window and the
//! Darknet/Caffe backend sit behind the `opencv` feature.

pub mod capture {
    pub mod domain {
        pub mod frame_source;
    }
    #[cfg(feature = "opencv")]
    pub mod infrastructure {
        pub mod opencv_camera;
    }
}

pub mod detection {
    pub mod domain {
        pub mod class_names;
        pub mod detector;
        pub mod nms;
        pub mod ssd_decoder;
        pub mod yolo_decoder;
    }
    pub mod infrastructure;
}

pub mod inference {
    pub mod domain {
        pub mod blob;
        pub mod inference_engine;
        pub mod model_files;
    }
    pub mod infrastructure {
        pub mod engine_factory;
        pub mod onnx_engine;
        #[cfg(feature = "opencv")]
        pub mod opencv_dnn_engine;
    }
}

pub mod pipeline {
    pub mod face_annotator;
    pub mod frame_annotator;
    pub mod live_detection_use_case;
    pub mod object_annotator;
    pub mod pipeline_logger;
}

pub mod recognition {
    pub mod domain {
        pub mod face_matcher;
        pub mod gallery;
    }
    pub mod infrastructure {
        pub mod gallery_loader;
    }
}

pub mod rendering {
    pub mod domain {
        pub mod fps_counter;
        pub mod frame_display;
        pub mod overlay;
    }
    #[cfg(feature = "opencv")]
    pub mod infrastructure {
        pub mod opencv_window;
    }
}

pub mod shared {
    pub mod bbox;
    pub mod config;
    pub mod constants;
    pub mod detection;
    pub mod frame;
}
