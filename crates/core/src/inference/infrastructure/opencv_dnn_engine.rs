//! OpenCV DNN backend for Darknet and Caffe networks.
use std::path::Path;

use ndarray::{Array4, ArrayD, IxDyn};
use opencv::core::{self, Mat, Vector};
use opencv::dnn;
use opencv::prelude::*;

use crate::inference::domain::inference_engine::InferenceEngine;
use crate::inference::domain::model_files::ModelFormat;

/// A network loaded through `cv::dnn`, pinned to the OpenCV CPU backend.
pub struct OpenCvDnnEngine {
    net: dnn::Net,
    output_names: Vector<String>,
}

impl OpenCvDnnEngine {
    pub fn from_darknet(config: &Path, weights: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let net = dnn::read_net_from_darknet(&path_str(config)?, &path_str(weights)?)?;
        Self::prepare(net, ModelFormat::Darknet)
    }

    pub fn from_caffe(prototxt: &Path, weights: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let net = dnn::read_net_from_caffe(&path_str(prototxt)?, &path_str(weights)?)?;
        Self::prepare(net, ModelFormat::Caffe)
    }

    fn prepare(mut net: dnn::Net, format: ModelFormat) -> Result<Self, Box<dyn std::error::Error>> {
        if net.empty()? {
            return Err(format!("{format:?} network is empty after loading").into());
        }
        net.set_preferable_backend(dnn::DNN_BACKEND_OPENCV)?;
        net.set_preferable_target(dnn::DNN_TARGET_CPU)?;
        let output_names = net.get_unconnected_out_layers_names()?;
        log::debug!("{format:?} network outputs: {:?}", output_names.to_vec());
        Ok(Self { net, output_names })
    }
}

impl InferenceEngine for OpenCvDnnEngine {
    fn forward(
        &mut self,
        input: &Array4<f32>,
    ) -> Result<Vec<ArrayD<f32>>, Box<dyn std::error::Error>> {
        let blob = array_to_blob(input)?;
        self.net.set_input(&blob, "", 1.0, core::Scalar::default())?;

        let mut outputs: Vector<Mat> = Vector::new();
        self.net.forward(&mut outputs, &self.output_names)?;

        outputs.iter().map(|mat| blob_to_array(&mat)).collect()
    }

    fn backend_name(&self) -> &'static str {
        "opencv-dnn"
    }
}

fn path_str(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    path.to_str()
        .map(str::to_owned)
        .ok_or_else(|| format!("model path is not valid UTF-8: {}", path.display()).into())
}

fn array_to_blob(input: &Array4<f32>) -> Result<Mat, Box<dyn std::error::Error>> {
    let sizes: Vec<i32> = input.shape().iter().map(|&d| d as i32).collect();
    let mut blob = Mat::new_nd_with_default(&sizes, core::CV_32F, core::Scalar::all(0.0))?;
    let contiguous = input.as_standard_layout();
    let src = contiguous.as_slice().ok_or("input tensor is not contiguous")?;
    blob.data_typed_mut::<f32>()?.copy_from_slice(src);
    Ok(blob)
}

fn blob_to_array(mat: &Mat) -> Result<ArrayD<f32>, Box<dyn std::error::Error>> {
    let dims: Vec<usize> = mat.mat_size().iter().map(|&d| d as usize).collect();
    let data = mat.data_typed::<f32>()?.to_vec();
    Ok(ArrayD::from_shape_vec(IxDyn(&dims), data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_roundtrip_keeps_layout() {
        let input = Array4::from_shape_fn((1, 3, 2, 2), |(_, c, y, x)| (c * 4 + y * 2 + x) as f32);
        let blob = array_to_blob(&input).unwrap();
        let back = blob_to_array(&blob).unwrap();
        assert_eq!(back.shape(), &[1, 3, 2, 2]);
        assert_eq!(back.as_slice().unwrap(), input.as_slice().unwrap());
    }
}
