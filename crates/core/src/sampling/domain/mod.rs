pub mod extraction_result;
pub mod frame_name;
pub mod sampling_plan;
