pub mod extract_frames_use_case;
pub mod pipeline_logger;
pub mod reconstruct_use_case;
