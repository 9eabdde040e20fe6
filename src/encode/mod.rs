//! Frame sinks: in-memory capture, PNG sequences and MP4 via the system `ffmpeg`.

pub(crate) mod ffmpeg;
pub(crate) mod png;
pub(crate) mod sink;
