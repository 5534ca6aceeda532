//! Row-source (delimited file) reading and appending.

mod reader;
mod writer;

pub use reader::{
    MAX_ROW_SOURCE_SIZE, check_file_size, check_file_size_with_limit, frame_from_records,
    read_row_source, read_rows_from, validate_encoding,
};
pub use writer::{AppendReport, append_record};
