//! Record sinks: local files and a remote REST store.

mod file;
mod remote;

pub use file::{read_records, write_records, CSV_HEADER};
pub use remote::{RemoteRow, RemoteSink, UploadReport};
