pub mod init;
pub mod init_types;

pub use init::{instance_from_records, load_instance, validate_records, write_instance};
pub use init_types::InstanceRecord;
